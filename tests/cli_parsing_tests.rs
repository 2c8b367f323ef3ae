mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_exits_zero_on_stdout() {
    for flag in ["--help", "-h"] {
        CalcTest::new()
            .args([flag])
            .assert_success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("--object"))
            .stdout(predicate::str::contains("§a"))
            .stderr(predicate::str::is_empty());
    }
}

#[test]
fn test_help_ignores_invalid_options() {
    CalcTest::new()
        .args(["--lat", "999", "--bogus", "--help", "--moment", "never"])
        .assert_success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version() {
    for flag in ["--version", "-v"] {
        CalcTest::new()
            .args([flag])
            .assert_success()
            .stdout(predicate::str::starts_with(format!(
                "calcelestial {}",
                env!("CARGO_PKG_VERSION")
            )))
            .stdout(predicate::str::contains("Build:"))
            .stdout(predicate::str::contains("Features:"));
    }
}

#[test]
fn test_no_arguments_prints_usage() {
    CalcTest::new()
        .args::<[&str; 0], &str>([])
        .assert_usage_error("invalid object")
        .stderr(predicate::str::contains("missing position"));
}

#[test]
fn test_generic_program_name_needs_object() {
    CalcTest::new()
        .args(BERLIN)
        .assert_usage_error("invalid object");
}

#[test]
fn test_invalid_object() {
    CalcTest::new()
        .args(["--object", "comet"])
        .args(BERLIN)
        .assert_usage_error("invalid object: comet");
}

#[test]
fn test_latitude_out_of_range() {
    CalcTest::new()
        .args(["-p", "sun", "--lat", "90.5", "--lon", "0"])
        .assert_usage_error("invalid latitude: 90.5");
}

#[test]
fn test_longitude_out_of_range() {
    CalcTest::new()
        .args(["-p", "sun", "--lat", "0", "--lon", "-180.1"])
        .assert_usage_error("invalid longitude: -180.1");
}

#[test]
fn test_unparseable_coordinates() {
    CalcTest::new()
        .args(["-p", "sun", "--lat", "north", "--lon", "13,4"])
        .assert_usage_error("invalid latitude: north")
        .stderr(predicate::str::contains("invalid longitude: 13,4"));
}

#[test]
fn test_missing_position() {
    CalcTest::new()
        .args(["-p", "sun"])
        .assert_usage_error("missing position");
    CalcTest::new()
        .args(["-p", "sun", "--lat", "52.5"])
        .assert_usage_error("missing longitude");
}

#[test]
fn test_all_errors_are_reported_together() {
    CalcTest::new()
        .args([
            "-p", "sun", "-H", "dusk", "-m", "noon", "-t", "2023-02-30", "-z", "25", "-f", "§q",
        ])
        .args(BERLIN)
        .assert_usage_error("invalid twilight: dusk")
        .stderr(predicate::str::contains("invalid moment: noon"))
        .stderr(predicate::str::contains("invalid date: 2023-02-30"))
        .stderr(predicate::str::contains("invalid timezone: 25"))
        .stderr(predicate::str::contains("invalid format: §q"));
}

#[test]
fn test_diagnostics_precede_usage() {
    let test = CalcTest::new()
        .args(["-p", "pluto", "--bogus"])
        .args(BERLIN)
        .args(["--", "extra"]);
    let stderr = String::from_utf8(
        test.assert_usage_error("unrecognized option '--bogus'")
            .get_output()
            .stderr
            .clone(),
    )
    .unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines[0], "unrecognized option '--bogus'");
    assert_eq!(lines[1], "unexpected argument 'extra'");
    assert_eq!(lines[2], "");
}

#[test]
fn test_missing_option_argument() {
    CalcTest::new()
        .args(["-p", "sun"])
        .args(BERLIN)
        .args(["--moment"])
        .assert_usage_error("option '--moment' requires an argument");
}

#[test]
fn test_option_syntax_variants() {
    let expected = berlin_solstice()
        .args(["--moment", "transit"])
        .stdout();
    let variants: [&[&str]; 3] = [
        &["--object=sun", "--lat=52.5", "--lon=13.4", "--moment=transit"],
        &["-psun", "-a52.5", "-o13.4", "-mtransit"],
        &["-p", "sun", "-a", "52.5", "-o", "13.4", "-m", "transit"],
    ];
    for variant in variants {
        let out = CalcTest::new()
            .args(variant)
            .args(["-t", "2023-06-21 12:00:00"])
            .stdout();
        assert_eq!(out, expected, "{variant:?}");
    }
}

#[cfg(feature = "geonames")]
#[test]
fn test_query_and_coordinates_are_exclusive() {
    CalcTest::new()
        .args(["-p", "sun", "--query", "Berlin"])
        .args(BERLIN)
        .assert_usage_error("use either --lat and --lon or --query, not both");
}

#[cfg(feature = "geonames")]
#[test]
fn test_failed_lookup() {
    CalcTest::new()
        .env("CALCELESTIAL_GEONAMES_URL", "http://127.0.0.1:9")
        .args(["-p", "sun", "--query", "Berlin"])
        .assert_usage_error("failed to lookup location: Berlin");
}

#[cfg(feature = "geonames")]
#[test]
fn test_lookup_happens_after_validation() {
    // An invalid moment must be reported without waiting on the network.
    CalcTest::new()
        .env("CALCELESTIAL_GEONAMES_URL", "http://127.0.0.1:9")
        .args(["-p", "sun", "--query", "Berlin", "--moment", "later"])
        .assert_usage_error("invalid moment: later")
        .stderr(predicate::str::contains("failed to lookup").not());
}

#[cfg(not(feature = "geonames"))]
#[test]
fn test_query_needs_geonames_feature() {
    CalcTest::new()
        .args(["-p", "sun", "--query", "Berlin"])
        .assert_usage_error("unrecognized option '--query'");
}
