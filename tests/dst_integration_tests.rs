mod common;
use common::*;

fn berlin_local() -> CalcTest {
    CalcTest::in_zone("Europe/Berlin")
        .args(["--object", "sun"])
        .args(BERLIN)
}

#[test]
fn test_time_is_read_in_calendar_timezone() {
    berlin_local()
        .args(["--time", "2023-06-21 12:00:00", "--format", "%H:%M %z"])
        .assert_line_matches(r"^12:00 \+0200\n$");
    berlin_local()
        .args(["--time", "2023-12-21 12:00:00", "--format", "%H:%M %z"])
        .assert_line_matches(r"^12:00 \+0100\n$");
}

#[test]
fn test_events_print_in_calendar_timezone() {
    berlin_local()
        .args(["--time", "2023-06-21 12:00:00", "--moment", "transit", "--format", "%H:%M %z"])
        .assert_line_matches(r"^13:0\d \+0200\n$");
}

#[test]
fn test_timezone_option_overrides_output_only() {
    berlin_local()
        .args(["--time", "2023-06-21 12:00:00", "--timezone", "0", "--format", "%H:%M"])
        .assert_line_matches(r"^10:00\n$");
}

#[test]
fn test_local_time_in_dst_gap_is_rejected() {
    berlin_local()
        .args(["--time", "2024-03-31 02:30:00"])
        .assert_usage_error("invalid date: 2024-03-31 02:30:00");
}

#[test]
fn test_event_day_is_the_ut_day() {
    // 00:30 local on 22 June is still 21 June in UT
    let local = berlin_local()
        .args(["-m", "rise", "-f", "%Y-%m-%d %H"])
        .args(["-t", "2023-06-22 00:30:00"])
        .stdout();
    assert_eq!(local, "2023-06-21 04");

    let later = berlin_local()
        .args(["-m", "rise", "-f", "%Y-%m-%d %H"])
        .args(["-t", "2023-06-22 02:30:00"])
        .stdout();
    assert_eq!(later, "2023-06-22 04");
}

#[test]
fn test_system_timezone_override() {
    CalcTest::new()
        .env("TZ", "")
        .env("CALCELESTIAL_SYSTEM_TIMEZONE", "Asia/Tokyo")
        .args(["-p", "sun"])
        .args(BERLIN)
        .args(["-t", "2023-06-21 12:00:00", "-f", "%z"])
        .assert_line_matches(r"^\+0900\n$");
}

#[test]
fn test_sun_and_moon_use_the_same_day() {
    let transit_date = |object: &str| {
        CalcTest::in_zone("Europe/Berlin")
            .args(["-p", object, "-m", "transit", "-f", "%Y-%m-%d"])
            .args(BERLIN)
            .args(["-t", "2023-06-22 00:30:00"])
            .stdout()
    };
    assert_eq!(transit_date("sun"), "2023-06-21");
    assert_eq!(transit_date("moon"), "2023-06-21");
}
