#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Berlin, used by most tests.
pub const BERLIN: [&str; 4] = ["--lat", "52.5", "--lon", "13.4"];

/// Longyearbyen, for midnight sun and polar night.
pub const SVALBARD: [&str; 4] = ["--lat", "78.2", "--lon", "15.6"];

pub fn calcelestial_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("calcelestial"))
}

/// Test helper for running calcelestial with a fixed calendar timezone.
pub struct CalcTest {
    cmd: Command,
}

impl CalcTest {
    /// Runs with `TZ=UTC` so dates and times are reproducible.
    pub fn new() -> Self {
        Self::in_zone("UTC")
    }

    pub fn in_zone(tz: &str) -> Self {
        let mut cmd = calcelestial_command();
        cmd.env("TZ", tz)
            .env_remove("CALCELESTIAL_LOG")
            .env_remove("CALCELESTIAL_SYSTEM_TIMEZONE");
        Self { cmd }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn assert_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Asserts success and a single output line matching `pattern`.
    pub fn assert_line_matches(mut self, pattern: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .success()
            .stdout(predicate::str::is_match(pattern).unwrap())
            .stdout(predicate::function(|out: &str| out.lines().count() == 1))
    }

    /// Asserts exit code 1 with `diagnostic` and the usage text on stderr.
    pub fn assert_usage_error(mut self, diagnostic: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(diagnostic))
            .stderr(predicate::str::contains("Usage:"))
    }

    pub fn assert_circumpolar(mut self) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("object is circumpolar"))
    }

    /// Runs successfully and returns stdout without the trailing newline.
    pub fn stdout(mut self) -> String {
        let output = self.cmd.output().unwrap();
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .unwrap()
            .trim_end()
            .to_string()
    }

    /// Runs and parses stdout as a number, for `§` field formats.
    pub fn number(self) -> f64 {
        let out = self.stdout();
        out.parse()
            .unwrap_or_else(|_| panic!("not a number: {out:?}"))
    }
}

/// Sun in Berlin on the June solstice.
pub fn berlin_solstice() -> CalcTest {
    CalcTest::new()
        .args(["--object", "sun"])
        .args(BERLIN)
        .args(["--time", "2023-06-21 12:00:00"])
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
