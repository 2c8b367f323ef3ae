use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use std::env;
use std::sync::OnceLock;

static SYSTEM_TIMEZONE: OnceLock<TimezoneInfo> = OnceLock::new();
const SYSTEM_TZ_OVERRIDE_ENV: &str = "CALCELESTIAL_SYSTEM_TIMEZONE";

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timezone used to read `--time` and to print results without `--timezone`.
#[derive(Debug, Clone)]
pub enum TimezoneInfo {
    Fixed(FixedOffset),
    Named(Tz),
}

impl TimezoneInfo {
    pub fn to_datetime_from_utc(&self, dt: &NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            TimezoneInfo::Fixed(offset) => offset.from_utc_datetime(dt),
            TimezoneInfo::Named(tz) => tz.from_utc_datetime(dt).fixed_offset(),
        }
    }

    /// Returns `None` for local times that fall into a DST gap.
    pub fn to_datetime_from_local(&self, dt: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            TimezoneInfo::Fixed(offset) => offset.from_local_datetime(dt).earliest(),
            TimezoneInfo::Named(tz) => tz
                .from_local_datetime(dt)
                .earliest()
                .map(|dt| dt.fixed_offset()),
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.to_datetime_from_utc(&Utc::now().naive_utc())
    }
}

pub fn parse_timezone_spec(spec: &str) -> Option<TimezoneInfo> {
    if spec.is_empty() {
        return None;
    }
    parse_tz_offset(spec)
        .map(TimezoneInfo::Fixed)
        .or_else(|| spec.parse::<Tz>().ok().map(TimezoneInfo::Named))
}

fn parse_tz_offset(tz: &str) -> Option<FixedOffset> {
    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?)
    } else {
        (rest.parse::<i32>().ok()?, 0)
    };

    if !(0..60).contains(&minutes) {
        return None;
    }
    let seconds = hours.checked_mul(3600)?.checked_add(minutes * 60)?;
    FixedOffset::east_opt(sign * seconds)
}

fn parse_timezone_env(value: Option<String>) -> Option<TimezoneInfo> {
    value
        .as_deref()
        .map(str::trim)
        .map(|v| v.trim_start_matches(':'))
        .and_then(parse_timezone_spec)
}

fn detect_system_timezone() -> TimezoneInfo {
    parse_timezone_env(env::var(SYSTEM_TZ_OVERRIDE_ENV).ok())
        .or_else(|| parse_timezone_env(get_timezone().ok()))
        .unwrap_or_else(|| TimezoneInfo::Fixed(Local::now().offset().fix()))
}

pub fn calendar_timezone() -> TimezoneInfo {
    parse_timezone_env(env::var("TZ").ok())
        .unwrap_or_else(|| SYSTEM_TIMEZONE.get_or_init(detect_system_timezone).clone())
}

/// Parses `YYYY-MM-DD HH:MM:SS` (or a bare date, meaning midnight) as local time.
pub fn parse_local_datetime(
    dt_str: &str,
    tz: &TimezoneInfo,
) -> Result<DateTime<FixedOffset>, String> {
    let trimmed = dt_str.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| format!("invalid date: {}", dt_str))?;

    tz.to_datetime_from_local(&naive).ok_or_else(|| {
        format!(
            "invalid date: {} (does not exist in local timezone, likely DST gap)",
            dt_str
        )
    })
}

/// Parses the whole-hour offset given with `--timezone`.
pub fn parse_timezone_hours(value: &str) -> Result<FixedOffset, String> {
    let error = || format!("invalid timezone: {} (expected whole hours, -23 to 23)", value);
    let hours = value.trim().parse::<i32>().map_err(|_| error())?;
    if !(-23..=23).contains(&hours) {
        return Err(error());
    }
    FixedOffset::east_opt(hours * 3600).ok_or_else(error)
}
