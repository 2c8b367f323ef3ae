fn ensure_within(value: f64, min: f64, max: f64, label: &str) -> Result<f64, String> {
    if !(min..=max).contains(&value) {
        Err(format!(
            "invalid {}: {} (must be between {} and {} degrees)",
            label, value, min, max
        ))
    } else {
        Ok(value)
    }
}

pub fn validate_latitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -90.0, 90.0, "latitude")
}

pub fn validate_longitude(value: f64) -> Result<f64, String> {
    ensure_within(value, -180.0, 180.0, "longitude")
}
