/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`,
/// `"enable"`, `"enabled"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`, `"disable"`,
/// `"disabled"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        _ => None,
    }
}

/// Non-negative whole number; signs, fractions and junk are rejected.
pub fn parse_number(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.starts_with('+') {
        return None;
    }
    trimmed.parse().ok()
}

/// Comma separated list with whitespace trimmed and empty entries dropped.
pub fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
