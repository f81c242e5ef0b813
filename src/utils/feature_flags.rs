pub fn is_truthy(value: impl AsRef<str>) -> bool {
    matches!(
        value.as_ref().trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn is_falsy(value: impl AsRef<str>) -> bool {
    matches!(
        value.as_ref().trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Reads a boolean flag, falling back to `default` when the value is absent
/// or not recognisable either way.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(raw) if is_truthy(raw) => true,
        Some(raw) if is_falsy(raw) => false,
        _ => default,
    }
}
