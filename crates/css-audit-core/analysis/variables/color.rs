//! Hex color normalization for custom property values

/// Convert `#rgb` / `#rrggbb` to a space-separated decimal triplet.
///
/// Returns `None` for anything else, including wrong lengths and non-hex
/// digits. Malformed values are not an error; callers keep them as written.
///
/// ```rust
/// use css_audit_core::analysis::variables::hex_to_triplet;
///
/// assert_eq!(hex_to_triplet("#1a2b3c").as_deref(), Some("26 43 60"));
/// assert_eq!(hex_to_triplet("#ggg"), None);
/// ```
#[must_use]
pub fn hex_to_triplet(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |at: usize| u8::from_str_radix(&expanded[at..at + 2], 16).ok();
    Some(format!("{} {} {}", channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_short_and_long_forms() {
        assert_eq!(hex_to_triplet("#fff").as_deref(), Some("255 255 255"));
        assert_eq!(hex_to_triplet("#000000").as_deref(), Some("0 0 0"));
        assert_eq!(hex_to_triplet("#1a2b3c").as_deref(), Some("26 43 60"));
        assert_eq!(hex_to_triplet(" #ABC ").as_deref(), Some("170 187 204"));
    }

    #[test]
    fn malformed_values_are_left_alone() {
        assert_eq!(hex_to_triplet("#ffff"), None);
        assert_eq!(hex_to_triplet("#12345g"), None);
        assert_eq!(hex_to_triplet("fff"), None);
        assert_eq!(hex_to_triplet("#"), None);
        assert_eq!(hex_to_triplet("#fff !important"), None);
        assert_eq!(hex_to_triplet("rgb(0 0 0)"), None);
    }
}
