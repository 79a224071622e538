use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for plausible license plate strings as returned by the
    /// recognition endpoint: uppercase alphanumerics, optionally
    /// separated by single spaces or hyphens
    /// - Valid: "MH12AB1234", "KA 05 MJ 1234", "B-1234-XYZ"
    /// - Invalid: "mh12ab1234", "AB--12", " AB12", ""
    pub static ref PLATE_REGEX: Regex =
        Regex::new(r"^[A-Z0-9]+(?:[ -][A-Z0-9]+)*$").unwrap();
}

/// Whether a recognized plate string is worth pre-filling into the
/// report title. Garbage candidates fall through to the generic title.
pub fn is_plausible_plate(text: &str) -> bool {
    let len = text.chars().count();
    (4..=16).contains(&len) && PLATE_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_regex_valid() {
        assert!(PLATE_REGEX.is_match("MH12AB1234"));
        assert!(PLATE_REGEX.is_match("KA 05 MJ 1234"));
        assert!(PLATE_REGEX.is_match("B-1234-XYZ"));
        assert!(PLATE_REGEX.is_match("A1"));
    }

    #[test]
    fn test_plate_regex_invalid() {
        assert!(!PLATE_REGEX.is_match("mh12ab1234")); // lowercase
        assert!(!PLATE_REGEX.is_match("AB--12")); // double separator
        assert!(!PLATE_REGEX.is_match(" AB12")); // leading space
        assert!(!PLATE_REGEX.is_match("AB12 ")); // trailing space
        assert!(!PLATE_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_is_plausible_plate_length_bounds() {
        assert!(is_plausible_plate("MH12AB1234"));
        assert!(!is_plausible_plate("A1")); // too short
        assert!(!is_plausible_plate("A1B2C3D4E5F6G7H8I")); // too long
    }
}
