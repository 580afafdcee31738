//! Phone number formatting utilities.
//!
//! Turkish mobile numbers are displayed as `0 (5XX) XXX XX XX` and sent to
//! the API as bare digits without the leading trunk zero. Formatting is
//! progressive (partial input masks as far as the digits reach) and
//! idempotent, so it can run on every keystroke against its own output.

/// Build the display mask incrementally from the significant digits.
///
pub fn format_for_display(raw: &str) -> String {
    let digits = normalized_digits(raw);
    let mut formatted = String::new();
    for (i, digit) in digits.chars().enumerate() {
        match i {
            1 => formatted.push_str(" ("),
            4 => formatted.push_str(") "),
            7 | 9 => formatted.push(' '),
            _ => {}
        }
        formatted.push(digit);
    }
    formatted
}

/// Return the canonical API representation: digits only, leading trunk
/// zero stripped.
///
pub fn clean_for_api(raw: &str) -> String {
    let digits = normalized_digits(raw);
    match digits.strip_prefix('0') {
        Some(rest) => rest.to_owned(),
        None => digits,
    }
}

/// A number is valid when its normalized digits are exactly 11 and carry
/// the mobile prefix "05".
///
pub fn is_valid(raw: &str) -> bool {
    let digits = normalized_digits(raw);
    digits.len() == 11 && digits.starts_with("05")
}

/// Extract digits and normalize the prefix before masking: a bare "5..."
/// gains the trunk zero, a doubled "00..." collapses to one, and anything
/// past 11 significant digits is dropped.
fn normalized_digits(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.starts_with('5') {
        digits.insert(0, '0');
    }
    while digits.starts_with("00") {
        digits.remove(0);
    }
    digits.truncate(11);
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_number_masks() {
        assert_eq!(format_for_display("05551234567"), "0 (555) 123 45 67");
    }

    #[test]
    fn test_progressive_masking() {
        assert_eq!(format_for_display(""), "");
        assert_eq!(format_for_display("0"), "0");
        assert_eq!(format_for_display("05"), "0 (5");
        assert_eq!(format_for_display("0555"), "0 (555");
        assert_eq!(format_for_display("05551"), "0 (555) 1");
        assert_eq!(format_for_display("0555123"), "0 (555) 123");
        assert_eq!(format_for_display("055512345"), "0 (555) 123 45");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let inputs = [
            "05551234567",
            "5551234567",
            "005551234567",
            "0555123",
            "0 (555) 123 45 67",
            "",
        ];
        for input in inputs {
            let once = format_for_display(input);
            assert_eq!(format_for_display(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_prefix_normalization() {
        // Bare mobile prefix gains the trunk zero
        assert_eq!(format_for_display("5551234567"), "0 (555) 123 45 67");
        // Doubled zero collapses
        assert_eq!(format_for_display("005551234567"), "0 (555) 123 45 67");
    }

    #[test]
    fn test_excess_digits_dropped() {
        assert_eq!(format_for_display("0555123456789"), "0 (555) 123 45 67");
    }

    #[test]
    fn test_clean_for_api_strips_trunk_zero() {
        assert_eq!(clean_for_api("0 (555) 123 45 67"), "5551234567");
        assert_eq!(clean_for_api("05551234567"), "5551234567");
        assert_eq!(clean_for_api("5551234567"), "5551234567");
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("0 (555) 123 45 67"));
        assert!(is_valid("05551234567"));
        assert!(is_valid("5551234567")); // normalized to 05551234567
        assert!(!is_valid("0 (455) 123 45 67")); // not an "05" prefix
        assert!(!is_valid("0555123456")); // too short
        assert!(!is_valid(""));
    }
}
