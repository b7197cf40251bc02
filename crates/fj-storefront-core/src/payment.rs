//! Payment-input sanitizers, applied on every keystroke.
//!
//! These reshape what the user typed; they do not validate it. A card
//! number is never Luhn-checked and an expiry is never range-checked.

/// Strip non-digits and regroup into blocks of four.
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip non-digits and reshape into `MM/YY`, keeping at most four digits.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Strip non-digits and truncate to three.
pub fn sanitize_cvv(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_groups_by_four() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4242 42x4-24"), "4242 424");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn expiry_inserts_the_slash_after_two_digits() {
        assert_eq!(format_expiry("1226"), "12/26");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("12/26 extra"), "12/26");
    }

    #[test]
    fn cvv_keeps_at_most_three_digits() {
        assert_eq!(sanitize_cvv("12a34"), "123");
        assert_eq!(sanitize_cvv("9"), "9");
        assert_eq!(sanitize_cvv("abc"), "");
    }
}
