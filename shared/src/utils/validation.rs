//! Input sanitization and field validation helpers

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static USER_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{4,32}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").unwrap());

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Strip markup tags and control characters, then trim surrounding whitespace
pub fn sanitize_input(input: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(input, "");
    without_tags
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// 4 to 32 characters drawn from letters, digits and underscore
pub fn is_valid_user_id(user_id: &str) -> bool {
    USER_ID_REGEX.is_match(user_id)
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// E.164: a leading `+` followed by 8 to 15 digits, no leading zero
pub fn is_valid_phone_number(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= 64
}

pub fn is_valid_password(password: &str) -> bool {
    !password.trim().is_empty() && password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags_and_controls() {
        assert_eq!(sanitize_input("  <b>alice</b>\u{0007} "), "alice");
        assert_eq!(sanitize_input("<script>x</script>"), "x");
        assert_eq!(sanitize_input("plain"), "plain");
    }

    #[test]
    fn test_user_id_rules() {
        assert!(is_valid_user_id("alice_01"));
        assert!(!is_valid_user_id("abc"));
        assert!(!is_valid_user_id("has space"));
        assert!(!is_valid_user_id(&"a".repeat(33)));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("alice@example.com"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice example.com"));
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone_number("+8613800138000"));
        assert!(is_valid_phone_number("+14155552671"));
        assert!(!is_valid_phone_number("13800138000"));
        assert!(!is_valid_phone_number("+0123456789"));
        assert!(!is_valid_phone_number("+123"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_valid_password("hunter22"));
        assert!(!is_valid_password("short"));
        assert!(!is_valid_password("        "));
    }
}
