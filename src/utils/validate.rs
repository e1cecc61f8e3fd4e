//! Client-side form validation.
//!
//! These checks run before dispatch so obviously bad input never reaches
//! the network layer. They deliberately mirror the server's own rules for
//! the fields they cover; anything subtler is the server's call.

/// Minimum password length accepted by the registration form
const MIN_PASSWORD_LENGTH: usize = 8;

/// Check that a string has the shape local@domain.tld with no whitespace.
pub fn validate_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Password strength: length, upper, lower, digit.
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();

    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number".to_string());
    }

    PasswordCheck {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Required-field check; returns the per-field error message, if any.
pub fn validate_required(value: &str, field_name: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} is required", field_name))
    } else {
        None
    }
}

/// URL shape check. Empty is valid - URL fields are optional.
pub fn validate_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    match url.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
        }
        None => false,
    }
}

pub fn validate_min_length(value: &str, min_length: usize, field_name: &str) -> Option<String> {
    if value.chars().count() < min_length {
        Some(format!(
            "{} must be at least {} characters",
            field_name, min_length
        ))
    } else {
        None
    }
}

pub fn validate_max_length(value: &str, max_length: usize, field_name: &str) -> Option<String> {
    if value.chars().count() > max_length {
        Some(format!(
            "{} must be less than {} characters",
            field_name, max_length
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@example.com"));
        assert!(validate_email("a.b+c@sub.example.co"));

        assert!(!validate_email(""));
        assert!(!validate_email("admin"));
        assert!(!validate_email("admin@example")); // no TLD
        assert!(!validate_email("@example.com")); // empty local part
        assert!(!validate_email("a b@example.com")); // whitespace
        assert!(!validate_email("a@b@example.com")); // two @
        assert!(!validate_email("admin@.com")); // empty host
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Secret123").is_valid);

        let check = validate_password("short");
        assert!(!check.is_valid);
        // Too short, no uppercase, no digit
        assert_eq!(check.errors.len(), 3);

        assert!(!validate_password("alllowercase1").is_valid);
        assert!(!validate_password("ALLUPPERCASE1").is_valid);
        assert!(!validate_password("NoDigitsHere").is_valid);
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("value", "Title").is_none());
        assert_eq!(
            validate_required("   ", "Title").as_deref(),
            Some("Title is required")
        );
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("")); // optional
        assert!(validate_url("https://example.com"));
        assert!(validate_url("http://localhost:5000/api"));
        assert!(!validate_url("example.com"));
        assert!(!validate_url("://example.com"));
    }

    #[test]
    fn test_length_bounds() {
        assert!(validate_min_length("abcd", 3, "Name").is_none());
        assert!(validate_min_length("ab", 3, "Name").is_some());
        assert!(validate_max_length("abcd", 10, "Name").is_none());
        assert!(validate_max_length("abcdefghijk", 10, "Name").is_some());
    }
}
