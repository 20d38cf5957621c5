use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@([\w-]+\.)+[\w-]{2,4}$").unwrap());

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn message_for(errors: &[FieldError], field: Field) -> Option<&'static str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}

pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = vec![];

    if email.trim().is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new(Field::Email, "Invalid email address"));
    }

    if password.trim().is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required"));
    }

    errors
}

pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<FieldError> {
    let mut errors = vec![];

    if username.trim().is_empty() {
        errors.push(FieldError::new(Field::Username, "Username is required"));
    }

    if email.trim().is_empty() {
        errors.push(FieldError::new(Field::Email, "Email is required"));
    } else if !EMAIL_RE.is_match(email) {
        errors.push(FieldError::new(Field::Email, "Invalid email address"));
    }

    if password.is_empty() {
        errors.push(FieldError::new(Field::Password, "Password is required"));
    } else if password.len() < 8 {
        errors.push(FieldError::new(
            Field::Password,
            "Password must be at least 8 characters",
        ));
    } else if !is_strong_password(password) {
        errors.push(FieldError::new(
            Field::Password,
            "Password must include upper and lower case letters, a number and a special character",
        ));
    }

    if password != confirm_password {
        errors.push(FieldError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }

    errors
}

fn is_strong_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_login_requires_email_and_password() {
        let errors = validate_login("", "");

        assert_eq!(message_for(&errors, Field::Email), Some("Email is required"));
        assert_eq!(
            message_for(&errors, Field::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn test_login_rejects_malformed_email() {
        assert_eq!(
            message_for(&validate_login("not-an-email", "hunter2"), Field::Email),
            Some("Invalid email address")
        );
        assert_eq!(
            message_for(&validate_login("a@b", "hunter2"), Field::Email),
            Some("Invalid email address")
        );
        assert!(validate_login("peter@daily-bugle.com", "hunter2").is_empty());
    }

    #[test]
    fn test_register_password_strength() {
        let check = |password: &str| {
            message_for(
                &validate_register("gwen", "gwen@example.com", password, password),
                Field::Password,
            )
        };

        assert_eq!(check(""), Some("Password is required"));
        assert_eq!(check("Ab1!"), Some("Password must be at least 8 characters"));
        assert_eq!(
            check("alllowercase1!"),
            Some("Password must include upper and lower case letters, a number and a special character")
        );
        assert_eq!(
            check("NoDigits!"),
            Some("Password must include upper and lower case letters, a number and a special character")
        );
        assert_eq!(
            check("NoSpecial1"),
            Some("Password must include upper and lower case letters, a number and a special character")
        );
        assert_eq!(check("Str0ng,pass"), None);
    }

    #[test]
    fn test_register_confirmation_must_match() {
        let errors = validate_register("gwen", "gwen@example.com", "Str0ng,pass", "Str0ng,pas");

        assert_eq!(
            message_for(&errors, Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_register_accepts_valid_input() {
        assert!(validate_register("gwen", "gwen@example.com", "Str0ng,pass", "Str0ng,pass").is_empty());
    }
}
