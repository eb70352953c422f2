//! Password strength policy.
//!
//! A password is accepted when it is at least [`MIN_PASSWORD_LENGTH`]
//! characters long and contains at least one character from each of four
//! classes: ASCII uppercase, ASCII lowercase, ASCII digit, and anything else
//! ("special"). Every rule must hold; failing any one rejects the password.

use core::fmt;

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single password policy rule that was not satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordViolation {
    /// Fewer than [`MIN_PASSWORD_LENGTH`] characters.
    TooShort,
    /// No ASCII uppercase letter.
    MissingUppercase,
    /// No ASCII lowercase letter.
    MissingLowercase,
    /// No ASCII digit.
    MissingDigit,
    /// No character outside the three classes above.
    MissingSpecial,
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(
                f,
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            ),
            Self::MissingUppercase => {
                write!(f, "password must contain at least one uppercase letter")
            }
            Self::MissingLowercase => {
                write!(f, "password must contain at least one lowercase letter")
            }
            Self::MissingDigit => write!(f, "password must contain at least one digit"),
            Self::MissingSpecial => {
                write!(f, "password must contain at least one special character")
            }
        }
    }
}

/// Collect every policy rule the password violates, in a stable order.
///
/// An empty result means the password is acceptable.
///
/// # Examples
///
/// ```
/// use confectionery_core::{PasswordViolation, password_violations};
///
/// assert!(password_violations("Passw0rd!").is_empty());
/// assert_eq!(
///     password_violations("PASSWORD1"),
///     vec![PasswordViolation::MissingLowercase, PasswordViolation::MissingSpecial],
/// );
/// ```
#[must_use]
pub fn password_violations(password: &str) -> Vec<PasswordViolation> {
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        if c.is_ascii_uppercase() {
            has_upper = true;
        } else if c.is_ascii_lowercase() {
            has_lower = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else {
            has_special = true;
        }
    }

    [
        (password.chars().count() < MIN_PASSWORD_LENGTH, PasswordViolation::TooShort),
        (!has_upper, PasswordViolation::MissingUppercase),
        (!has_lower, PasswordViolation::MissingLowercase),
        (!has_digit, PasswordViolation::MissingDigit),
        (!has_special, PasswordViolation::MissingSpecial),
    ]
    .into_iter()
    .filter_map(|(violated, rule)| violated.then_some(rule))
    .collect()
}

/// Returns `true` when the password satisfies every policy rule.
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password_violations(password).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(is_valid_password("Passw0rd!"));
        assert!(is_valid_password("xY9#long enough"));
    }

    #[test]
    fn test_all_lowercase() {
        assert!(!is_valid_password("password"));
        assert_eq!(
            password_violations("password"),
            vec![
                PasswordViolation::MissingUppercase,
                PasswordViolation::MissingDigit,
                PasswordViolation::MissingSpecial,
            ]
        );
    }

    #[test]
    fn test_uppercase_and_digit_only() {
        assert!(!is_valid_password("PASSWORD1"));
        assert_eq!(
            password_violations("PASSWORD1"),
            vec![
                PasswordViolation::MissingLowercase,
                PasswordViolation::MissingSpecial,
            ]
        );
    }

    #[test]
    fn test_seven_chars_with_every_class() {
        let pw = "Pa0!xyz";
        assert_eq!(pw.chars().count(), 7);
        assert!(!is_valid_password(pw));
        assert_eq!(password_violations(pw), vec![PasswordViolation::TooShort]);
    }

    #[test]
    fn test_exactly_min_length() {
        assert!(is_valid_password("Pa0!wxyz"));
    }

    #[test]
    fn test_empty_violates_everything() {
        assert_eq!(password_violations("").len(), 5);
    }

    #[test]
    fn test_non_ascii_counts_as_special() {
        assert!(is_valid_password("Bolo1açúcar"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 7 characters, 10 bytes
        let pw = "Aé1ççxz";
        assert!(pw.len() >= MIN_PASSWORD_LENGTH);
        assert!(password_violations(pw).contains(&PasswordViolation::TooShort));
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            PasswordViolation::TooShort.to_string(),
            "password must be at least 8 characters"
        );
        assert_eq!(
            PasswordViolation::MissingSpecial.to_string(),
            "password must contain at least one special character"
        );
    }
}
