//! Email rules shared by the request payloads.

use validator::{ValidateEmail, ValidationError};

/// An address `validator` accepts whose domain also ends in a dot and at
/// least two ASCII letters, e.g. `gmail.com` but not `localhost`.
///
/// Every stored address can therefore be written as an @-mention.
pub fn is_dotted_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((_, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn email_error(message: &'static str) -> ValidationError {
    ValidationError::new("email").with_message(message.into())
}

pub(crate) fn validate_teacher_email(email: &str) -> Result<(), ValidationError> {
    if is_dotted_email(email) {
        return Ok(());
    }
    Err(email_error("Teacher email must be a valid email"))
}

pub(crate) fn validate_student_email(email: &str) -> Result<(), ValidationError> {
    if is_dotted_email(email) {
        return Ok(());
    }
    Err(email_error("Student email must be a valid email"))
}

pub(crate) fn validate_student_emails(emails: &[String]) -> Result<(), ValidationError> {
    if emails.iter().all(|email| is_dotted_email(email)) {
        return Ok(());
    }
    Err(email_error("All student emails must be valid"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        assert!(is_dotted_email("teacherken@gmail.com"));
        assert!(is_dotted_email("first.last+tag@mail-server.example.org"));
    }

    #[test]
    fn test_rejects_domain_without_tld() {
        assert!(!is_dotted_email("teacher@localhost"));
        assert!(!is_dotted_email("s@localhost"));
    }

    #[test]
    fn test_rejects_short_or_numeric_tld() {
        assert!(!is_dotted_email("someone@host.c"));
        assert!(!is_dotted_email("someone@10.0.0.1"));
        assert!(!is_dotted_email("someone@[127.0.0.1]"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_dotted_email("not-an-email"));
        assert!(!is_dotted_email(""));
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = validate_teacher_email("t@localhost").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Teacher email must be a valid email"));

        let err = validate_student_email("s@localhost").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Student email must be a valid email"));

        let err = validate_student_emails(&["ok@school.com".to_string(), "s@localhost".to_string()])
            .unwrap_err();
        assert_eq!(err.message.as_deref(), Some("All student emails must be valid"));
    }
}
