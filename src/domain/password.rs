use validator::ValidationError;
use zxcvbn::{zxcvbn, Score};

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH: Score = Score::Three;

/// Context-aware password strength validation
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < MIN_LENGTH {
        let mut error = ValidationError::new("password_length");
        error.message = Some(format!("Must be at least {} characters", MIN_LENGTH).into());
        return Err(error);
    }

    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| "!@#$%^&*".contains(c));

    if !(has_upper && has_digit && has_symbol) {
        let mut error = ValidationError::new("password_complexity");
        error.message = Some("Must include uppercase, number, and symbol".into());
        return Err(error);
    }

    let estimate = zxcvbn(password, &[]);

    if estimate.score() < MIN_STRENGTH {
        let feedback = estimate.feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too weak".to_string());

        let mut error = ValidationError::new("password_strength");
        error.message = Some(feedback.into());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_rejected() {
        assert!(validate_password_strength("Ab1!").is_err());
    }

    #[test]
    fn missing_symbol_rejected() {
        assert!(validate_password_strength("Abcdefg123").is_err());
    }

    #[test]
    fn common_password_rejected_by_strength_estimate() {
        assert!(validate_password_strength("Password1!").is_err());
    }

    #[test]
    fn strong_password_accepted() {
        assert!(validate_password_strength("k9#Vt!qz2Lmw").is_ok());
    }
}
