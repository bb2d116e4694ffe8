//! Invariant checks applied before any write is issued.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A replace-all submission would leave the worker with no links.
    EmptySelection {
        /// Which selection was empty ("trade" or "city").
        kind: &'static str,
    },
    /// Rating outside the 1..=5 star range.
    RatingOutOfRange(i64),
    /// A worker attempted to review themself.
    SelfReview,
    /// The session role is not allowed to author reviews.
    NotASeeker,
    /// The session role does not own a worker profile.
    NotAWorker,
    /// Value too long.
    TooLong { field: &'static str, max: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySelection { kind } => {
                write!(f, "at least one {} must be selected", kind)
            }
            ValidationError::RatingOutOfRange(rating) => {
                write!(f, "rating must be between {} and {}, got {}", MIN_RATING, MAX_RATING, rating)
            }
            ValidationError::SelfReview => write!(f, "workers cannot review themselves"),
            ValidationError::NotASeeker => write!(f, "only seekers can write reviews"),
            ValidationError::NotAWorker => write!(f, "only workers can edit a worker profile"),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Lowest accepted star rating.
pub const MIN_RATING: i64 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: i64 = 5;

/// Maximum allowed length for review comments.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Maximum allowed length for worker descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Validate a star rating.
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange(rating));
    }
    Ok(())
}

/// Validate an optional review comment.
pub fn validate_comment(comment: &str) -> Result<(), ValidationError> {
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "comment",
            max: MAX_COMMENT_LENGTH,
            actual: comment.chars().count(),
        });
    }
    Ok(())
}

/// Validate a worker description.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description",
            max: MAX_DESCRIPTION_LENGTH,
            actual: description.chars().count(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(matches!(
            validate_rating(0),
            Err(ValidationError::RatingOutOfRange(0))
        ));
        assert!(matches!(
            validate_rating(6),
            Err(ValidationError::RatingOutOfRange(6))
        ));
        assert!(matches!(
            validate_rating(-3),
            Err(ValidationError::RatingOutOfRange(-3))
        ));
    }

    #[test]
    fn test_comment_length() {
        assert!(validate_comment("Excelente trabajo").is_ok());
        let long = "x".repeat(MAX_COMMENT_LENGTH + 1);
        assert!(matches!(
            validate_comment(&long),
            Err(ValidationError::TooLong { field: "comment", .. })
        ));
    }

    #[test]
    fn test_description_length() {
        assert!(validate_description("Plomería en general").is_ok());
        let long = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
        assert!(validate_description(&long).is_err());
    }
}
