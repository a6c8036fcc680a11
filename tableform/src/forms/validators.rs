//! Field validators
//!
//! Validators run in declaration order after a field's own checks. A
//! [`Validator::DataRequired`] failure replaces any earlier errors and stops
//! the chain.

use serde::{Deserialize, Serialize};
use validator::ValidateLength;

use crate::value::FieldValue;

/// Message used when a required field has no data
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A validation rule attached to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Data must be present and truthy
    DataRequired {
        /// Custom failure message
        message: Option<String>,
    },
    /// Text length must lie within bounds (in characters)
    Length {
        /// Minimum length
        min: Option<usize>,
        /// Maximum length
        max: Option<usize>,
        /// Custom failure message
        message: Option<String>,
    },
}

/// Outcome of a failed validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    /// Record the error and continue with the next validator
    Continue(String),
    /// Replace earlier errors with this one and stop the chain
    Stop(String),
}

impl Validator {
    /// Require data to be present
    #[must_use]
    pub const fn data_required() -> Self {
        Self::DataRequired { message: None }
    }

    /// Bound text length
    #[must_use]
    pub const fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::Length {
            min,
            max,
            message: None,
        }
    }

    /// Limit text to at most `max` characters
    #[must_use]
    pub const fn max_length(max: usize) -> Self {
        Self::length(None, Some(max))
    }

    /// Replace the failure message
    #[must_use]
    pub fn with_message(self, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match self {
            Self::DataRequired { .. } => Self::DataRequired { message: text },
            Self::Length { min, max, .. } => Self::Length {
                min,
                max,
                message: text,
            },
        }
    }

    /// Short validator name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DataRequired { .. } => "data_required",
            Self::Length { .. } => "length",
        }
    }

    /// Check if this is a required-data validator
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::DataRequired { .. })
    }

    pub(crate) fn check(&self, data: &FieldValue) -> Result<(), Failure> {
        match self {
            Self::DataRequired { message } => {
                if data.is_truthy() {
                    Ok(())
                } else {
                    Err(Failure::Stop(
                        message.clone().unwrap_or_else(|| REQUIRED_MESSAGE.to_string()),
                    ))
                }
            }
            Self::Length { min, max, message } => {
                let text = data.as_str().unwrap_or_default().to_string();
                let within = text.validate_length(
                    min.map(|m| m as u64),
                    max.map(|m| m as u64),
                    None,
                );
                if within {
                    Ok(())
                } else {
                    Err(Failure::Continue(
                        message
                            .clone()
                            .unwrap_or_else(|| length_message(*min, *max)),
                    ))
                }
            }
        }
    }
}

impl std::fmt::Display for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataRequired { .. } => f.write_str("required"),
            Self::Length { min, max, .. } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "length({min}..={max})"),
                (Some(min), None) => write!(f, "length(>={min})"),
                (None, Some(max)) => write!(f, "length(<={max})"),
                (None, None) => f.write_str("length"),
            },
        }
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

fn length_message(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (None, Some(max)) => format!("Field cannot be longer than {max} {}.", plural(max)),
        (Some(min), None) => format!("Field must be at least {min} {} long.", plural(min)),
        (Some(min), Some(max)) => {
            format!("Field must be between {min} and {max} characters long.")
        }
        (None, None) => "Invalid field length.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_required() {
        let validator = Validator::data_required();
        assert!(validator.check(&FieldValue::from("x")).is_ok());
        assert_eq!(
            validator.check(&FieldValue::from("")),
            Err(Failure::Stop(REQUIRED_MESSAGE.to_string()))
        );
        assert!(validator.check(&FieldValue::Null).is_err());
    }

    #[test]
    fn test_data_required_custom_message() {
        let validator = Validator::data_required().with_message("Title please");
        assert_eq!(
            validator.check(&FieldValue::Null),
            Err(Failure::Stop("Title please".to_string()))
        );
    }

    #[test]
    fn test_max_length() {
        let validator = Validator::max_length(5);
        assert!(validator.check(&FieldValue::from("12345")).is_ok());
        assert!(validator.check(&FieldValue::Null).is_ok());
        assert_eq!(
            validator.check(&FieldValue::from("123456")),
            Err(Failure::Continue(
                "Field cannot be longer than 5 characters.".to_string()
            ))
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let validator = Validator::max_length(3);
        assert!(validator.check(&FieldValue::from("äöü")).is_ok());
    }

    #[test]
    fn test_min_and_range_messages() {
        assert_eq!(
            Validator::length(Some(1), None).check(&FieldValue::from("")),
            Err(Failure::Continue(
                "Field must be at least 1 character long.".to_string()
            ))
        );
        assert_eq!(
            Validator::length(Some(2), Some(4)).check(&FieldValue::from("abcde")),
            Err(Failure::Continue(
                "Field must be between 2 and 4 characters long.".to_string()
            ))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Validator::data_required().to_string(), "required");
        assert_eq!(Validator::max_length(255).to_string(), "length(<=255)");
    }
}
