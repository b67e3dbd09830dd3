use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a frequency input was rejected before anything ran
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a frequency value.")]
    Empty,

    #[error("Invalid frequency value. Enter a positive integer (e.g., 3500).")]
    NotAnInteger(String),

    #[error("Invalid frequency value. Enter a positive integer (e.g., 3500).")]
    NotPositive(i32),
}

/// A validated maximum CPU frequency in MHz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyRequest(u32);

impl FrequencyRequest {
    /// Parse operator input: surrounding whitespace is ignored, the rest must
    /// be a base-10 integer that fits in an `i32` and is greater than zero.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let value: i32 = trimmed
            .parse()
            .map_err(|_| ValidationError::NotAnInteger(trimmed.to_string()))?;

        if value <= 0 {
            return Err(ValidationError::NotPositive(value));
        }

        Ok(Self(value as u32))
    }

    pub fn mhz(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FrequencyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}MHz", self.0)
    }
}
