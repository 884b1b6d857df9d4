use thiserror::Error;

/// Why a notation was rejected. Variants carrying a `String` hold the
/// offending term.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("dice notation is empty")]
    Empty,
    #[error("invalid dice notation: {0:?}")]
    InvalidNotation(String),
    #[error("invalid dice count in {0:?}: must be between 1 and 100")]
    InvalidCount(String),
    #[error("invalid die size in {0:?}: must be between 2 and 100")]
    InvalidSides(String),
    #[error("invalid keep count in {0:?}: must be between 1 and the number of dice")]
    InvalidKeep(String),
    #[error("dice notation contains no dice and no modifier")]
    NoExpressions,
}

impl ParseError {
    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InvalidNotation(_) => "invalid_notation",
            Self::InvalidCount(_) => "invalid_count",
            Self::InvalidSides(_) => "invalid_sides",
            Self::InvalidKeep(_) => "invalid_keep",
            Self::NoExpressions => "no_expressions",
        }
    }

    /// The term that caused the failure, if the failure is tied to one.
    pub fn term(&self) -> Option<&str> {
        match self {
            Self::InvalidNotation(t)
            | Self::InvalidCount(t)
            | Self::InvalidSides(t)
            | Self::InvalidKeep(t) => Some(t),
            Self::Empty | Self::NoExpressions => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ParseError::InvalidSides("1d1".into()).to_string(),
            "invalid die size in \"1d1\": must be between 2 and 100"
        );
        assert_eq!(ParseError::Empty.to_string(), "dice notation is empty");
    }

    #[test]
    fn test_codes() {
        assert_eq!(ParseError::InvalidKeep("4d6kh5".into()).code(), "invalid_keep");
        assert_eq!(ParseError::NoExpressions.code(), "no_expressions");
        assert_eq!(ParseError::InvalidCount("0d6".into()).term(), Some("0d6"));
        assert_eq!(ParseError::Empty.term(), None);
    }
}
