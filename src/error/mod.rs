use std::fmt::{self};

use crate::kiss::Directive;

#[derive(Debug, PartialEq, Eq)]
pub enum KissError {
    MissingDirective(Directive),
    IncompleteTransition { state: String, input: String },
    TooManyStates(usize, usize),
}

impl fmt::Display for KissError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KissError::MissingDirective(directive) => write!(f, "Invalid or missing {directive} directive in KISS description."),
            KissError::IncompleteTransition { state, input } => write!(f, "The state '{state}' has no transition for the input '{input}'."),
            KissError::TooManyStates(max, got) => write!(f, "The machine has too many states, the maximum allowed is {max} and it has {got}."),
        }
    }
}

impl std::error::Error for KissError {}

impl KissError {
    /// Determine if the error is caused by the content of the KISS description.
    /// An input error should be reported to the user together with the offending file.
    pub fn is_input_error(&self) -> bool {
        match self {
            KissError::MissingDirective(_) => true,
            KissError::IncompleteTransition { .. } => true,
            KissError::TooManyStates(_, _) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() -> Result<(), String> {
        assert_eq!(
            "Invalid or missing .r directive in KISS description.",
            KissError::MissingDirective(Directive::Reset).to_string()
        );
        assert_eq!(
            "The state 'S1' has no transition for the input '1-'.",
            KissError::IncompleteTransition {
                state: "S1".to_string(),
                input: "1-".to_string()
            }
            .to_string()
        );
        assert!(KissError::TooManyStates(2, 3).is_input_error());
        Ok(())
    }
}
