use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::KissError;
use crate::fsm::{Fsm, State};

pub use registry::StateRegistry;

mod parser;
mod registry;
pub(crate) mod serializer;

/// The directives of the KISS2 format understood by the parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Directive {
    StartKiss,
    EndKiss,
    Inputs,
    Outputs,
    Products,
    States,
    Reset,
}

impl Directive {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ".start_kiss" => Some(Directive::StartKiss),
            ".end_kiss" => Some(Directive::EndKiss),
            ".i" => Some(Directive::Inputs),
            ".o" => Some(Directive::Outputs),
            ".p" => Some(Directive::Products),
            ".s" => Some(Directive::States),
            ".r" => Some(Directive::Reset),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Directive::StartKiss => ".start_kiss",
            Directive::EndKiss => ".end_kiss",
            Directive::Inputs => ".i",
            Directive::Outputs => ".o",
            Directive::Products => ".p",
            Directive::States => ".s",
            Directive::Reset => ".r",
        }
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// One data line of a KISS description: `input present next output`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawTransition {
    pub input: String,
    pub present: String,
    pub next: String,
    pub output: String,
}

impl RawTransition {
    pub fn new(input: &str, present: &str, next: &str, output: &str) -> Self {
        RawTransition {
            input: input.to_string(),
            present: present.to_string(),
            next: next.to_string(),
            output: output.to_string(),
        }
    }

    /// The `input/output` label used on graph edges.
    pub fn label(&self) -> String {
        format!("{}/{}", self.input, self.output)
    }
}

impl Display for RawTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.input, self.present, self.next, self.output
        )
    }
}

/// A parsed KISS description: the declared header values, the states in order of
/// first occurrence and the data lines in file order.
///
/// The declared `.p` and `.s` values are advisory and never checked against the content.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KissDescription {
    num_inputs: Option<i64>,
    num_outputs: Option<i64>,
    num_products: Option<i64>,
    num_states: Option<i64>,
    reset_state: String,
    registry: StateRegistry,
    transitions: Vec<RawTransition>,
}

impl KissDescription {
    /// Build a description from already split data lines, registering the states
    /// the same way the parser does: reset state first, then present and next
    /// state of every transition.
    pub fn new(
        num_inputs: i64,
        num_outputs: i64,
        reset_state: &str,
        transitions: Vec<RawTransition>,
    ) -> Self {
        let mut registry = StateRegistry::default();
        if !reset_state.is_empty() {
            registry.register(reset_state);
        }
        for transition in &transitions {
            registry.register(&transition.present);
            registry.register(&transition.next);
        }
        KissDescription {
            num_inputs: Some(num_inputs),
            num_outputs: Some(num_outputs),
            num_products: Some(transitions.len() as i64),
            num_states: Some(registry.len() as i64),
            reset_state: reset_state.to_string(),
            registry,
            transitions,
        }
    }

    #[inline]
    pub fn get_num_inputs(&self) -> Option<i64> {
        self.num_inputs
    }

    #[inline]
    pub fn get_num_outputs(&self) -> Option<i64> {
        self.num_outputs
    }

    #[inline]
    pub fn get_num_products(&self) -> Option<i64> {
        self.num_products
    }

    #[inline]
    pub fn get_num_states(&self) -> Option<i64> {
        self.num_states
    }

    /// The name given by `.r`, empty when the directive is absent.
    #[inline]
    pub fn get_reset_state(&self) -> &str {
        &self.reset_state
    }

    #[inline]
    pub fn get_registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// The state names in order of first occurrence.
    #[inline]
    pub fn get_state_names(&self) -> &[String] {
        self.registry.names()
    }

    #[inline]
    pub fn get_transitions(&self) -> &[RawTransition] {
        &self.transitions
    }

    #[inline]
    pub fn get_state(&self, name: &str) -> Option<State> {
        self.registry.get(name)
    }

    /// Check that `.i` and `.o` are positive and that a reset state is named.
    pub fn validate(&self) -> Result<(), KissError> {
        if !matches!(self.num_inputs, Some(n) if n > 0) {
            return Err(KissError::MissingDirective(Directive::Inputs));
        }
        if !matches!(self.num_outputs, Some(n) if n > 0) {
            return Err(KissError::MissingDirective(Directive::Outputs));
        }
        if self.reset_state.is_empty() {
            return Err(KissError::MissingDirective(Directive::Reset));
        }
        Ok(())
    }

    /// Build the transition table of the described machine.
    pub fn to_fsm(&self) -> Result<Fsm, KissError> {
        Fsm::from_description(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_like_parser() -> Result<(), String> {
        let description = KissDescription::new(
            1,
            1,
            "B",
            vec![
                RawTransition::new("0", "A", "C", "1"),
                RawTransition::new("1", "B", "A", "0"),
            ],
        );
        assert_eq!(&["B", "A", "C"], description.get_state_names());
        assert_eq!(Some(2), description.get_num_products());
        assert_eq!(Some(3), description.get_num_states());
        assert!(description.validate().is_ok());
        Ok(())
    }

    #[test]
    fn test_validate() -> Result<(), String> {
        assert_validate(".o 1\n.r A\n", Some(Directive::Inputs));
        assert_validate(".i 0\n.o 1\n.r A\n", Some(Directive::Inputs));
        assert_validate(".i 2\n.o -1\n.r A\n", Some(Directive::Outputs));
        assert_validate(".i 2\n.o 1\n", Some(Directive::Reset));
        assert_validate(".i 2\n.o 1\n.r\n", Some(Directive::Reset));
        assert_validate(".i 2\n.o 1\n.r A\n", None);
        Ok(())
    }

    fn assert_validate(text: &str, expected: Option<Directive>) {
        let description = KissDescription::parse_unchecked(text);
        match expected {
            Some(directive) => assert_eq!(
                Err(KissError::MissingDirective(directive)),
                description.validate()
            ),
            None => assert_eq!(Ok(()), description.validate()),
        }
    }
}
