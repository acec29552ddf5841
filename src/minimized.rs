use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::KissError;
use crate::fsm::{Fsm, State};
use crate::kiss::serializer::{write_kiss, KissHeader};
use crate::kiss::{KissDescription, RawTransition};

/// A surviving state of the minimized machine: its position in the output,
/// the original state standing for its block and the name it is written with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanonicalState {
    pub index: usize,
    pub representative: State,
    pub name: String,
}

/// The minimal machine: one state per block holding a reachable state,
/// written with its `.p` and `.s` recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MinimizedMachine {
    num_inputs: i64,
    num_outputs: i64,
    reset_state: String,
    states: Vec<CanonicalState>,
    transitions: Vec<RawTransition>,
    original_number_of_states: usize,
    iterations: usize,
}

impl Display for MinimizedMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_kiss(
            f,
            &KissHeader {
                num_inputs: Some(self.num_inputs),
                num_outputs: Some(self.num_outputs),
                num_products: Some(self.transitions.len() as i64),
                num_states: Some(self.states.len() as i64),
                reset_state: &self.reset_state,
            },
            &self.transitions,
        )
    }
}

impl MinimizedMachine {
    pub(crate) fn new(
        num_inputs: i64,
        num_outputs: i64,
        reset_state: String,
        states: Vec<CanonicalState>,
        transitions: Vec<RawTransition>,
        original_number_of_states: usize,
        iterations: usize,
    ) -> Self {
        MinimizedMachine {
            num_inputs,
            num_outputs,
            reset_state,
            states,
            transitions,
            original_number_of_states,
            iterations,
        }
    }

    #[inline]
    pub fn get_num_inputs(&self) -> i64 {
        self.num_inputs
    }

    #[inline]
    pub fn get_num_outputs(&self) -> i64 {
        self.num_outputs
    }

    #[inline]
    pub fn get_reset_state(&self) -> &str {
        &self.reset_state
    }

    /// The surviving states in output order.
    #[inline]
    pub fn get_states(&self) -> &[CanonicalState] {
        &self.states
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn get_transitions(&self) -> &[RawTransition] {
        &self.transitions
    }

    /// Number of states of the machine before minimization, unreachable ones included.
    #[inline]
    pub fn get_original_number_of_states(&self) -> usize {
        self.original_number_of_states
    }

    #[inline]
    pub fn get_iterations(&self) -> usize {
        self.iterations
    }

    /// The data lines only, one per transition.
    pub fn transitions_to_string(&self) -> String {
        let mut sb = String::new();
        for transition in &self.transitions {
            sb.push_str(&transition.to_string());
            sb.push('\n');
        }
        sb
    }

    pub fn to_description(&self) -> KissDescription {
        KissDescription::new(
            self.num_inputs,
            self.num_outputs,
            &self.reset_state,
            self.transitions.clone(),
        )
    }

    pub fn to_fsm(&self) -> Result<Fsm, KissError> {
        self.to_description().to_fsm()
    }
}
