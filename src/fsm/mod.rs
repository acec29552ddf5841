use ahash::AHashMap;
use std::collections::VecDeque;

use crate::error::KissError;
use crate::kiss::KissDescription;
use crate::{IntMap, IntSet};

pub type State = usize;
pub(crate) type Transitions = AHashMap<String, Transition>;

mod analyze;
mod builder;
pub mod operation;
mod simulate;

pub use operation::minimize::{Partition, Refinement};

/// The destination and output of one table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub output: String,
}

/// Represent a deterministic finite-state machine as an indexed transition table:
/// for every state, the entry reached by each input pattern.
///
/// States are the dense identities assigned while parsing, the alphabet is the
/// sorted set of every input pattern appearing in the description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fsm {
    names: Vec<String>,
    transitions: Vec<Transitions>,
    alphabet: Vec<String>,
    reset_state: State,
    num_inputs: i64,
    num_outputs: i64,
}

impl Fsm {
    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.transitions.len()
    }

    #[inline]
    pub fn states_iter(&self) -> impl Iterator<Item = State> {
        0..self.transitions.len()
    }

    #[inline]
    pub fn get_reset_state(&self) -> State {
        self.reset_state
    }

    #[inline]
    pub fn get_state_name(&self, state: State) -> &str {
        &self.names[state]
    }

    #[inline]
    pub fn get_state(&self, name: &str) -> Option<State> {
        self.names.iter().position(|n| n == name)
    }

    /// The distinct input patterns in lexicographic order.
    #[inline]
    pub fn get_alphabet(&self) -> &[String] {
        &self.alphabet
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
    pub fn get_transition(&self, state: State, input: &str) -> Option<&Transition> {
        self.transitions[state].get(input)
    }

    #[inline]
    pub fn transitions_from_state_iter(
        &self,
        state: State,
    ) -> impl Iterator<Item = (&String, &Transition)> {
        self.transitions[state].iter()
    }

    /// The entries of `state` following the order of the alphabet, skipping missing ones.
    pub fn transitions_from_state_sorted_iter(
        &self,
        state: State,
    ) -> impl Iterator<Item = (&String, &Transition)> {
        self.alphabet
            .iter()
            .filter_map(move |input| self.get_transition(state, input).map(|t| (input, t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_transitions() -> Result<(), String> {
        let fsm = KissDescription::parse(
            ".i 2\n.o 1\n.r A\n.start_kiss\n11 A A 1\n-0 A B 0\n01 A A 0\n.end_kiss\n",
        )
        .unwrap()
        .to_fsm()
        .unwrap();

        let inputs: Vec<_> = fsm
            .transitions_from_state_sorted_iter(0)
            .map(|(input, _)| input.as_str())
            .collect();
        assert_eq!(vec!["-0", "01", "11"], inputs);
        assert_eq!(0, fsm.transitions_from_state_sorted_iter(1).count());
        assert_eq!(3, fsm.transitions_from_state_iter(0).count());
        assert_eq!(Some(1), fsm.get_state("B"));
        Ok(())
    }
}
