use log::warn;

use crate::kiss::RawTransition;
use crate::minimized::{CanonicalState, MinimizedMachine};

use super::minimize::Refinement;
use super::*;

impl Fsm {
    /// Keep the blocks holding a reachable state, name each one after its first
    /// reachable member and rebuild the transitions between them.
    pub(crate) fn select(
        &self,
        refinement: &Refinement,
        reachable: &IntSet<State>,
    ) -> MinimizedMachine {
        let partition = refinement.get_partition();

        let mut representatives: Vec<Option<State>> =
            vec![None; partition.get_number_of_blocks()];
        for state in self.states_iter().filter(|s| reachable.contains(s)) {
            let block = partition.block_of(state);
            if representatives[block].is_none() {
                representatives[block] = Some(state);
            }
        }

        let mut block_to_new_index: IntMap<usize, usize> = IntMap::default();
        let mut states = Vec::with_capacity(representatives.len());
        for (block, representative) in representatives.iter().enumerate() {
            if let Some(representative) = representative {
                block_to_new_index.insert(block, states.len());
                states.push(CanonicalState {
                    index: states.len(),
                    representative: *representative,
                    name: self.get_state_name(*representative).to_string(),
                });
            }
        }

        let mut transitions = Vec::with_capacity(states.len() * self.alphabet.len());
        for state in &states {
            for (input, transition) in self.transitions_from_state_sorted_iter(state.representative)
            {
                let Some(next) = block_to_new_index.get(&partition.block_of(transition.next))
                else {
                    warn!(
                        "Dropping transition '{} {} {} {}', its destination has no reachable representative.",
                        input,
                        state.name,
                        self.get_state_name(transition.next),
                        transition.output
                    );
                    continue;
                };
                transitions.push(RawTransition {
                    input: input.clone(),
                    present: state.name.clone(),
                    next: states[*next].name.clone(),
                    output: transition.output.clone(),
                });
            }
        }

        // the reset state is reachable, its block always has a representative
        let reset_state = block_to_new_index
            .get(&partition.block_of(self.reset_state))
            .map(|index| states[*index].name.clone())
            .unwrap_or_default();

        MinimizedMachine::new(
            self.num_inputs,
            self.num_outputs,
            reset_state,
            states,
            transitions,
            self.get_number_of_states(),
            refinement.iterations(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::kiss::KissDescription;

    #[test]
    fn test_select_representatives() -> Result<(), String> {
        // Z behaves like A and B but is never reached, it comes first in identity order
        let minimized = KissDescription::parse(
            ".i 1\n.o 1\n.start_kiss\n0 Z C 1\n1 Z C 0\n.r R\n0 R A 0\n1 R B 0\n0 A C 1\n1 A C 0\n0 B C 1\n1 B C 0\n0 C R 0\n1 C R 1\n.end_kiss\n",
        )
        .unwrap()
        .to_fsm()
        .unwrap()
        .minimize()
        .unwrap();

        let states: Vec<_> = minimized
            .get_states()
            .iter()
            .map(|s| (s.index, s.representative, s.name.as_str()))
            .collect();
        assert_eq!(vec![(0, 3, "A"), (1, 1, "C"), (2, 2, "R")], states);
        assert_eq!("R", minimized.get_reset_state());
        assert_eq!(
            "0 A C 1\n1 A C 0\n0 C R 0\n1 C R 1\n0 R A 0\n1 R A 0\n",
            minimized.transitions_to_string()
        );
        Ok(())
    }

    #[test]
    fn test_select_single_state() -> Result<(), String> {
        let minimized = KissDescription::parse(".i 1\n.o 1\n.r S0\n.start_kiss\n0 S0 S0 1\n.end_kiss\n")
            .unwrap()
            .to_fsm()
            .unwrap()
            .minimize()
            .unwrap();

        assert_eq!(1, minimized.get_number_of_states());
        assert_eq!("S0", minimized.get_reset_state());
        assert_eq!("0 S0 S0 1\n", minimized.transitions_to_string());
        Ok(())
    }
}
