use ahash::HashMapExt;
use log::{debug, warn};

use crate::execution_profile::ThreadLocalParams;
use crate::minimized::MinimizedMachine;

use super::*;

/// Map every state to the id of its block.
///
/// Block ids are dense and numbered in order of first appearance when the states
/// are scanned by increasing identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    blocks: Vec<usize>,
    number_of_blocks: usize,
}

impl Partition {
    /// The partition putting all `number_of_states` states in block 0.
    pub fn new_single_block(number_of_states: usize) -> Self {
        Partition {
            blocks: vec![0; number_of_states],
            number_of_blocks: usize::from(number_of_states > 0),
        }
    }

    #[inline]
    pub fn block_of(&self, state: State) -> usize {
        self.blocks[state]
    }

    #[inline]
    pub fn get_number_of_blocks(&self) -> usize {
        self.number_of_blocks
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.blocks.len()
    }

    /// The states of block `block`, by increasing identity.
    pub fn block_elements(&self, block: usize) -> impl Iterator<Item = State> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(move |(_, b)| **b == block)
            .map(|(state, _)| state)
    }
}

/// The behaviour of a state for one refinement step, one slot per alphabet entry:
/// the output and the destination block under the previous partition, or `None`
/// when the state has no entry for that input pattern.
type Signature<'a> = Vec<Option<(&'a str, usize)>>;

/// The outcome of the partition refinement: the stable partition and the number
/// of blocks after each step, starting with the initial single block partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refinement {
    partition: Partition,
    block_counts: Vec<usize>,
}

impl Refinement {
    #[inline]
    pub fn get_partition(&self) -> &Partition {
        &self.partition
    }

    #[inline]
    pub fn block_counts(&self) -> &[usize] {
        &self.block_counts
    }

    /// Number of refinement steps run, the last one being the step that changed nothing.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.block_counts.len() - 1
    }
}

impl Fsm {
    /// Compute the minimal machine equivalent to `self` from its reset state.
    ///
    /// # Example:
    ///
    /// ```
    /// use kissmin::kiss::KissDescription;
    ///
    /// let fsm = KissDescription::parse(
    ///     ".i 1\n.o 1\n.r A\n.start_kiss\n0 A B 0\n1 A A 1\n0 B A 0\n1 B B 1\n.end_kiss\n",
    /// )
    /// .unwrap()
    /// .to_fsm()
    /// .unwrap();
    ///
    /// let minimized = fsm.minimize().unwrap();
    ///
    /// assert_eq!(1, minimized.get_number_of_states());
    /// assert_eq!("0 A A 0\n1 A A 1\n", minimized.transitions_to_string());
    /// ```
    pub fn minimize(&self) -> Result<MinimizedMachine, KissError> {
        let execution_profile = ThreadLocalParams::get_execution_profile();
        execution_profile.assert_number_of_states(self.get_number_of_states())?;

        let reachable = self.get_reachable_states();
        let missing = self.missing_transitions(&reachable);
        if let Some((state, input)) = missing.first() {
            if execution_profile.reject_incomplete {
                return Err(KissError::IncompleteTransition {
                    state: self.get_state_name(*state).to_string(),
                    input: input.to_string(),
                });
            }
            for (state, input) in &missing {
                warn!(
                    "The state '{}' has no transition for the input '{}', it is kept as unspecified.",
                    self.get_state_name(*state),
                    input
                );
            }
        }

        let refinement = self.refine();
        Ok(self.select(&refinement, &reachable))
    }

    /// Refine the single block partition until no block splits anymore.
    ///
    /// Unreachable states take part in the refinement like any other state.
    pub fn refine(&self) -> Refinement {
        let mut partition = Partition::new_single_block(self.get_number_of_states());
        let mut block_counts = vec![partition.get_number_of_blocks()];

        loop {
            let refined = self.refine_step(&partition);
            block_counts.push(refined.get_number_of_blocks());
            debug!(
                "Refinement step {}: {} blocks.",
                block_counts.len() - 1,
                refined.get_number_of_blocks()
            );
            if refined == partition {
                break;
            }
            partition = refined;
        }

        Refinement {
            partition,
            block_counts,
        }
    }

    fn refine_step(&self, previous: &Partition) -> Partition {
        let mut signature_to_block: AHashMap<Signature, usize> =
            AHashMap::with_capacity(previous.get_number_of_blocks() * 2);
        let mut blocks = Vec::with_capacity(self.get_number_of_states());

        for state in self.states_iter() {
            let next_block = signature_to_block.len();
            let block = *signature_to_block
                .entry(self.signature(state, previous))
                .or_insert(next_block);
            blocks.push(block);
        }

        Partition {
            blocks,
            number_of_blocks: signature_to_block.len(),
        }
    }

    fn signature(&self, state: State, previous: &Partition) -> Signature<'_> {
        self.alphabet
            .iter()
            .map(|input| {
                self.get_transition(state, input).map(|transition| {
                    (
                        transition.output.as_str(),
                        previous.block_of(transition.next),
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::execution_profile::ExecutionProfile;

    use super::*;

    fn to_fsm(text: &str) -> Fsm {
        KissDescription::parse(text).unwrap().to_fsm().unwrap()
    }

    #[test]
    fn test_refine() -> Result<(), String> {
        let fsm = to_fsm(
            ".i 1\n.o 1\n.r R\n.start_kiss\n0 R A 0\n1 R B 0\n0 A C 1\n1 A C 0\n0 B C 1\n1 B C 0\n0 C R 0\n1 C R 1\n.end_kiss\n",
        );

        let refinement = fsm.refine();
        let partition = refinement.get_partition();
        assert_eq!(&[1, 3, 3], refinement.block_counts());
        assert_eq!(2, refinement.iterations());
        assert_eq!(0, partition.block_of(0));
        assert_eq!(1, partition.block_of(1));
        assert_eq!(1, partition.block_of(2));
        assert_eq!(2, partition.block_of(3));
        assert_eq!(vec![1, 2], partition.block_elements(1).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_refine_needs_several_steps() -> Result<(), String> {
        // a chain where only the last state outputs 1: each step splits one more state off
        let fsm = to_fsm(
            ".i 1\n.o 1\n.r S0\n.start_kiss\n0 S0 S1 0\n0 S1 S2 0\n0 S2 S3 0\n0 S3 S3 1\n.end_kiss\n",
        );

        let refinement = fsm.refine();
        assert_eq!(&[1, 2, 3, 4, 4], refinement.block_counts());
        assert!(refinement.iterations() <= fsm.get_number_of_states());
        assert_eq!(4, refinement.get_partition().get_number_of_blocks());
        Ok(())
    }

    #[test]
    fn test_missing_entries_are_a_distinct_behaviour() -> Result<(), String> {
        let fsm = to_fsm(
            ".i 1\n.o 1\n.r A\n.start_kiss\n0 A B 0\n1 A C 0\n0 B A 1\n0 C A 1\n1 C A 0\n.end_kiss\n",
        );

        let refinement = fsm.refine();
        let partition = refinement.get_partition();
        assert_ne!(partition.block_of(1), partition.block_of(2));
        assert_eq!(3, partition.get_number_of_blocks());
        Ok(())
    }

    #[test]
    fn test_signature_has_no_separator_collision() -> Result<(), String> {
        // X and Y would get the same signature if it were built as "input:output:block;" text
        let fsm = to_fsm(
            ".i 1\n.o 1\n.r R\n.start_kiss\n0 R X 0\n1 R Y 0\n0 X T x:0;1:y\n1 X T z\n0 Y T x\n1 Y T y:0;1:z\n0 T T 0\n1 T T 0\n.end_kiss\n",
        );
        let refinement = fsm.refine();
        let partition = refinement.get_partition();
        assert_ne!(partition.block_of(1), partition.block_of(2));
        assert_eq!(4, partition.get_number_of_blocks());
        Ok(())
    }

    #[test]
    fn test_minimize_incomplete() -> Result<(), String> {
        let fsm = to_fsm(".i 1\n.o 1\n.r A\n.start_kiss\n0 A B 0\n1 A A 0\n0 B A 1\n.end_kiss\n");

        ThreadLocalParams::init_profile(&ExecutionProfile::default());
        let minimized = fsm.minimize().unwrap();
        assert_eq!(2, minimized.get_number_of_states());
        assert_eq!("0 A B 0\n1 A A 0\n0 B A 1\n", minimized.transitions_to_string());

        ThreadLocalParams::init_profile(&ExecutionProfile {
            reject_incomplete: true,
            ..ExecutionProfile::default()
        });
        assert_eq!(
            KissError::IncompleteTransition {
                state: "B".to_string(),
                input: "1".to_string()
            },
            fsm.minimize().unwrap_err()
        );
        ThreadLocalParams::init_profile(&ExecutionProfile::default());
        Ok(())
    }
}
