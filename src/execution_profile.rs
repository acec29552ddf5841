use std::cell::RefCell;

use crate::error::KissError;

/// Hold the limits and policies applied while minimizing a machine:
/// - max_number_of_states: the maximum number of states a parsed machine can hold.
/// - reject_incomplete: fail instead of tolerating a reachable state that has no transition for some input pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionProfile {
    pub max_number_of_states: usize,
    pub reject_incomplete: bool,
}

impl Default for ExecutionProfile {
    fn default() -> Self {
        ExecutionProfile {
            max_number_of_states: 65536,
            reject_incomplete: false,
        }
    }
}

impl ExecutionProfile {
    pub fn assert_number_of_states(&self, number_of_states: usize) -> Result<(), KissError> {
        if number_of_states > self.max_number_of_states {
            Err(KissError::TooManyStates(
                self.max_number_of_states,
                number_of_states,
            ))
        } else {
            Ok(())
        }
    }
}

pub struct ThreadLocalParams;
impl ThreadLocalParams {
    thread_local! {
        static MAX_NUMBER_OF_STATES: RefCell<usize> = const { RefCell::new(65536) };
        static REJECT_INCOMPLETE: RefCell<bool> = const { RefCell::new(false) };
    }

    /// Initialize the thread local holding the ExecutionProfile.
    pub fn init_profile(profile: &ExecutionProfile) {
        ThreadLocalParams::MAX_NUMBER_OF_STATES.with(|cell| {
            *cell.borrow_mut() = profile.max_number_of_states;
        });

        ThreadLocalParams::REJECT_INCOMPLETE.with(|cell| {
            *cell.borrow_mut() = profile.reject_incomplete;
        });
    }

    pub fn get_max_number_of_states() -> usize {
        ThreadLocalParams::MAX_NUMBER_OF_STATES.with(|cell| *cell.borrow())
    }

    pub fn get_reject_incomplete() -> bool {
        ThreadLocalParams::REJECT_INCOMPLETE.with(|cell| *cell.borrow())
    }

    pub fn get_execution_profile() -> ExecutionProfile {
        ExecutionProfile {
            max_number_of_states: Self::get_max_number_of_states(),
            reject_incomplete: Self::get_reject_incomplete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::kiss::KissDescription;

    use super::*;

    #[test]
    fn test_execution() -> Result<(), String> {
        let execution_profile = ExecutionProfile {
            max_number_of_states: 1,
            reject_incomplete: false,
        };
        ThreadLocalParams::init_profile(&execution_profile);
        assert_eq!(execution_profile, ThreadLocalParams::get_execution_profile());

        let description = KissDescription::parse(
            ".i 1\n.o 1\n.r A\n.start_kiss\n0 A B 1\n1 A A 0\n0 B A 0\n1 B B 1\n.end_kiss\n",
        )
        .unwrap();

        assert_eq!(
            KissError::TooManyStates(1, 2),
            description.to_fsm().unwrap().minimize().unwrap_err()
        );

        ThreadLocalParams::init_profile(&ExecutionProfile::default());
        assert!(description.to_fsm().unwrap().minimize().is_ok());

        Ok(())
    }
}
