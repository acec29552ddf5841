use super::*;

impl Fsm {
    /// Compute the states reachable from the reset state, the reset state included.
    pub fn get_reachable_states(&self) -> IntSet<State> {
        let mut reachable = IntSet::default();
        let mut worklist = VecDeque::with_capacity(self.get_number_of_states());

        reachable.insert(self.reset_state);
        worklist.push_back(self.reset_state);
        while let Some(state) = worklist.pop_front() {
            for transition in self.transitions[state].values() {
                if reachable.insert(transition.next) {
                    worklist.push_back(transition.next);
                }
            }
        }

        reachable
    }

    /// List the `(state, input)` pairs of reachable states that have no table entry,
    /// in state identity order then alphabet order.
    pub fn missing_transitions(&self, reachable: &IntSet<State>) -> Vec<(State, &str)> {
        let mut missing = vec![];
        for state in self.states_iter().filter(|s| reachable.contains(s)) {
            for input in &self.alphabet {
                if !self.transitions[state].contains_key(input) {
                    missing.push((state, input.as_str()));
                }
            }
        }
        missing
    }

    /// Whether every reachable state has an entry for every input pattern.
    pub fn is_completely_specified(&self) -> bool {
        self.missing_transitions(&self.get_reachable_states())
            .is_empty()
    }
}
