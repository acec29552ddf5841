use super::*;

impl Fsm {
    /// Feed `inputs` to the machine from its reset state and collect the outputs.
    ///
    /// Return `None` as soon as the current state has no entry for an input pattern.
    pub fn run<I, S>(&self, inputs: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.reset_state;
        let mut outputs = vec![];
        for input in inputs {
            let transition = self.get_transition(state, input.as_ref())?;
            outputs.push(transition.output.clone());
            state = transition.next;
        }
        Some(outputs)
    }
}
