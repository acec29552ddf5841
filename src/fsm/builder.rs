use std::collections::BTreeSet;

use log::warn;

use super::*;

impl Fsm {
    /// Build the transition table from a validated description.
    ///
    /// A later line for an already seen `(input, present)` pair replaces the earlier one.
    pub fn from_description(description: &KissDescription) -> Result<Self, KissError> {
        description.validate()?;

        // deserialized descriptions may mention names that are not registered yet
        let mut registry = description.get_registry().clone();
        let reset_state = registry.register(description.get_reset_state());
        let mut table = Vec::with_capacity(registry.len());
        let mut alphabet = BTreeSet::new();

        for raw in description.get_transitions() {
            let present = registry.register(&raw.present);
            let next = registry.register(&raw.next);
            if table.len() < registry.len() {
                table.resize_with(registry.len(), Transitions::default);
            }
            alphabet.insert(raw.input.as_str());

            let transition = Transition {
                next,
                output: raw.output.clone(),
            };
            if let Some(previous) = table[present].insert(raw.input.clone(), transition) {
                warn!(
                    "Duplicate transition on input '{}' from state '{}', '{} {}' replaced by '{} {}'.",
                    raw.input,
                    raw.present,
                    registry.name(previous.next),
                    previous.output,
                    raw.next,
                    raw.output
                );
            }
        }
        table.resize_with(registry.len(), Transitions::default);

        Ok(Fsm {
            names: registry.names().to_vec(),
            transitions: table,
            alphabet: alphabet.into_iter().map(str::to_string).collect(),
            reset_state,
            num_inputs: description.get_num_inputs().unwrap_or_default(),
            num_outputs: description.get_num_outputs().unwrap_or_default(),
        })
    }
}
