use ahash::AHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fsm::State;

/// Assign a dense identity to every state name, in order of first registration.
///
/// A name keeps the identity it got the first time it was registered.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct StateRegistry {
    names: Vec<String>,
    ids: AHashMap<String, State>,
}

impl PartialEq for StateRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for StateRegistry {}

impl StateRegistry {
    /// Return the identity of `name`, assigning the next free one if it was never seen.
    pub fn register(&mut self, name: &str) -> State {
        if let Some(state) = self.ids.get(name) {
            return *state;
        }
        let state = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), state);
        state
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<State> {
        self.ids.get(name).copied()
    }

    #[inline]
    pub fn name(&self, state: State) -> &str {
        &self.names[state]
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for StateRegistry {
    fn from(names: Vec<String>) -> Self {
        let mut registry = StateRegistry::default();
        for name in &names {
            registry.register(name);
        }
        registry
    }
}

impl From<StateRegistry> for Vec<String> {
    fn from(registry: StateRegistry) -> Self {
        registry.names
    }
}
