use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::kiss::{KissDescription, RawTransition};
use crate::minimized::MinimizedMachine;

const GRAPH_NAME: &str = "STG";
const START_NODE: &str = "INIT";
const INDENT: &str = "   ";
const LABEL_SEPARATOR: &str = ",";

lazy_static! {
    static ref PLAIN_ID: Regex =
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*|-?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?))$").unwrap();
}

/// Represent a state-transition graph ready to be written in the DOT language.
///
/// Every `(source, destination)` pair gets a single edge labelled with all the
/// `input/output` pairs going through it, edges are ordered by source then destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StgGraph {
    start_state: Option<String>,
    states: Vec<String>,
    edges: BTreeMap<(String, String), Vec<String>>,
}

impl Display for StgGraph {
    fn fmt(&self, sb: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(sb, "digraph {} {{", GRAPH_NAME)?;
        writeln!(sb, "{INDENT}rankdir=LR;")?;
        writeln!(sb)?;
        writeln!(sb, "{INDENT}{} [shape=point];", START_NODE)?;
        for state in &self.states {
            writeln!(
                sb,
                "{INDENT}{} [label=\"{}\"];",
                Self::node_id(state),
                Self::escape(state)
            )?;
        }
        writeln!(sb)?;

        if let Some(start_state) = &self.start_state {
            writeln!(sb, "{INDENT}{} -> {};", START_NODE, Self::node_id(start_state))?;
        }
        for ((from_state, to_state), labels) in &self.edges {
            writeln!(
                sb,
                "{INDENT}{} -> {} [label=\"{}\"];",
                Self::node_id(from_state),
                Self::node_id(to_state),
                Self::escape(&labels.join(LABEL_SEPARATOR))
            )?;
        }
        writeln!(sb, "}}")
    }
}

impl StgGraph {
    /// The graph of a minimized machine, states declared in output order.
    pub fn from_machine(machine: &MinimizedMachine) -> Self {
        let mut graph = StgGraph {
            start_state: Some(machine.get_reset_state().to_string()),
            states: machine
                .get_states()
                .iter()
                .map(|state| state.name.clone())
                .collect(),
            edges: BTreeMap::new(),
        };
        for transition in machine.get_transitions() {
            graph.add_transition(transition);
        }
        graph
    }

    /// The graph of a description as written, without minimization.
    ///
    /// States are declared in lexicographic order. Without a reset state the start
    /// marker points to the first state, or nowhere when there is no state at all.
    pub fn from_description(description: &KissDescription) -> Self {
        let mut states = description.get_state_names().to_vec();
        states.sort_unstable();

        let start_state = if !description.get_reset_state().is_empty() {
            Some(description.get_reset_state().to_string())
        } else {
            warn!(
                "No reset state found, {} points to {}.",
                START_NODE,
                states.first().map(String::as_str).unwrap_or("nothing")
            );
            states.first().cloned()
        };

        let mut graph = StgGraph {
            start_state,
            states,
            edges: BTreeMap::new(),
        };
        for transition in description.get_transitions() {
            graph.add_transition(transition);
        }
        graph
    }

    fn add_transition(&mut self, transition: &RawTransition) {
        self.edges
            .entry((transition.present.clone(), transition.next.clone()))
            .or_default()
            .push(transition.label());
    }

    #[inline]
    pub fn get_start_state(&self) -> Option<&str> {
        self.start_state.as_deref()
    }

    #[inline]
    pub fn get_states(&self) -> &[String] {
        &self.states
    }

    #[inline]
    pub fn get_number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn get_labels(&self, from_state: &str, to_state: &str) -> Option<&[String]> {
        self.edges
            .get(&(from_state.to_string(), to_state.to_string()))
            .map(Vec::as_slice)
    }

    fn node_id(name: &str) -> Cow<'_, str> {
        if PLAIN_ID.is_match(name) && !Self::is_keyword(name) {
            Cow::Borrowed(name)
        } else {
            Cow::Owned(format!("\"{}\"", Self::escape(name)))
        }
    }

    fn is_keyword(name: &str) -> bool {
        ["node", "edge", "graph", "digraph", "subgraph", "strict"]
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(name))
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}
