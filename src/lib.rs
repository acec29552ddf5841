use std::{
    collections::{HashMap, HashSet},
    hash::BuildHasherDefault,
};

use dot::StgGraph;
use error::KissError;
use kiss::KissDescription;
use nohash_hasher::NoHashHasher;

pub mod dot;
pub mod error;
pub mod execution_profile;
pub mod fsm;
pub mod kiss;
pub mod minimized;

type IntMap<Key, Value> = HashMap<Key, Value, BuildHasherDefault<NoHashHasher<Key>>>;
type IntSet<Key> = HashSet<Key, BuildHasherDefault<NoHashHasher<Key>>>;

/// Minimize the machine of the given KISS description.
/// Returns the minimized KISS description and its graph in the DOT language.
///
/// The limits applied are the ones of the current [`execution_profile::ExecutionProfile`].
///
/// # Example:
///
/// ```
/// let (kiss, dot) = kissmin::minimize_kiss(
///     ".i 1\n.o 1\n.r S0\n.start_kiss\n0 S0 S1 1\n0 S1 S0 1\n.end_kiss\n",
/// )
/// .unwrap();
///
/// assert_eq!(".start_kiss\n.i 1\n.o 1\n.p 1\n.s 1\n.r S0\n0 S0 S0 1\n.end_kiss\n", kiss);
/// assert!(dot.contains("S0 -> S0 [label=\"0/1\"];"));
/// ```
pub fn minimize_kiss(text: &str) -> Result<(String, String), KissError> {
    let minimized = KissDescription::parse(text)?.to_fsm()?.minimize()?;
    Ok((
        minimized.to_string(),
        StgGraph::from_machine(&minimized).to_string(),
    ))
}

/// Render the machine of the given KISS description in the DOT language, without minimizing it.
///
/// # Example:
///
/// ```
/// let dot = kissmin::kiss_to_dot(".i 1\n.o 1\n.r B\n.start_kiss\n0 B A 1\n1 A B 0\n.end_kiss\n");
///
/// assert!(dot.contains("INIT -> B;"));
/// assert!(dot.contains("A -> B [label=\"1/0\"];"));
/// ```
pub fn kiss_to_dot(text: &str) -> String {
    StgGraph::from_description(&KissDescription::parse_unchecked(text)).to_string()
}
