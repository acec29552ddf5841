use super::*;

pub mod minimize;
mod select;
