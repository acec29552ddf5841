use std::fmt::{self, Write};

use super::*;

/// Header values written in front of the data lines of a KISS description.
pub(crate) struct KissHeader<'a> {
    pub num_inputs: Option<i64>,
    pub num_outputs: Option<i64>,
    pub num_products: Option<i64>,
    pub num_states: Option<i64>,
    pub reset_state: &'a str,
}

pub(crate) fn write_kiss<'a, W: Write>(
    sb: &mut W,
    header: &KissHeader<'_>,
    transitions: impl IntoIterator<Item = &'a RawTransition>,
) -> fmt::Result {
    writeln!(sb, "{}", Directive::StartKiss)?;
    for (directive, value) in [
        (Directive::Inputs, header.num_inputs),
        (Directive::Outputs, header.num_outputs),
        (Directive::Products, header.num_products),
        (Directive::States, header.num_states),
    ] {
        if let Some(value) = value {
            writeln!(sb, "{} {}", directive, value)?;
        }
    }
    if !header.reset_state.is_empty() {
        writeln!(sb, "{} {}", Directive::Reset, header.reset_state)?;
    }
    for transition in transitions {
        writeln!(sb, "{}", transition)?;
    }
    writeln!(sb, "{}", Directive::EndKiss)
}

impl Display for KissDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_kiss(
            f,
            &KissHeader {
                num_inputs: self.num_inputs,
                num_outputs: self.num_outputs,
                num_products: self.num_products,
                num_states: self.num_states,
                reset_state: &self.reset_state,
            },
            &self.transitions,
        )
    }
}
