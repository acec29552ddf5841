use std::str::FromStr;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use super::*;

lazy_static! {
    static ref DIRECTIVE_LINE: Regex =
        Regex::new(r"^(?P<directive>\.\S*)(?:\s+(?P<argument>\S+))?").unwrap();
}

impl KissDescription {
    /// Parse a KISS description and check that the `.i`, `.o` and `.r` directives are usable.
    ///
    /// # Example:
    ///
    /// ```
    /// use kissmin::kiss::KissDescription;
    ///
    /// let description = KissDescription::parse(".i 1\n.o 1\n.r S0\n.start_kiss\n0 S0 S0 1\n.end_kiss\n").unwrap();
    ///
    /// assert_eq!("S0", description.get_reset_state());
    /// assert_eq!(1, description.get_transitions().len());
    /// ```
    pub fn parse(text: &str) -> Result<Self, KissError> {
        let description = Self::parse_unchecked(text);
        description.validate()?;
        Ok(description)
    }

    /// Parse a KISS description without requiring any directive.
    ///
    /// Directives are read anywhere before `.end_kiss`, data lines only between
    /// `.start_kiss` and `.end_kiss`. Data lines with fewer than four tokens are skipped.
    pub fn parse_unchecked(text: &str) -> Self {
        let mut description = KissDescription::default();
        let mut in_kiss = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with('.') {
                let Some(captures) = DIRECTIVE_LINE.captures(line) else {
                    continue;
                };
                let argument = captures.name("argument").map(|m| m.as_str());
                match Directive::from_token(&captures["directive"]) {
                    Some(Directive::StartKiss) => in_kiss = true,
                    Some(Directive::EndKiss) => break,
                    Some(Directive::Inputs) => description.num_inputs = parse_count(argument),
                    Some(Directive::Outputs) => description.num_outputs = parse_count(argument),
                    Some(Directive::Products) => {
                        description.num_products = parse_count(argument)
                    }
                    Some(Directive::States) => description.num_states = parse_count(argument),
                    Some(Directive::Reset) => {
                        if let Some(reset_state) = argument {
                            description.registry.register(reset_state);
                            description.reset_state = reset_state.to_string();
                        }
                    }
                    None => debug!("Ignoring directive line '{line}'."),
                }
            } else if in_kiss {
                let mut tokens = line.split_whitespace();
                let (Some(input), Some(present), Some(next), Some(output)) =
                    (tokens.next(), tokens.next(), tokens.next(), tokens.next())
                else {
                    debug!("Skipping malformed transition line '{line}'.");
                    continue;
                };
                description.registry.register(present);
                description.registry.register(next);
                description
                    .transitions
                    .push(RawTransition::new(input, present, next, output));
            }
        }

        if let Some(declared) = description.num_products {
            if declared != description.transitions.len() as i64 {
                debug!(
                    "Declared {declared} products but parsed {} transitions.",
                    description.transitions.len()
                );
            }
        }
        if let Some(declared) = description.num_states {
            if declared != description.registry.len() as i64 {
                debug!(
                    "Declared {declared} states but found {} state names.",
                    description.registry.len()
                );
            }
        }
        if !in_kiss && description.transitions.is_empty() {
            warn!("No {} marker found, no transition was read.", Directive::StartKiss);
        }

        description
    }
}

fn parse_count(argument: Option<&str>) -> Option<i64> {
    argument.and_then(|argument| argument.parse().ok())
}

impl FromStr for KissDescription {
    type Err = KissError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result<(), String> {
        let description = KissDescription::parse(
            "
            .start_kiss
            .i 2
            .o 1
            .p 4
            .s 2
            .r IDLE

            0- IDLE IDLE 0
            1- IDLE BUSY 0
            -0 BUSY BUSY 1
            -1 BUSY IDLE 1
            .end_kiss
            ",
        )
        .unwrap();

        assert_eq!(Some(2), description.get_num_inputs());
        assert_eq!(Some(1), description.get_num_outputs());
        assert_eq!(Some(4), description.get_num_products());
        assert_eq!(Some(2), description.get_num_states());
        assert_eq!("IDLE", description.get_reset_state());
        assert_eq!(&["IDLE", "BUSY"], description.get_state_names());
        assert_eq!(
            &RawTransition::new("-0", "BUSY", "BUSY", "1"),
            &description.get_transitions()[2]
        );
        Ok(())
    }

    #[test]
    fn test_parse_order_of_first_occurrence() -> Result<(), String> {
        let description = KissDescription::parse(
            ".i 1\n.o 1\n.start_kiss\n0 C B 1\n1 A C 0\n.r B\n0 B A 0\n.end_kiss\n",
        )
        .unwrap();
        assert_eq!(&["C", "B", "A"], description.get_state_names());
        assert_eq!(Some(1), description.get_state("B"));
        Ok(())
    }

    #[test]
    fn test_parse_tolerates_noise() -> Result<(), String> {
        let description = KissDescription::parse_unchecked(
            "0 X X 0\n.i 1\n.o 1\n.ilb a\n.start_kiss\n0 A\n\n  1 A B 0 extra  \n0 B\n.r A\n.end_kiss\n0 B A 1\n",
        );
        // the line before .start_kiss, the short lines and the line after .end_kiss are all ignored
        assert_eq!(
            vec![RawTransition::new("1", "A", "B", "0")],
            description.get_transitions()
        );
        assert_eq!(&["A", "B"], description.get_state_names());
        assert_eq!("A", description.get_reset_state());
        Ok(())
    }

    #[test]
    fn test_parse_counts() -> Result<(), String> {
        let description = KissDescription::parse_unchecked(".i two\n.o\n.p 3\n.r A\n.r\n");
        assert_eq!(None, description.get_num_inputs());
        assert_eq!(None, description.get_num_outputs());
        assert_eq!(Some(3), description.get_num_products());
        assert_eq!("A", description.get_reset_state());

        let description = KissDescription::parse_unchecked(".i 1\n.i 4\n.r A\n.r B\n");
        assert_eq!(Some(4), description.get_num_inputs());
        assert_eq!("B", description.get_reset_state());
        assert_eq!(&["A", "B"], description.get_state_names());
        Ok(())
    }

    #[test]
    fn test_parse_missing_directive() -> Result<(), String> {
        assert_eq!(
            Err(KissError::MissingDirective(Directive::Reset)),
            ".i 1\n.o 1\n.start_kiss\n0 A A 1\n.end_kiss\n".parse::<KissDescription>()
        );
        assert_eq!(
            Err(KissError::MissingDirective(Directive::Outputs)),
            KissDescription::parse(".i 1\n.r A\n.start_kiss\n0 A A 1\n.end_kiss\n")
        );
        Ok(())
    }
}
