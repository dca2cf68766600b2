//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod run;
mod sample;
mod selfcheck;

pub use run::handle_run;
pub use sample::handle_sample;
pub use selfcheck::handle_selfcheck;

use crate::cli::CompletionsArgs;
use crate::config::FileConfig;
use crate::error::{Error, Result};
use clap::CommandFactory;
use jsongrind_core::GrammarConfig;
use std::time::Duration;

/// Handle the completions command
pub fn handle_completions(args: CompletionsArgs) -> Result<()> {
    use clap_complete::generate;
    use std::io;

    let mut cmd = crate::cli::Cli::command();
    let name = cmd.get_name().to_string();

    generate(args.shell.to_clap_shell(), &mut cmd, name, &mut io::stdout());

    Ok(())
}

/// Apply grammar flag overrides on top of the file config
fn resolve_grammar(
    config: &FileConfig,
    max_fuel: Option<u32>,
    escape_weight: Option<u32>,
) -> GrammarConfig {
    let mut grammar = config.grammar.clone();
    if let Some(fuel) = max_fuel {
        grammar.max_fuel = fuel;
    }
    if let Some(weight) = escape_weight {
        grammar.escape_weight = weight;
    }
    grammar
}

/// Turn a seconds value into a validated `Duration`
fn resolve_timeout(seconds: Option<f64>) -> Result<Option<Duration>> {
    match seconds {
        None => Ok(None),
        // try_from catches NaN, negatives and values past Duration's range
        Some(secs) => match Duration::try_from_secs_f64(secs) {
            Ok(limit) if !limit.is_zero() => Ok(Some(limit)),
            _ => Err(Error::invalid_args(format!(
                "timeout must be a positive number of seconds, got {secs}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_flags_override_file_config() {
        let mut config = FileConfig::default();
        config.grammar.max_fuel = 32;
        config.grammar.escape_weight = 4;

        let grammar = resolve_grammar(&config, Some(8), None);
        assert_eq!(grammar.max_fuel, 8);
        assert_eq!(grammar.escape_weight, 4);

        let grammar = resolve_grammar(&config, None, Some(0));
        assert_eq!(grammar.max_fuel, 32);
        assert_eq!(grammar.escape_weight, 0);
    }

    #[test]
    fn timeout_must_be_positive_and_finite() {
        assert_eq!(resolve_timeout(None).unwrap(), None);
        assert_eq!(
            resolve_timeout(Some(1.5)).unwrap(),
            Some(Duration::from_millis(1500))
        );
        assert!(resolve_timeout(Some(0.0)).is_err());
        assert!(resolve_timeout(Some(-2.0)).is_err());
        assert!(resolve_timeout(Some(f64::NAN)).is_err());
        assert!(resolve_timeout(Some(f64::INFINITY)).is_err());
        assert!(resolve_timeout(Some(1e300)).is_err());
    }
}
