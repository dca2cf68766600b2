//! Selfcheck command handler

use crate::cli::SelfcheckArgs;
use crate::config::FileConfig;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use jsongrind_core::GrammarGenerator;
use serde::de::IgnoredAny;
use tracing::info;

/// Documents checked when no count is given
const DEFAULT_SELFCHECK_COUNT: u32 = 1000;

/// Handle the selfcheck command
///
/// Runs the generator against the built-in reference parser instead of an
/// external subject. Any rejected document is a generator defect.
pub fn handle_selfcheck(
    args: SelfcheckArgs,
    config: &FileConfig,
    output: &mut OutputWriter,
) -> Result<()> {
    let seed = args.seed.unwrap_or_else(jsongrind_core::random_seed);
    let grammar = super::resolve_grammar(config, args.max_fuel, args.escape_weight);
    let count = args.examples.unwrap_or(DEFAULT_SELFCHECK_COUNT);

    output.info(&format!(
        "Checking {} generated documents against the reference parser (seed {})",
        count, seed
    ))?;
    info!(count, seed, "Starting self-check");

    let spinner = output.spinner("generating and parsing...");
    let mut generator = GrammarGenerator::new(grammar, seed)?;
    let mut failures = 0usize;

    for index in 0..count {
        let document = generator.generate();
        if let Err(parse_error) = serde_json::from_str::<IgnoredAny>(document.as_str()) {
            failures += 1;
            output.error(&format!("✗ document {} rejected: {}", index, parse_error))?;
            output.writeln(">>>>>>>>>>>>>>>>>>>>")?;
            output.writeln(document.as_str())?;
            output.writeln("<<<<<<<<<<<<<<<<<<<<")?;
        }
    }

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if failures > 0 {
        return Err(Error::SelfcheckFailed {
            failures,
            examples: count,
        });
    }

    output.success(&format!(
        "✓ All {} documents accepted by the reference parser",
        count
    ))?;

    Ok(())
}
