//! Sample command handler

use crate::cli::SampleArgs;
use crate::config::FileConfig;
use crate::error::Result;
use crate::output::OutputWriter;
use jsongrind_core::GrammarGenerator;
use tracing::info;

/// Documents printed when no count is given
const DEFAULT_SAMPLE_COUNT: u32 = 10;

/// Handle the sample command
///
/// Prints one document per generator draw to stdout. Status goes through
/// `tracing` on stderr so the stream stays machine-consumable.
pub fn handle_sample(
    args: SampleArgs,
    config: &FileConfig,
    output: &mut OutputWriter,
) -> Result<()> {
    let seed = args.seed.unwrap_or_else(jsongrind_core::random_seed);
    let grammar = super::resolve_grammar(config, args.max_fuel, args.escape_weight);
    let count = args.examples.unwrap_or(DEFAULT_SAMPLE_COUNT);

    info!(count, seed, "Sampling documents");

    let generator = GrammarGenerator::new(grammar, seed)?;
    for document in generator.take(count as usize) {
        output.writeln(document.as_str())?;
        // Documents can span lines, so a separator is the only reliable
        // boundary for downstream tooling.
        if let Some(delimiter) = &args.delimiter {
            output.writeln(delimiter)?;
        }
    }

    Ok(())
}
