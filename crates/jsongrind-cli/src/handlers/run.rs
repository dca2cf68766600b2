//! Run command handler

use crate::cli::RunArgs;
use crate::config::FileConfig;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use jsongrind_core::{Session, SessionConfig, SessionSummary, Subject};
use std::fs;
use tracing::{debug, info, instrument};

/// How many failing documents are shown inline before eliding the rest
const MAX_PRINTED_FAILURES: usize = 10;

/// Handle the run command
#[instrument(skip(config, output), fields(subject = %args.subject.display()))]
pub fn handle_run(args: RunArgs, config: &FileConfig, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details(
        "run_command",
        &format!("subject: {}", args.subject.display()),
    );
    info!("Starting fuzzing session");

    let subject = Subject::new(&args.subject)?;
    let seed = args.seed.unwrap_or_else(jsongrind_core::random_seed);
    let examples = args.examples.unwrap_or(config.session.examples);
    let timeout = super::resolve_timeout(args.timeout.or(config.session.timeout_secs))?;
    let report_dir = args
        .report_dir
        .clone()
        .unwrap_or_else(|| config.session.report_dir.clone());

    fs::create_dir_all(&report_dir).context("failed to create report directory")?;

    let session_config = SessionConfig {
        examples,
        seed,
        grammar: super::resolve_grammar(config, args.max_fuel, args.escape_weight),
        timeout,
        fail_fast: args.fail_fast || config.session.fail_fast,
        validate_documents: args.validate || config.session.validate,
        report_dir,
    };
    debug!(?session_config, "Session configured");

    output.info(&format!(
        "Feeding {} documents to {} (seed {})",
        examples,
        subject.name(),
        seed
    ))?;

    let session = Session::new(subject, session_config)?;

    let progress = output.progress_bar(u64::from(examples), "running");
    let summary = if let Some(pb) = &progress {
        let result = session.run_with(|p| {
            pb.set_position(u64::from(p.completed));
            if p.failed > 0 {
                pb.set_message(format!("{} failing", p.failed));
            }
        });
        pb.finish_and_clear();
        result?
    } else {
        session.run()?
    };

    render_summary(output, &summary)?;
    output.info(&format!(
        "Session wall time: {:.2}s",
        timer.elapsed().as_secs_f64()
    ))?;

    if !summary.is_success() {
        return Err(Error::SessionFailed {
            failures: summary.failures.len(),
            attempted: summary.attempted,
        });
    }

    Ok(())
}

/// Print the end-of-session summary, including any failing documents
fn render_summary(output: &mut OutputWriter, summary: &SessionSummary) -> Result<()> {
    output.section("Session Summary")?;
    output.info(&format!("Seed: {}", summary.seed))?;
    output.info(&format!(
        "Runs: {} attempted, {} accepted, {} failed",
        summary.attempted,
        summary.recorded,
        summary.failures.len()
    ))?;

    if let Some(stats) = &summary.stats {
        output.info(&format!("Average runtime: {:.6}s", stats.average_runtime))?;
        output.info(&format!(
            "Average normalized runtime: {:.9}s per char",
            stats.average_normalized_runtime
        ))?;
        output.info(&format!(
            "Average input size: {:.1} chars",
            stats.average_input_size
        ))?;
    }

    match &summary.report_path {
        Some(path) => output.success(&format!("✓ Report written to {}", path.display()))?,
        None => output.warning("No report written: no run was accepted")?,
    }

    if !summary.failures.is_empty() {
        render_failures(output, summary)?;
    }

    Ok(())
}

/// Print failing runs with their documents bracketed for copy-paste replay
fn render_failures(output: &mut OutputWriter, summary: &SessionSummary) -> Result<()> {
    output.section("Failing Runs")?;
    for failure in summary.failures.iter().take(MAX_PRINTED_FAILURES) {
        output.error(&format!("✗ run {}: {}", failure.index, failure.error))?;
        if let Some(document) = failure.error.document() {
            output.writeln(">>>>>>>>>>>>>>>>>>>>")?;
            output.writeln(document)?;
            output.writeln("<<<<<<<<<<<<<<<<<<<<")?;
        }
    }

    let hidden = summary.failures.len().saturating_sub(MAX_PRINTED_FAILURES);
    if hidden > 0 {
        output.warning(&format!("... and {} more failing run(s) not shown", hidden))?;
    }
    output.info(&format!("Replay this session with --seed {}", summary.seed))?;

    Ok(())
}
