//! Aggregate command: collect a note and its links, write the result, summarize.

use std::fs;
use std::path::Path;

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use obs2prompt_core::config::{ConfigLoader, ConfigOverrides};
use obs2prompt_core::tokens::ExternalTokenCounter;
use obs2prompt_core::{AggregateOptions, AggregateOutcome, LinkAggregator};
use tracing::{info, warn};

use super::output::{SummaryOutput, print_statistics, print_summary_json};
use crate::{Cli, clipboard, logging};

pub fn run(cli: &Cli) -> Result<()> {
    let overrides = ConfigOverrides {
        vault_path: cli.vault_path.clone(),
        depth: cli.depth,
        profile: cli.profile.clone(),
    };

    let rc = ConfigLoader::load(cli.config.as_deref(), &overrides)
        .wrap_err("failed to load configuration")?;

    let _log_guard = logging::init(&rc.logging, cli.debug);

    if !cli.json {
        println!("Using vault path: {}", rc.vault_root.display());
    }

    let aggregator = LinkAggregator::new(AggregateOptions::from(&rc))?;
    let outcome = aggregator.process(&cli.start_file);

    // A missing start file still produces an output file holding the message.
    let text = match &outcome {
        AggregateOutcome::Collected(aggregate) => aggregate.render(Local::now().naive_local()),
        AggregateOutcome::NotFound { .. } => outcome.to_string(),
    };

    let output_path =
        cli.output.clone().unwrap_or_else(|| rc.default_output_path(&cli.start_file));
    write_output(&output_path, &text)?;
    info!(path = %output_path.display(), found = outcome.is_found(), "wrote aggregate");

    let mut stats = outcome.statistics();
    // Without an external count the word-count estimate stands.
    if cli.exact_tokens && outcome.is_found() {
        if let Some(count) = ExternalTokenCounter::default().count_file(&output_path) {
            stats.total_tokens = count;
        }
    }

    if cli.json {
        let summary = if outcome.is_found() {
            SummaryOutput::new(stats, Some(&output_path))
        } else {
            SummaryOutput::not_found(outcome.to_string(), &output_path)
        };
        print_summary_json(&summary);
    } else {
        if !outcome.is_found() {
            println!("{outcome}");
        }
        print_statistics(&stats);
        println!();
        println!("Results saved to: {}", output_path.display());
    }

    if cli.clipboard {
        match clipboard::copy(&text) {
            Ok(_) => {
                if !cli.json {
                    println!("Content copied to clipboard!");
                }
            }
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                if !cli.json {
                    println!("Error copying to clipboard: {e}");
                }
            }
        }
    }

    Ok(())
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create output directory {}", parent.display()))?;
    }
    fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))
}
