mod cli;

use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context, Result};
use audio_diff_rs::audio_io::{decode_file, writer::write_wav};
use audio_diff_rs::cuts::apply_cuts_auto;
use audio_diff_rs::{diff_recordings, log_divergences};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_layer = match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_level(true),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_level(false)
        .without_time();

    tracing_subscriber::registry()
        .with(cli.verbosity())
        .with(console_layer)
        .with(file_layer)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    log::info!("Loading files...");
    let a = decode_file(&cli.file_1)
        .with_context(|| format!("failed to load {}", cli.file_1.display()))?;
    log::info!("Loaded {}", cli.file_1.display());
    let b = decode_file(&cli.file_2)
        .with_context(|| format!("failed to load {}", cli.file_2.display()))?;
    log::info!("Loaded {}", cli.file_2.display());

    log::info!("Searching...");
    let cfg = cli.align_config(a.sample_rate);
    let report = diff_recordings(&a, &b, &cfg, &cli.scan_control())?;

    log::info!("A: {}", cli.file_1.display());
    log::info!("B: {}", cli.file_2.display());
    log_divergences(&report.divergences, a.sample_rate, a.layout, cli.milliseconds);

    let Some(output) = &cli.output_file else {
        return Ok(());
    };
    let (mut target, cuts) = match cli.cutfile {
        2 => (b, &report.cuts_b),
        _ => (a, &report.cuts_a),
    };
    apply_cuts_auto(&mut target.samples, cuts);
    if !target.tags.is_empty() {
        log::info!("tags not written to WAV output: {:?}", target.tags);
    }
    write_wav(output, &target.samples, target.layout, target.sample_rate)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}
