use std::path::PathBuf;
use std::time::Duration;

use audio_diff_rs::config::{
    AlignConfig, DEFAULT_CONFIRM_FRAMES, DEFAULT_LOOKAHEAD_SECS, DEFAULT_RUN_LENGTH,
};
use audio_diff_rs::control::ScanControl;
use clap::{ArgAction, Parser};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "audio-diff")]
#[command(about = "A tool for identifying and removing differences in matching audio files.")]
pub struct Cli {
    /// The first file to compare.
    pub file_1: PathBuf,

    /// The second file to compare.
    pub file_2: PathBuf,

    /// If provided, the matching audio is saved to this file as WAV.
    pub output_file: Option<PathBuf>,

    /// Reduce output. -q only reports after processing, -qq hides all but errors.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Maximum difference between samples before they are flagged as different audio.
    #[arg(short = 'm', long = "max", default_value_t = 1)]
    pub max: u32,

    /// Show hundredths of a second in timestamps.
    #[arg(short = 's', long)]
    pub milliseconds: bool,

    /// Which file to recut when saving (1 or 2).
    #[arg(short = 'c', long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub cutfile: u8,

    /// Longest expected divergence, in seconds.
    #[arg(long, default_value_t = DEFAULT_LOOKAHEAD_SECS)]
    pub lookahead_secs: u32,

    /// Frames that must match after a resync checkpoint.
    #[arg(long, default_value_t = DEFAULT_CONFIRM_FRAMES)]
    pub confirm_frames: usize,

    /// Consecutive matching frames that confirm a boundary.
    #[arg(long, default_value_t = DEFAULT_RUN_LENGTH)]
    pub run_length: usize,

    /// Give up the scan after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> LevelFilter {
        match self.quiet {
            0 => LevelFilter::DEBUG,
            1 => LevelFilter::INFO,
            _ => LevelFilter::ERROR,
        }
    }

    pub fn align_config(&self, sample_rate: u32) -> AlignConfig {
        let mut cfg = AlignConfig::for_sample_rate(sample_rate)
            .with_tolerance(self.max)
            .with_lookahead_secs(self.lookahead_secs, sample_rate);
        cfg.confirm_frames = self.confirm_frames;
        cfg.run_length = self.run_length;
        cfg
    }

    pub fn scan_control(&self) -> ScanControl {
        match self.timeout_secs {
            Some(secs) => ScanControl::with_timeout(Duration::from_secs(secs)),
            None => ScanControl::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_library() {
        let cli = Cli::try_parse_from(["audio-diff", "a.mp3", "b.mp3"]).unwrap();
        assert_eq!(cli.align_config(44_100), AlignConfig::for_sample_rate(44_100));
        assert_eq!(cli.verbosity(), LevelFilter::DEBUG);
        assert_eq!(cli.cutfile, 1);
        assert!(cli.output_file.is_none());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "audio-diff", "a.mp3", "b.mp3", "out.wav", "-qq", "-m", "4", "-c", "2", "--run-length",
            "800",
        ])
        .unwrap();
        let cfg = cli.align_config(8_000);
        assert_eq!(cfg.tolerance, 4);
        assert_eq!(cfg.run_length, 800);
        assert_eq!(cli.verbosity(), LevelFilter::ERROR);
        assert_eq!(cli.cutfile, 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["audio-diff", "a", "b", "-c", "3"]).is_err());
        assert!(Cli::try_parse_from(["audio-diff", "a", "b", "-m", "-1"]).is_err());
    }
}
