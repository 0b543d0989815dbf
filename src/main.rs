//! merge-pad command line interface
//!
//! Joins audio clips in order and pads the result with silence up to a
//! target duration.

use audio_pad::processor::read_manifest;
use audio_pad::{AudioResult, Channels, ExportFormat, MergeConfig, SampleSpec};
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Ten minutes
const DEFAULT_TARGET_MS: i64 = 600_000;

/// Export or padding failed
const EXIT_FAILURE: u8 = 1;
/// Bad arguments or manifest
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "merge-pad")]
#[command(about = "Join audio clips and pad the result with silence", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Input audio files, in order
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// File listing more inputs, one per line (appended after FILE args)
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "merged_output.wav")]
    output: PathBuf,

    /// Minimum output duration in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TARGET_MS, allow_negative_numbers = true)]
    target_ms: i64,

    /// Output format (wav, wav16); guessed from the output extension when omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Output sample rate (e.g., 16000, 44100)
    #[arg(short, long)]
    rate: Option<u32>,

    /// Output channels (mono, stereo, or a count)
    #[arg(short, long)]
    channels: Option<String>,
}

impl Cli {
    /// Turn parsed arguments into an explicit pipeline config
    fn into_config(self) -> AudioResult<MergeConfig> {
        let mut inputs = self.inputs;
        if let Some(manifest) = &self.manifest {
            inputs.extend(read_manifest(manifest)?);
        }

        let format = match &self.format {
            Some(name) => name.parse::<ExportFormat>()?,
            None => ExportFormat::from_path(&self.output).unwrap_or_default(),
        };

        let output_spec = match (self.rate, self.channels.as_deref()) {
            (None, None) => None,
            (rate, channels) => {
                let defaults = SampleSpec::default();
                let channels = channels.map(Channels::parse).transpose()?;
                Some(SampleSpec::new(
                    rate.unwrap_or(defaults.sample_rate),
                    channels.unwrap_or(defaults.channels),
                )?)
            }
        };

        Ok(MergeConfig {
            inputs,
            output: self.output,
            format,
            target_ms: self.target_ms,
            output_spec,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stdout alongside the summary
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .init();

    info!("merge-pad {}", audio_pad::VERSION);

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match audio_pad::merge(&config) {
        Ok(report) => {
            println!(
                "Merge complete: {} ({} ms, {} of {} inputs)",
                config.output.display(),
                report.duration_ms,
                report.inputs_merged,
                config.inputs.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Merge failed: {}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
