//! mp4tomp3: Video to MP3 CLI Tool
//!
//! Converts a single file (`--file`), every video in the movie directory
//! (`--all`), lists candidates (`--list`), or runs an interactive menu when
//! called without a mode flag.

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use mp4tomp3::cli::{run_interactive, Cli, TerminalPrompt};
use mp4tomp3::converter::{Bitrate, ConvertError, Converter, ConverterConfig, FfmpegEngine};
use mp4tomp3::orchestrator::{list_mode, Orchestrator, RunOptions};
use mp4tomp3::report::BatchReport;
use mp4tomp3::utils::{print_banner, print_config, print_error, print_info, print_success};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    // Reject a bad bitrate before touching FFmpeg or the filesystem
    let bitrate = Bitrate::from_str(&cli.bitrate)?;

    if cli.list {
        list_mode(&cli.movie_dir)?;
        return Ok(ExitCode::SUCCESS);
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.movie_dir, &cli.output, bitrate.as_str());

    let config = ConverterConfig::default()
        .with_output_dir(&cli.output)
        .with_ffmpeg(&cli.ffmpeg)
        .with_ffprobe(&cli.ffprobe);
    let engine = FfmpegEngine::from_config(&config);

    print_info(&format!("Initializing converter (bitrate: {})", bitrate));
    let converter = Converter::new(config, engine).context("Converter initialization failed")?;
    print_success("Ready");

    let options = RunOptions {
        movie_dir: cli.movie_dir.clone(),
        output_dir: cli.output.clone(),
        bitrate: bitrate.to_string(),
        show_info: cli.info || cli.is_interactive(),
    };
    let orchestrator = Orchestrator::new(&converter, options);

    if let Some(file) = &cli.file {
        let report = orchestrator.run_single(file);
        return Ok(exit_code(&report));
    }

    if cli.all {
        let report = orchestrator.run_all()?;
        report.display();
        return Ok(exit_code(&report));
    }

    if !cli.movie_dir.is_dir() {
        return Err(ConvertError::DirectoryNotFound {
            path: cli.movie_dir.clone(),
        }
        .into());
    }

    print_success("Starting interactive mode");
    run_interactive(&orchestrator, &mut TerminalPrompt)?;
    Ok(ExitCode::SUCCESS)
}

/// Zero only when every requested file converted.
fn exit_code(report: &BatchReport) -> ExitCode {
    if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
