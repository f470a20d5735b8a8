use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use snapscribe::{
    FfmpegLogLevel, ProcessOptions, SnapscribeError, TesseractEngine, VideoSource, listing,
    pipeline, snapshot, transcript,
};

const CLI_AFTER_HELP: &str = "Examples:\n  snapscribe --list\n  snapscribe --video movie.mp4 --snapshots\n  snapscribe --video movie.mp4 --snapshots --ocr --interval 60\n  snapscribe --dir ~/Movies --snapshots --ocr --lang eng+spa";

#[derive(Debug, Parser)]
#[command(
    name = "snapscribe",
    version,
    about = "List, snapshot, and OCR video files",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Single video file to process.
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    video: Option<PathBuf>,

    /// Process every recognized video file inside this directory.
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// List video files in the current directory; no processing.
    #[arg(long)]
    list: bool,

    /// Extract snapshots from the selected video(s).
    #[arg(long)]
    snapshots: bool,

    /// Run OCR over extracted snapshots and build transcripts.
    #[arg(long)]
    ocr: bool,

    /// Seconds between snapshots.
    #[arg(long, value_name = "SEC", default_value_t = 30.0)]
    interval: f64,

    /// Plus-joined Tesseract language codes, e.g. "eng+fra".
    #[arg(long, value_name = "CODES", default_value = "eng")]
    lang: String,
}

/// What the flag combination asks for, resolved before any I/O happens.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Invocation {
    List,
    Video(PathBuf),
    Directory(PathBuf),
}

/// Validate the flag combination and resolve the invocation mode.
///
/// Exactly one of `--video`, `--dir`, `--list` must be given; the processing
/// modes additionally require at least one action flag and a positive
/// interval.
fn validate(cli: &Cli) -> Result<Invocation, SnapscribeError> {
    let selectors =
        usize::from(cli.video.is_some()) + usize::from(cli.dir.is_some()) + usize::from(cli.list);

    if selectors == 0 {
        return Err(SnapscribeError::InvalidArguments(
            "one of --video, --dir, or --list is required".to_string(),
        ));
    }
    if selectors > 1 {
        return Err(SnapscribeError::InvalidArguments(
            "--video, --dir, and --list are mutually exclusive".to_string(),
        ));
    }

    if cli.list {
        return Ok(Invocation::List);
    }

    if !cli.snapshots && !cli.ocr {
        return Err(SnapscribeError::InvalidArguments(
            "no action specified: add --snapshots and/or --ocr".to_string(),
        ));
    }

    if !cli.interval.is_finite() || cli.interval <= 0.0 {
        return Err(SnapscribeError::InvalidArguments(format!(
            "--interval must be a positive number of seconds, got {}",
            cli.interval,
        )));
    }

    Ok(match (&cli.video, &cli.dir) {
        (Some(video), None) => Invocation::Video(video.clone()),
        (None, Some(dir)) => Invocation::Directory(dir.clone()),
        _ => unreachable!("selector count was checked above"),
    })
}

fn process_options(cli: &Cli) -> ProcessOptions {
    ProcessOptions {
        snapshots: cli.snapshots,
        ocr: cli.ocr,
        interval: Duration::from_secs_f64(cli.interval),
        languages: cli.lang.clone(),
    }
}

/// Process a single video, driving a progress bar over the snapshot schedule.
fn run_single_video(video_path: &Path, options: &ProcessOptions) -> Result<(), SnapscribeError> {
    if options.snapshots {
        let mut source = VideoSource::open(video_path)?;
        let output_dir = snapshot::snapshot_directory(video_path);

        let planned = snapshot::sample_timestamps(source.duration(), options.interval).len();
        let progress_bar = ProgressBar::new(planned as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            progress_bar.set_style(style.progress_chars("##-"));
        }

        let written = snapshot::extract_snapshots_with(
            &mut source,
            options.interval,
            &output_dir,
            |_, _| progress_bar.inc(1),
        )?;
        progress_bar.finish_and_clear();

        println!(
            "{} {}",
            "snapshots:".green().bold(),
            format!("{written} file(s) in {}", output_dir.display()).green()
        );
    }

    if options.ocr {
        let engine = TesseractEngine::new();
        let transcript_path =
            transcript::build_transcript(video_path, &engine, &options.languages)?;
        println!(
            "{} {}",
            "transcript:".green().bold(),
            transcript_path.display().to_string().green()
        );
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<ExitCode, SnapscribeError> {
    let invocation = validate(cli)?;

    // Keep FFmpeg's own stderr output down to real errors.
    snapscribe::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    match invocation {
        Invocation::List => {
            for video in listing::list_video_files(Path::new("."))? {
                let name = video
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| video.display().to_string());
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Video(video_path) => {
            let options = process_options(cli);
            run_single_video(&video_path, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Directory(directory) => {
            let options = process_options(cli);
            let engine = TesseractEngine::new();
            let summary = pipeline::process_directory(&directory, &options, &engine)?;

            println!(
                "{} {}",
                "batch:".green().bold(),
                format!(
                    "{} video(s) processed, {} failed",
                    summary.processed, summary.failed,
                )
                .green()
            );

            if summary.failed > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {}", "error:".red().bold(), error.to_string().red());
            ExitCode::FAILURE
        }
    }
}
