mod cli;

use hushcut::{
    config,
    pipeline::{FfmpegToolkit, Job, JobHandle, JobOutcome, Orchestrator},
};
use hushcut_enhance::AttenuationLimit;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Exit code for an input without an audio track.
const EXIT_NO_AUDIO: u8 = 2;
/// Exit code after Ctrl-C, as a shell would report SIGINT.
const EXIT_CANCELLED: u8 = 130;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hushcut=trace,hushcut_av=trace,hushcut_enhance=trace".to_string()
        } else {
            "hushcut=debug,hushcut_av=debug,hushcut_enhance=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Denoise {
            input,
            output,
            atten_lim,
            model_dir,
            dry_run,
            json,
        } => denoise(DenoiseArgs {
            input,
            output,
            atten_lim,
            model_dir,
            dry_run,
            json,
            config_path: cli.config,
        }),
        Commands::Probe { file, json } => {
            probe_file(&file, cli.config.as_deref(), json).map(|_| ExitCode::SUCCESS)
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref()).map(|_| ExitCode::SUCCESS)
        }
        Commands::Version => {
            println!("hushcut {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

struct DenoiseArgs {
    input: PathBuf,
    output: PathBuf,
    atten_lim: Option<u32>,
    model_dir: Option<PathBuf>,
    dry_run: bool,
    json: bool,
    config_path: Option<PathBuf>,
}

fn denoise(args: DenoiseArgs) -> Result<ExitCode> {
    let mut config = config::load_config_or_default(args.config_path.as_deref())?;
    if let Some(dir) = args.model_dir {
        config.model.dir = Some(dir);
    }

    check_paths(&args.input, &args.output)?;

    let limit = match args.atten_lim {
        Some(db) => Some(AttenuationLimit::new(db)?),
        None => config.attenuation_limit(),
    };

    if args.dry_run {
        let toolkit = FfmpegToolkit::new(config.tools(), config.audio_encoding());
        let plan = toolkit
            .plan(&args.input, &args.output, Path::new("<workspace>"))
            .context("Cannot build the ffmpeg plan")?;

        println!("[DRY RUN] Would run:");
        for (i, cmd) in plan.iter().enumerate() {
            println!("  {}. {}", i + 1, cmd.display());
        }
        match limit {
            Some(limit) => println!("Attenuation limit: {}", limit),
            None => println!("Attenuation limit: model default"),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let orchestrator = Arc::new(Orchestrator::from_config(&config));
    let job = Job::new(&args.input, &args.output).with_attenuation_limit(limit);
    tracing::debug!("Submitting job {}", job.id);

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(follow(orchestrator.submit(job), args.json));

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        match &outcome {
            JobOutcome::Failed(failure) if !failure.is_informational() => {
                eprintln!("{}", outcome.message())
            }
            _ => println!("{}", outcome.message()),
        }
    }

    Ok(match outcome {
        JobOutcome::Completed { .. } => ExitCode::SUCCESS,
        JobOutcome::Failed(failure) if failure.is_informational() => {
            ExitCode::from(EXIT_NO_AUDIO)
        }
        JobOutcome::Failed(_) => ExitCode::FAILURE,
        JobOutcome::Cancelled => ExitCode::from(EXIT_CANCELLED),
    })
}

/// Print progress until the job finishes; Ctrl-C requests cancellation.
async fn follow(mut handle: JobHandle, json: bool) -> JobOutcome {
    let cancel = handle.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Cancelling after the current stage...");
            cancel.cancel();
        }
    });

    while let Some(event) = handle.next_progress().await {
        if json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!("Failed to encode progress event: {}", e),
            }
        } else {
            println!("[{:>3}%] {}", event.percent, event.stage);
        }
    }

    interrupt.abort();
    handle.outcome().await
}

fn check_paths(input: &Path, output: &Path) -> Result<()> {
    if !input.is_file() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        anyhow::bail!("Output directory does not exist: {:?}", parent);
    }

    let input_abs = input
        .canonicalize()
        .with_context(|| format!("Failed to resolve {:?}", input))?;
    let output_abs = match output.file_name() {
        Some(name) => parent.canonicalize()?.join(name),
        None => anyhow::bail!("Output path has no file name: {:?}", output),
    };
    if input_abs == output_abs {
        anyhow::bail!("Output must differ from input: {:?}", output);
    }

    Ok(())
}

fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let media_info = hushcut_av::probe(&config.tools(), file)?;

    if json {
        let json_str = serde_json::to_string_pretty(&media_info)?;
        println!("{}", json_str);
    } else {
        println!("File: {}", media_info.file_path.display());
        println!("Container: {}", media_info.container);
        println!("Size: {} bytes", media_info.file_size);
        if let Some(ref duration) = media_info.duration {
            let secs = duration.as_secs();
            let mins = secs / 60;
            let hours = mins / 60;
            println!("Duration: {:02}:{:02}:{:02}", hours, mins % 60, secs % 60);
        }

        println!("\nVideo Tracks: {}", media_info.video_tracks.len());
        for (i, track) in media_info.video_tracks.iter().enumerate() {
            print!("  [{}] {} {}x{}", i, track.codec, track.width, track.height);
            if let Some(fps) = track.frame_rate {
                print!(", {:.3} fps", fps);
            }
            println!();
        }

        println!("\nAudio Tracks: {}", media_info.audio_tracks.len());
        for (i, track) in media_info.audio_tracks.iter().enumerate() {
            print!("  [{}] {} {}ch", i, track.codec, track.channels);
            if let Some(rate) = track.sample_rate {
                print!(" {} Hz", rate);
            }
            if let Some(ref lang) = track.language {
                print!(" ({})", lang);
            }
            println!();
        }

        if media_info.other_streams > 0 {
            println!(
                "\nOther streams: {} (dropped when sanitizing)",
                media_info.other_streams
            );
        }
        if !media_info.has_audio() {
            println!("\nNo audio track: nothing to denoise.");
        }
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<ExitCode> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = hushcut_av::check_tools(&config.tools());
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Some tools are missing. Install ffmpeg to denoise videos.");
        Ok(ExitCode::FAILURE)
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            println!("Default config:");
            print_config(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config(config: &config::Config) {
    let show = |p: &Option<PathBuf>, fallback: &str| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| fallback.to_string())
    };

    println!("  ffmpeg: {}", show(&config.tools.ffmpeg_path, "PATH"));
    println!("  ffprobe: {}", show(&config.tools.ffprobe_path, "PATH"));
    println!("  Model dir: {}", show(&config.model.dir, "built-in weights"));
    match config.model.attenuation_limit_db {
        Some(db) => println!("  Attenuation limit: {} dB", db),
        None => println!("  Attenuation limit: model default"),
    }
    println!(
        "  Workspace root: {}",
        show(&config.workspace.root, "system temp dir")
    );
    println!("  Cleanup grace: {} ms", config.workspace.cleanup_grace_ms);
    println!(
        "  Output audio: {} @ {}",
        config.output.audio_codec, config.output.audio_bitrate
    );
}
