use clap::Parser;
use colored::Colorize;
use mp3count::analyzer::{AnalysisResult, Analyzer, Verdict};
use mp3count::config::{Config, ReportFormat};
use mp3count::report::{self, Summary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "mp3count",
    version,
    about = "Count MPEG-1 Layer III frames in MP3 files"
)]
struct Cli {
    /// Files or directories to scan (directories are not recursed)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Write a report to this file (.json for JSON, anything else for CSV)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full report to stdout in this format (overrides the config file)
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Print the full report to stdout as JSON
    #[arg(long)]
    json: bool,

    /// Reject files larger than this many bytes
    #[arg(long)]
    max_bytes: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{} {}: {}", "error:".red().bold(), path.display(), e);
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };
    if let Some(max) = cli.max_bytes {
        config.max_bytes = max;
    }
    if let Some(format) = cli.format {
        config.format = Some(format);
    }

    let analyzer = Analyzer::new(config);
    let inputs = match analyzer.collect_inputs(cli.paths.as_slice()) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(2);
        }
    };
    info!(files = inputs.len(), "scanning");

    let results: Vec<AnalysisResult> = inputs.iter().map(|p| analyzer.analyze(p)).collect();

    if let Some(format) = analyzer.config().stdout_format(cli.json) {
        let stdout = std::io::stdout();
        if let Err(e) = report::write(&mut stdout.lock(), format, &results) {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(2);
        }
    } else {
        for r in &results {
            print_result(r);
        }
        print_summary(&Summary::from_results(&results));
    }

    if let Some(output) = &cli.output {
        if let Err(e) = report::generate(output, &results) {
            eprintln!("{} {}: {}", "error:".red().bold(), output.display(), e);
            return ExitCode::from(2);
        }
        eprintln!("Report written to {}", output.display().to_string().cyan());
    }

    if results.iter().any(|r| r.verdict == Verdict::Error) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_result(r: &AnalysisResult) {
    let verdict = match r.verdict {
        Verdict::Ok => format!("{:<6}", r.verdict).green(),
        Verdict::Empty => format!("{:<6}", r.verdict).yellow(),
        Verdict::Error => format!("{:<6}", r.verdict).red().bold(),
    };

    match &r.error {
        Some(err) => println!("{} {}  {}", verdict, r.file_name, err.dimmed()),
        None => {
            let declared = match r.declared_frames {
                Some(d) if d as usize != r.frame_count => format!("  (header says {})", d).dimmed(),
                _ => "".normal(),
            };
            println!(
                "{} {}  {} frames, {:.1}s @ {} Hz{}",
                verdict,
                r.file_name,
                r.frame_count.to_string().bold(),
                r.duration_secs,
                r.sample_rate,
                declared
            );
        }
    }
}

fn print_summary(summary: &Summary) {
    println!();
    println!(
        "{} files: {} ok, {} empty, {} errors, {} frames total",
        summary.total,
        summary.ok.to_string().green(),
        summary.empty.to_string().yellow(),
        summary.error.to_string().red(),
        summary.total_frames
    );
}
