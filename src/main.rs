//! codequal CLI entry point

use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codequal::report::{generate_summary, render, save_report, Report};
use codequal::{Analyzer, Cli, QualityError};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> codequal::Result<()> {
    // 1. Check target exists
    if !cli.target.exists() {
        return Err(QualityError::FileNotFound {
            path: cli.target.display().to_string(),
        });
    }

    eprintln!("Analyzing: {}...", cli.target.display());

    // 2. Analyze file or directory
    let analyzer = Analyzer::default();
    let report: Report = if cli.target.is_dir() {
        analyzer.analyze_directory(&cli.target)?.into()
    } else {
        analyzer.analyze_file(&cli.target)?.into()
    };

    // 3. Emit report
    match &cli.output {
        Some(path) => {
            save_report(&report, path, cli.format)?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => println!("{}", render(&report, cli.format)?),
    }

    let summary = generate_summary(&report);
    eprintln!("\nSummary: {} ({}/100)", summary.grade(), summary.score());

    Ok(())
}
