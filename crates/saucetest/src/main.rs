//! Saucetest CLI: run the SauceDemo regression suite against a real browser.
//!
//! ```bash
//! saucetest                         # run everything headless
//! saucetest --tags smoke            # smoke subset
//! saucetest --tags "cart and not slow" --headed
//! saucetest --config saucetest.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use futures::future::BoxFuture;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use saucetest::{Runner, Session, Settings, SuiteResult, TagFilter};

#[derive(Debug, Parser)]
#[command(name = "saucetest", version, about = "SauceDemo browser regression suite")]
struct Cli {
    /// Tag filter expression, e.g. "smoke or (cart and not slow)"
    #[arg(short, long)]
    tags: Option<String>,

    /// Path to a TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Browser to run (chrome, firefox, edge)
    #[arg(short, long)]
    browser: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Directory for report output
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> SuiteResult<bool> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(browser) = cli.browser {
        settings.browser = browser;
    }
    if cli.headed {
        settings.headless = false;
    }
    if let Some(dir) = cli.report_dir {
        settings.report.dir = dir;
    }
    let filter = match cli.tags.as_deref() {
        Some(expr) => TagFilter::parse(expr)?,
        None => TagFilter::all(),
    };

    let runner = Runner::new(settings, launch_session).with_filter(filter);
    let reporter = runner.run(&saucetest::suite::scenarios()).await?;

    println!("{}", reporter.summary());
    Ok(reporter.all_passed())
}

fn launch_session(settings: &Settings) -> BoxFuture<'_, SuiteResult<Session>> {
    Box::pin(Session::launch(settings))
}
