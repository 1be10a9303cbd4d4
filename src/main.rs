use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use msgtm::cli::{orchestration, Cli};
use msgtm::config;
use msgtm::git::{Git2Backend, LoggingBackend};
use msgtm::ui;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    orchestration::run(cli, &config, || {
        Git2Backend::open(".").map(LoggingBackend::new)
    })
}

/// `RUST_LOG` wins; otherwise `-v` raises msgtm to debug.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("msgtm=debug,warn")
        } else {
            EnvFilter::new("msgtm=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
