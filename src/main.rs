mod engine;
mod export;
mod models;
mod plan;
mod run;
mod ui;

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let plan = plan::Plan::default();

    match args.len() {
        1 => run::as_tui(plan),
        2.. => run::as_cli(&args, &plan),
        _ => {
            eprintln!("Usage: budgetcalc [command]");
            Ok(())
        }
    }
}

/// Log to stderr so the TUI and `export -` keep stdout to themselves.
/// Quiet unless `RUST_LOG` asks for more.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
