use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gramscope::app::AppContext;
use gramscope::cli::{commands, Cli};
use gramscope::config::Config;
use gramscope::guard::validate_username;
use gramscope::report::TerminalConsole;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Nothing touches the network with an invalid name
    validate_username(&cli.target)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env();
    cli.apply(&mut config);

    let ctx = AppContext::connect(&config, &cli.target).await?;
    let mut console = TerminalConsole::new();

    commands::run(&ctx, &mut console, cli.command).await?;

    Ok(())
}
