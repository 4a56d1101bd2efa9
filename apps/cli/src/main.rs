use clap::Parser;
use stockboard_cli::cli::Cli;
use stockboard_cli::config::Config;
use stockboard_cli::render::render;
use stockboard_cli::{build_store, init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let store = build_store(&config)?;
    let view = run(&store, cli.command).await;
    let state = store.snapshot();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render(&state, view));
    }

    if state.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}
