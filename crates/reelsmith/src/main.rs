//! Reelsmith command-line entry point.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{
    Cli, Commands, handle_generate_command, handle_prompt_command, handle_serve_command,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    reelsmith_core::init_tracing(cli.log_format).map_err(anyhow::Error::msg)?;
    reelsmith_core::init_observability("reelsmith", 60).map_err(anyhow::Error::msg)?;

    let result = match cli.command {
        Commands::Serve { config, host, port } => handle_serve_command(config, host, port)
            .await
            .context("Server failed"),
        Commands::Prompt { operation, input } => handle_prompt_command(operation, &input)
            .map(|prompt| println!("{}", prompt))
            .context("Could not build prompt"),
        Commands::Generate {
            operation,
            input,
            config,
        } => match handle_generate_command(operation, &input, config).await {
            Ok((success, envelope)) => {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                if success {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Operation {} did not succeed", operation))
                }
            }
            Err(e) => Err(anyhow::Error::new(e).context("Generation failed")),
        },
    };

    if let Err(e) = reelsmith_core::shutdown_observability() {
        tracing::warn!(error = %e, "Metrics shutdown failed");
    }
    result
}
