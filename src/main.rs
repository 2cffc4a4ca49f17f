//! respkit CLI binary entry point.

use std::io::Write;

use clap::Parser;
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use respkit::cli::{AskArgs, Cli, Commands, ModelsArgs};
use respkit::config::RespkitConfig;
use respkit::error::RespkitError;
use respkit::generation::{get_response, ResponseResult};
use respkit::models::ModelSelector;
use respkit::provider::OpenAiClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Models(args) => handle_models(args).await,
        Commands::Ask(args) => handle_ask(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_models(args: ModelsArgs) -> Result<(), RespkitError> {
    let client = OpenAiClient::new(&RespkitConfig::from_env())?;
    let models = ModelSelector::default()
        .list_recommended_models(&client)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    for model in models {
        let status = if model.available { "available" } else { "unavailable" };
        println!(
            "{:<14} {:<10} {:<12} {}",
            model.id,
            model.category.to_string(),
            status,
            model.label
        );
    }
    Ok(())
}

async fn handle_ask(args: AskArgs) -> Result<(), RespkitError> {
    let config = RespkitConfig::from_env();
    let client = OpenAiClient::new(&config)?;

    let model = match &args.model {
        Some(model) => model.clone(),
        None => {
            ModelSelector::default()
                .resolve_default_model(&config, &client, args.preference)
                .await?
        }
    };
    let request = args.to_request(model)?;

    match get_response(&client, &request).await? {
        ResponseResult::Text(text) => println!("{text}"),
        ResponseResult::Stream(mut fragments) => {
            while let Some(fragment) = fragments.next().await {
                print!("{}", fragment?);
                let _ = std::io::stdout().flush();
            }
            println!();
        }
    }
    Ok(())
}
