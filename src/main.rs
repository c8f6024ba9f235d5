//! rmrag - CLI entry point

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use redmansion_rag::cache::CacheStore;
use redmansion_rag::cli::{self, Args, Commands};
use redmansion_rag::config::Config;
use redmansion_rag::generation::ChatCompletionsClient;
use redmansion_rag::repl;
use redmansion_rag::session::RagSession;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; environment variables win either way.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    if let Err(message) = args.validate() {
        eprintln!("{} {}", "Error:".red(), message);
        std::process::exit(1);
    }

    let mut config = Config::load()?;
    cli::apply_overrides(&mut config, &args);

    match args.command {
        Some(Commands::Clean) => clean(&config),
        Some(Commands::Config) => show_config(&config),
        Some(Commands::Start) => run_session(config, None).await,
        None => run_session(config, args.question).await,
    }
}

/// Delete cache artifacts so the next run rebuilds from the corpus.
fn clean(config: &Config) -> Result<()> {
    let cache = CacheStore::new(&config.corpus.cache_dir)?;
    cache.clear()?;
    println!(
        "{} cleared cache at {}",
        "OK:".green(),
        cache.dir().display()
    );
    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("# {}", Config::config_path()?.display());
    println!("{}", rendered);

    let cache = CacheStore::new(&config.corpus.cache_dir)?;
    if cache.is_complete() {
        println!("# cache: complete ({})", cache.dir().display());
    } else {
        println!("# cache: incomplete, next run will rebuild");
    }
    Ok(())
}

/// Initialize a session over the corpus, then answer one question or enter
/// the interactive loop.
async fn run_session(config: Config, question: Option<String>) -> Result<()> {
    let api_key = std::env::var(&config.generation.api_key_env).map_err(|_| {
        anyhow!(
            "API key not set. Export {} or add it to a .env file.",
            config.generation.api_key_env
        )
    })?;

    let client = ChatCompletionsClient::with_config(
        &config.generation.base_url,
        &config.generation.model,
        api_key,
    )?;

    let mut session = RagSession::new(config, Arc::new(client))?;
    let summary = session.initialize()?;
    println!(
        "{} {} documents, {} chunks, {} vocabulary terms",
        "Ready:".green(),
        summary.documents,
        summary.chunks,
        summary.vocabulary_terms
    );

    match question {
        Some(question) => {
            let answer = repl::ask_with_spinner(&session, &question).await?;
            repl::print_answer(&answer);
        }
        None => repl::run(&session).await?,
    }

    Ok(())
}
