// gemini-cache - Client library and CLI for the Gemini cached content API
// Author: kelexine (https://github.com/kelexine)

use anyhow::{Context, Result};
use clap::Parser;
use gemini_cache::cli::{self, Args, Command};
use gemini_cache::config::AppConfig;
use gemini_cache::utils::logging;
use gemini_cache::GeminiCache;
use serde::Serialize;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load()?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    debug!("Starting gemini-cache v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the registry
    let cache = GeminiCache::new(config.gemini)?;

    // Phase 4: Run the command
    match args.command {
        Command::List => print_json(&cache.list().await?)?,
        Command::Show(lookup) => {
            let lookup = lookup.lookup();
            let item = cache
                .get(&lookup)
                .await?
                .with_context(|| format!("no cache matching {:?}", lookup))?;
            print_json(&item)?;
        }
        Command::CreateText { text, options } => {
            let item = cache
                .create_from_text(&text, &options.display_name, options.options())
                .await?;
            print_json(&item)?;
        }
        Command::CreateWebpage { url, options } => {
            let item = cache
                .create_from_webpage(&url, &options.display_name, options.options())
                .await?;
            print_json(&item)?;
        }
        Command::CreateFile {
            path,
            mime_type,
            options,
        } => {
            let item = cache
                .create_from_local_file(&path, &mime_type, &options.display_name, options.options())
                .await?;
            print_json(&item)?;
        }
        Command::CreateRemote {
            url,
            mime_type,
            options,
        } => {
            let item = cache
                .create_from_remote_file(&url, &mime_type, &options.display_name, options.options())
                .await?;
            print_json(&item)?;
        }
        Command::Ttl { name, seconds } => {
            let item = cache
                .find_by_name(&name)
                .await?
                .with_context(|| format!("no cache named {}", name))?;
            print_json(&item.set_ttl(seconds).await?)?;
        }
        Command::Delete { name } => {
            cache.delete(&name).await?;
            println!("Deleted {}", name);
        }
        Command::Clear => {
            let count = cache.clear().await?;
            println!("Deleted {} cache(s)", count);
        }
        Command::Prompt {
            name,
            prompt,
            generation_config,
        } => {
            let mode = cli::generation_mode(generation_config.as_deref())
                .context("invalid --generation-config")?;
            let item = cache
                .find_by_name(&name)
                .await?
                .with_context(|| format!("no cache named {}", name))?;
            match item.single_prompt(&prompt, mode).await? {
                Some(text) => println!("{}", text),
                None => eprintln!("Response contained no text"),
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
