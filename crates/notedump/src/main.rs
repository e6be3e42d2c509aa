//! notedump relay configuration CLI.
//!
//! Manages the per-user relay configuration (aliases and sets) and resolves
//! relay specifiers against it. The dump command layer hands the resolved
//! endpoint list to the network fetcher; everything here stays offline.
//!
//! # Usage
//!
//! ```bash
//! # Register an alias and build a set
//! notedump alias set mine wss://relay.example.com
//! notedump set add team wss://relay.damus.io wss://nos.lol
//!
//! # Resolve mixed specifiers to endpoint URLs
//! notedump resolve wss://relay.snort.social mine ...team
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notedump::Config;
use tracing_subscriber::EnvFilter;

/// notedump relay configuration CLI.
#[derive(Parser, Debug)]
#[command(name = "notedump")]
#[command(about = "Manage relay aliases and sets, and resolve relay specifiers")]
#[command(version)]
struct Args {
    /// Config file path (defaults to the per-user config location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage relay aliases
    #[command(subcommand)]
    Alias(AliasCommand),

    /// Manage relay sets
    #[command(subcommand)]
    Set(SetCommand),

    /// Resolve relay specifiers (URLs, aliases, `...set` spreads)
    Resolve {
        /// Specifiers to resolve
        #[arg(required = true)]
        specifiers: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AliasCommand {
    /// Register or overwrite an alias
    Set {
        /// Alias name
        alias: String,
        /// Relay URL the alias points to
        url: String,
    },
    /// Remove an alias
    Unset {
        /// Alias name
        alias: String,
    },
    /// List all aliases
    List,
}

#[derive(Subcommand, Debug)]
enum SetCommand {
    /// Add relay URLs to a set, creating it if needed
    Add {
        /// Set name
        name: String,
        /// Relay URLs to add
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Remove relay URLs from a set (deletes the set when emptied)
    Remove {
        /// Set name
        name: String,
        /// Relay URLs to remove
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Copy a set to another name
    Copy {
        /// Source set
        src: String,
        /// Destination set (overwritten if it exists)
        dst: String,
    },
    /// Rename a set
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Delete a set
    Delete {
        /// Set name
        name: String,
    },
    /// List all sets, or the members of one set
    List {
        /// Set name (omit to list every set)
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let path = args.config.clone().unwrap_or_else(Config::default_path);

    let mut config = Config::load(&path)
        .await
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    match args.command {
        Command::Alias(cmd) => run_alias(cmd, &mut config, &path).await,
        Command::Set(cmd) => run_set(cmd, &mut config, &path).await,
        Command::Resolve { specifiers } => run_resolve(&specifiers, &config),
    }
}

async fn run_alias(cmd: AliasCommand, config: &mut Config, path: &Path) -> Result<()> {
    match cmd {
        AliasCommand::Set { alias, url } => {
            config.aliases().set(&alias, &url)?;
            save(config, path).await?;
            if let Some(url) = config.aliases().get(&alias) {
                println!("{alias} -> {url}");
            }
        }
        AliasCommand::Unset { alias } => {
            if config.aliases().unset(&alias) {
                save(config, path).await?;
                println!("removed alias '{alias}'");
            } else {
                println!("no alias named '{alias}'");
            }
        }
        AliasCommand::List => {
            for (alias, url) in config.aliases().list() {
                println!("{alias} -> {url}");
            }
        }
    }
    Ok(())
}

async fn run_set(cmd: SetCommand, config: &mut Config, path: &Path) -> Result<()> {
    match cmd {
        SetCommand::Add { name, urls } => {
            if config.sets().add_relay_urls(&name, &urls)? {
                save(config, path).await?;
                println!("updated set '{name}'");
            } else {
                println!("set '{name}' unchanged");
            }
        }
        SetCommand::Remove { name, urls } => {
            if config.sets().remove_relay_urls(&name, &urls)? {
                save(config, path).await?;
                if config.sets().has(&name) {
                    println!("updated set '{name}'");
                } else {
                    println!("set '{name}' is now empty and was deleted");
                }
            } else {
                println!("set '{name}' unchanged");
            }
        }
        SetCommand::Copy { src, dst } => {
            config.sets().copy(&src, &dst)?;
            save(config, path).await?;
            println!("copied set '{src}' to '{dst}'");
        }
        SetCommand::Rename { old, new } => {
            config.sets().rename(&old, &new)?;
            save(config, path).await?;
            println!("renamed set '{old}' to '{new}'");
        }
        SetCommand::Delete { name } => {
            if config.sets().delete(&name) {
                save(config, path).await?;
                println!("deleted set '{name}'");
            } else {
                println!("no relay set named '{name}'");
            }
        }
        SetCommand::List { name: Some(name) } => match config.sets().relays_of(&name) {
            Some(urls) => {
                for url in urls {
                    println!("{url}");
                }
            }
            None => anyhow::bail!("no relay set named '{name}'"),
        },
        SetCommand::List { name: None } => {
            for (name, urls) in config.sets().list_all() {
                println!("{name}:");
                for url in urls {
                    println!("  {url}");
                }
            }
        }
    }
    Ok(())
}

fn run_resolve(specifiers: &[String], config: &Config) -> Result<()> {
    match config.resolver().resolve(specifiers) {
        Ok(urls) => {
            for url in urls {
                println!("{url}");
            }
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("error: {error}");
            }
            anyhow::bail!(
                "{} of {} specifiers failed to resolve",
                errors.len(),
                specifiers.len()
            )
        }
    }
}

async fn save(config: &Config, path: &Path) -> Result<()> {
    config
        .save(path)
        .await
        .with_context(|| format!("failed to save config to {}", path.display()))
}
