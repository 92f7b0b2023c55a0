// CLI module for gemini-cache
// Author: kelexine (https://github.com/kelexine)

use crate::cache::{CacheLookup, CreateOptions, GenerationMode, OnConflict};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// gemini-cache - Manage Gemini cached contents from the command line
#[derive(Parser, Debug)]
#[command(name = "gemini-cache", version, about, long_about = None)]
pub struct Args {
    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all caches
    List,

    /// Show a single cache
    Show(LookupArgs),

    /// Create a cache from literal text
    CreateText {
        /// Text to cache
        text: String,
        #[command(flatten)]
        options: CreateArgs,
    },

    /// Create a cache from the visible text of a web page
    CreateWebpage {
        url: String,
        #[command(flatten)]
        options: CreateArgs,
    },

    /// Create a cache from a local file
    CreateFile {
        path: PathBuf,
        /// MIME type of the file, e.g. application/pdf
        #[arg(long)]
        mime_type: String,
        #[command(flatten)]
        options: CreateArgs,
    },

    /// Create a cache from a remote file
    CreateRemote {
        url: String,
        /// MIME type of the file, e.g. application/pdf
        #[arg(long)]
        mime_type: String,
        #[command(flatten)]
        options: CreateArgs,
    },

    /// Set the TTL of a cache
    Ttl {
        /// Cache resource name (cachedContents/...)
        name: String,
        /// New TTL in seconds
        seconds: u64,
    },

    /// Delete a cache
    Delete {
        /// Cache resource name (cachedContents/...)
        name: String,
    },

    /// Delete every cache
    Clear,

    /// Ask a single question against a cache
    Prompt {
        /// Cache resource name (cachedContents/...)
        name: String,
        prompt: String,
        /// Raw generation_config JSON; accurate mode when omitted
        #[arg(long)]
        generation_config: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
pub struct LookupArgs {
    /// Cache resource name (cachedContents/...)
    #[arg(long)]
    pub name: Option<String>,

    /// Cache display name
    #[arg(long)]
    pub display_name: Option<String>,
}

impl LookupArgs {
    pub fn lookup(&self) -> CacheLookup {
        match (&self.name, &self.display_name) {
            (Some(name), _) => CacheLookup::Name(name.clone()),
            (None, Some(display_name)) => CacheLookup::DisplayName(display_name.clone()),
            (None, None) => unreachable!("clap group requires --name or --display-name"),
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct CreateArgs {
    /// Display name, unique within the account
    #[arg(long)]
    pub display_name: String,

    /// Model id; the configured default when omitted
    #[arg(long)]
    pub model: Option<String>,

    /// TTL in seconds; the configured default when omitted
    #[arg(long)]
    pub ttl: Option<u64>,

    /// Return an existing cache with the same display name instead of failing
    #[arg(long)]
    pub reuse: bool,
}

impl CreateArgs {
    pub fn options(&self) -> CreateOptions {
        let on_conflict = if self.reuse {
            OnConflict::GetExisting
        } else {
            OnConflict::RaiseError
        };

        CreateOptions {
            on_conflict,
            model: self.model.clone(),
            ttl: self.ttl,
        }
    }
}

/// Parse an optional `--generation-config` value.
pub fn generation_mode(raw: Option<&str>) -> serde_json::Result<GenerationMode> {
    match raw {
        Some(json) => Ok(GenerationMode::Custom(serde_json::from_str(json)?)),
        None => Ok(GenerationMode::Accurate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_text() {
        let args = Args::parse_from([
            "gemini-cache",
            "create-text",
            "some text",
            "--display-name",
            "notes",
            "--ttl",
            "600",
            "--reuse",
        ]);

        match args.command {
            Command::CreateText { text, options } => {
                assert_eq!(text, "some text");
                let options = options.options();
                assert_eq!(options.on_conflict, OnConflict::GetExisting);
                assert_eq!(options.ttl, Some(600));
                assert_eq!(options.model, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_requires_one_lookup() {
        assert!(Args::try_parse_from(["gemini-cache", "show"]).is_err());
        assert!(Args::try_parse_from([
            "gemini-cache",
            "show",
            "--name",
            "cachedContents/a",
            "--display-name",
            "b"
        ])
        .is_err());

        let args = Args::parse_from(["gemini-cache", "show", "--display-name", "notes"]);
        match args.command {
            Command::Show(lookup) => {
                assert_eq!(lookup.lookup(), CacheLookup::DisplayName("notes".to_string()))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generation_mode_parsing() {
        assert_eq!(generation_mode(None).unwrap(), GenerationMode::Accurate);
        assert_eq!(
            generation_mode(Some(r#"{"temperature": 1}"#)).unwrap(),
            GenerationMode::Custom(serde_json::json!({"temperature": 1}))
        );
        assert!(generation_mode(Some("not json")).is_err());
    }
}
