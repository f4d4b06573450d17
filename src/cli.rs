//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`SinkKind`] - where documents are written
//! - [`Encoding`] / [`Lang`] - clap-facing mirrors of the library enums
//!
//! [`Args::apply`] layers the flags on top of a [`ConvertConfig`], so a
//! settings file provides defaults and the command line overrides them.
//!
//! ```rust
//! use clap::Parser;
//! use chatpage::cli::Args;
//! use chatpage::config::{ConvertConfig, EncodingMode};
//!
//! let args = Args::parse_from(["chatpage", "chat.txt", "-u", "Bob", "-e", "sideband"]);
//! let config = args.apply(ConvertConfig::default());
//!
//! assert_eq!(config.display_name, "Bob");
//! assert_eq!(config.encoding, EncodingMode::Sideband);
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{ConvertConfig, EncodingMode};
use crate::translation::Language;

/// Convert WhatsApp chat exports into paginated, self-contained HTML pages.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpage")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpage \"WhatsApp Chat with Alice.txt\" media/
    chatpage export.zip -u Bob -p 500 -o pages
    chatpage chat.txt -e sideband --sink zip -n Family
    chatpage chat.txt -l it --theme accent=#ff0066")]
pub struct Args {
    /// Transcript, media files, folders or zipped exports
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Your name as it appears in the chat (shown on the right)
    #[arg(short = 'u', long, value_name = "NAME")]
    pub user: Option<String>,

    /// Base name of the generated files
    #[arg(short = 'n', long, value_name = "FILE_NAME")]
    pub name: Option<String>,

    /// Messages per document (0 = everything in one document)
    #[arg(short, long, value_name = "PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// How attachments are embedded
    #[arg(short, long, value_enum)]
    pub encoding: Option<Encoding>,

    /// Language of the export
    #[arg(short, long, value_enum)]
    pub language: Option<Lang>,

    /// Write documents to a folder or a single zip archive
    #[arg(long, value_enum, default_value = "folder")]
    pub sink: SinkKind,

    /// JSON settings file
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Replacement stylesheet
    #[arg(long, value_name = "FILE")]
    pub style: Option<PathBuf>,

    /// Replacement loader script
    #[arg(long, value_name = "FILE")]
    pub loader: Option<PathBuf>,

    /// Theme colour override, e.g. `accent=#ff0066`
    #[arg(long = "theme", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub theme: Vec<(String, String)>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies the flags on top of `config`.
    pub fn apply(&self, mut config: ConvertConfig) -> ConvertConfig {
        if let Some(user) = &self.user {
            config.display_name.clone_from(user);
        }
        if let Some(name) = &self.name {
            config.file_name = Some(name.clone());
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding.into();
        }
        if let Some(lang) = self.language {
            config.language = lang.into();
        }
        for (key, value) in &self.theme {
            config.theme.insert(key.clone(), value.clone());
        }
        config
    }
}

/// Where documents go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// One `.html` file per document
    #[default]
    #[value(alias = "dir")]
    Folder,

    /// All documents in `<name>.zip`
    Zip,
}

impl std::fmt::Display for SinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkKind::Folder => write!(f, "folder"),
            SinkKind::Zip => write!(f, "zip"),
        }
    }
}

/// Attachment encoding as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Encoding {
    /// Data URL inside each element
    #[value(alias = "htmlkeep")]
    Inline,
    /// One JSON map per document, shared by repeated references
    #[value(alias = "jskeep")]
    Sideband,
    /// Relative file references
    #[value(alias = "relative")]
    Path,
}

impl From<Encoding> for EncodingMode {
    fn from(encoding: Encoding) -> EncodingMode {
        match encoding {
            Encoding::Inline => EncodingMode::Inline,
            Encoding::Sideband => EncodingMode::Sideband,
            Encoding::Path => EncodingMode::Path,
        }
    }
}

/// Export language as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Lang {
    En,
    It,
    Es,
    De,
    Fr,
}

impl From<Lang> for Language {
    fn from(lang: Lang) -> Language {
        match lang {
            Lang::En => Language::En,
            Lang::It => Language::It,
            Lang::Es => Language::Es,
            Lang::De => Language::De,
            Lang::Fr => Language::Fr,
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
