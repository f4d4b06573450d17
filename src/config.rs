//! Conversion settings.
//!
//! [`ConvertConfig`] carries every user choice the pipeline needs (main user
//! name, page size, attachment encoding, export language, colours) and is
//! passed explicitly to each stage. [`Assets`] holds the stylesheet and loader
//! script embedded into every document.
//!
//! # Example
//!
//! ```rust
//! use chatpage::config::{ConvertConfig, EncodingMode};
//! use chatpage::translation::Language;
//!
//! let config = ConvertConfig::new()
//!     .with_display_name("Bob")
//!     .with_page_size(500)
//!     .with_encoding(EncodingMode::Sideband)
//!     .with_language(Language::It);
//!
//! assert_eq!(config.page_size, 500);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChatpageError, Result};
use crate::translation::Language;

/// How attachments are embedded into the generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Base64 data URL written straight into each element
    #[default]
    Inline,
    /// Elements reference the file name; one JSON map per document holds the data
    Sideband,
    /// Elements reference `./<file name>`; files are expected next to the document
    Path,
}

impl EncodingMode {
    /// Returns `true` if attachment bytes are read for this mode.
    pub fn reads_bytes(self) -> bool {
        !matches!(self, EncodingMode::Path)
    }

    /// Returns all supported mode names.
    pub fn all_names() -> &'static [&'static str] {
        &["inline", "sideband", "path"]
    }
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingMode::Inline => write!(f, "inline"),
            EncodingMode::Sideband => write!(f, "sideband"),
            EncodingMode::Path => write!(f, "path"),
        }
    }
}

impl std::str::FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inline" | "htmlkeep" => Ok(EncodingMode::Inline),
            "sideband" | "jskeep" => Ok(EncodingMode::Sideband),
            "path" | "relative" => Ok(EncodingMode::Path),
            _ => Err(format!(
                "Unknown encoding mode: '{}'. Expected one of: {}",
                s,
                EncodingMode::all_names().join(", ")
            )),
        }
    }
}

/// Default colour theme, written as CSS custom properties on `<body>`.
fn default_theme() -> BTreeMap<String, String> {
    [
        ("accent", "#0b8a6f"),
        ("background", "#efeae2"),
        ("card", "#ffffff"),
        ("text", "#111b21"),
        ("bubble-main", "#d9fdd3"),
        ("bubble-other", "#ffffff"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Settings for one conversion run.
///
/// Unknown fields in a settings file are rejected; missing ones take their
/// default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Name of the exporting user, as it appears in the transcript (default: empty)
    pub display_name: String,

    /// Base name for the output documents (default: derived from the authors)
    pub file_name: Option<String>,

    /// Messages per document; 0 puts everything in one document (default: 0)
    pub page_size: usize,

    /// Attachment embedding strategy (default: inline)
    pub encoding: EncodingMode,

    /// Language the export was written in (default: en)
    pub language: Language,

    /// CSS custom properties set on the document body
    pub theme: BTreeMap<String, String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            file_name: None,
            page_size: 0,
            encoding: EncodingMode::default(),
            language: Language::default(),
            theme: default_theme(),
        }
    }
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Loads settings from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that the type system cannot.
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.theme.keys().find(|k| !is_css_ident(k)) {
            return Err(ChatpageError::invalid_config(
                "theme",
                format!("'{}' is not a valid CSS property name", key),
            ));
        }
        if matches!(&self.file_name, Some(name) if name.contains(['/', '\\'])) {
            return Err(ChatpageError::invalid_config(
                "file_name",
                "must not contain path separators",
            ));
        }
        Ok(())
    }

    /// Sets the main user's display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Sets an explicit base name for the output documents.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Sets the number of messages per document.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the attachment encoding mode.
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingMode) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the export language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets one theme property, e.g. `("accent", "#ff0000")`.
    #[must_use]
    pub fn with_theme_color(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.theme.insert(key.into(), value.into());
        self
    }

    /// Renders the theme as an inline `style` attribute value.
    ///
    /// Double quotes in values become single quotes so the attribute stays intact.
    pub fn theme_style(&self) -> String {
        self.theme
            .iter()
            .map(|(k, v)| format!("--{}: {}", k, v.replace('"', "'")))
            .collect::<Vec<_>>()
            .join(";")
    }
}

fn is_css_ident(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Stylesheet and loader script embedded verbatim into every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    /// CSS placed in the document `<style>` element
    pub stylesheet: String,
    /// JavaScript that resolves `data-file-src` / `data-file-base64src` references at view time
    pub loader_script: String,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            stylesheet: include_str!("../assets/style.css").to_string(),
            loader_script: include_str!("../assets/loadContent.js").to_string(),
        }
    }
}

impl Assets {
    /// Returns the bundled assets, optionally replacing either file.
    pub fn load(stylesheet: Option<&Path>, loader_script: Option<&Path>) -> Result<Self> {
        let mut assets = Self::default();
        if let Some(path) = stylesheet {
            assets.stylesheet = fs::read_to_string(path)?;
        }
        if let Some(path) = loader_script {
            assets.loader_script = fs::read_to_string(path)?;
        }
        Ok(assets)
    }
}
