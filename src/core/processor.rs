//! Conversion pipeline: inputs → messages → bundles → documents → sink.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::bundle::bundles;
use super::output::DocumentSink;
use crate::Message;
use crate::config::{Assets, ConvertConfig};
use crate::content::{ContentKind, classify};
use crate::error::{ChatpageError, Result};
use crate::inputs::InputFile;
use crate::message::clean_text;
use crate::parser::WhatsAppParser;
use crate::render::{DocumentRenderer, base_name, document_name};
use crate::translation::TranslationTable;

/// Statistics about one conversion run.
#[derive(Debug, Default)]
pub struct ConversionStats {
    pub messages: usize,
    pub polls: usize,
    pub events: usize,
    /// Documents handed to the sink
    pub documents: usize,
    /// Bundles that could not be rendered or stored
    pub failures: Vec<ChatpageError>,
    /// Base name shared by the documents
    pub base_name: String,
    /// Paths reported by the sink
    pub written: Vec<PathBuf>,
    pub elapsed_secs: f64,
}

impl ConversionStats {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Returns `true` if every bundle made it to the sink.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the whole pipeline.
///
/// # Example
///
/// ```rust
/// use chatpage::config::{Assets, ConvertConfig};
/// use chatpage::core::Converter;
/// use chatpage::core::output::MemorySink;
/// use chatpage::inputs::InputFile;
///
/// let config = ConvertConfig::new().with_display_name("Bob").with_page_size(1);
/// let assets = Assets::default();
/// let files = vec![InputFile::from_bytes(
///     "chat.txt",
///     b"1/1/24, 10:00 - Alice: Hi\n1/1/24, 10:01 - Bob: Hello\n".to_vec(),
/// )];
///
/// let mut sink = MemorySink::new();
/// let stats = Converter::new(&config, &assets).convert(&files, &mut sink)?;
///
/// assert_eq!(stats.documents, 2);
/// assert_eq!(sink.documents()[0].name, "[0-1] Alice.html");
/// # Ok::<(), chatpage::ChatpageError>(())
/// ```
pub struct Converter<'a> {
    config: &'a ConvertConfig,
    assets: &'a Assets,
    table: &'a TranslationTable,
}

impl<'a> Converter<'a> {
    pub fn new(config: &'a ConvertConfig, assets: &'a Assets) -> Self {
        Self {
            config,
            assets,
            table: TranslationTable::builtin(),
        }
    }

    /// Replaces the translation table used for markers and labels.
    #[must_use]
    pub fn with_table(mut self, table: &'a TranslationTable) -> Self {
        self.table = table;
        self
    }

    /// Parses every transcript among `files`.
    ///
    /// Fails with [`ChatpageError::NoTranscript`] when there is none.
    pub fn parse(&self, files: &[InputFile]) -> Result<Vec<Message>> {
        if !files.iter().any(InputFile::is_transcript) {
            return Err(ChatpageError::NoTranscript);
        }
        WhatsAppParser::new(self.config)
            .with_table(self.table)
            .parse_inputs(files)
    }

    /// Converts `files` and hands every document to `sink`.
    ///
    /// A bundle that fails is logged and recorded in the stats; the run goes
    /// on with the next one. The sink is finished only if at least one
    /// document was accepted.
    pub fn convert(&self, files: &[InputFile], sink: &mut dyn DocumentSink) -> Result<ConversionStats> {
        let started = Instant::now();
        self.config.validate()?;

        let messages = self.parse(files)?;
        let mut stats = ConversionStats {
            messages: messages.len(),
            base_name: base_name(self.config, &messages),
            ..ConversionStats::default()
        };
        self.count_special(&messages, &mut stats);

        let renderer = DocumentRenderer::new(self.config, self.assets, files).with_table(self.table);

        for bundle in bundles(&messages, self.config.page_size) {
            let outcome = renderer
                .render(&bundle, &stats.base_name)
                .and_then(|document| sink.accept(&document));

            match outcome {
                Ok(()) => stats.documents += 1,
                Err(e) => {
                    let name = document_name(bundle.start, bundle.end(), &stats.base_name);
                    warn!(document = %name, error = %e, "skipping bundle");
                    stats.failures.push(ChatpageError::render(name, e.to_string()));
                }
            }
        }

        if stats.documents > 0 {
            stats.written = sink.finish(&stats.base_name)?;
        } else {
            debug!("no documents produced, sink left unfinished");
        }

        stats.elapsed_secs = started.elapsed().as_secs_f64();
        info!(
            messages = stats.messages,
            documents = stats.documents,
            failed = stats.failed(),
            "conversion finished"
        );
        Ok(stats)
    }

    fn count_special(&self, messages: &[Message], stats: &mut ConversionStats) {
        for msg in messages {
            match classify(&clean_text(&msg.text), self.config.language, self.table).kind() {
                ContentKind::Poll => stats.polls += 1,
                ContentKind::Event => stats.events += 1,
                ContentKind::Plain => {}
            }
        }
    }
}
