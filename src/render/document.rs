//! Bundle → self-contained HTML document.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Element, Node, escape_html};
use crate::Message;
use crate::attachments::{AttachmentRef, AttachmentStore, MediaKind, Segment, tokenize};
use crate::config::{Assets, ConvertConfig, EncodingMode};
use crate::content::{EventInfo, PollInfo, SpecialContent, classify};
use crate::core::bundle::Bundle;
use crate::error::Result;
use crate::inputs::InputFile;
use crate::message::clean_text;
use crate::translation::{Phrase, TranslationTable};

/// A rendered page, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name, `[start-end] base.html`
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Returns the content as text.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Returns the document name for the message range `start..end`.
///
/// ```rust
/// use chatpage::render::document_name;
///
/// assert_eq!(document_name(0, 500, "Alice"), "[0-500] Alice.html");
/// ```
pub fn document_name(start: usize, end: usize, base: &str) -> String {
    format!("[{start}-{end}] {base}.html")
}

/// Picks the base name shared by all documents of a run.
///
/// The configured file name wins, then the first author that is not the
/// main user, then the first author. Author-derived names have characters
/// that are not allowed in file names replaced with `_`.
pub fn base_name(config: &ConvertConfig, messages: &[Message]) -> String {
    if let Some(name) = config.file_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    messages
        .iter()
        .find(|m| !m.is_main_user)
        .or_else(|| messages.first())
        .map(|m| sanitize_file_name(&m.author))
        .unwrap_or_default()
}

/// Replaces path separators, reserved and control characters with `_`.
///
/// ```rust
/// use chatpage::render::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Mom/Dad"), "Mom_Dad");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    const RESERVED: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let cleaned: String = name
        .chars()
        .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    // No leading dots
    match cleaned.trim_start_matches('.') {
        rest if rest.len() == cleaned.len() => cleaned,
        rest => format!("_{rest}"),
    }
}

/// Renders bundles into documents.
pub struct DocumentRenderer<'a> {
    config: &'a ConvertConfig,
    assets: &'a Assets,
    files: &'a [InputFile],
    table: &'a TranslationTable,
}

impl<'a> DocumentRenderer<'a> {
    /// Creates a renderer resolving attachments against `files`.
    pub fn new(config: &'a ConvertConfig, assets: &'a Assets, files: &'a [InputFile]) -> Self {
        Self {
            config,
            assets,
            files,
            table: TranslationTable::builtin(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: &'a TranslationTable) -> Self {
        self.table = table;
        self
    }

    /// Renders one bundle.
    ///
    /// Attachment data is cached for the duration of this call only, so
    /// each document carries its own sideband map.
    pub fn render(&self, bundle: &Bundle<'_>, base_name: &str) -> Result<Document> {
        let mut store = AttachmentStore::new(self.config.encoding);

        let bubbles: Vec<Node> = bundle
            .messages
            .iter()
            .map(|msg| self.bubble(msg, &mut store))
            .collect();

        let mut container = Element::new("div").children(bubbles);
        if self.config.encoding == EncodingMode::Sideband {
            container = container.child(
                Element::new("script")
                    .attr("type", "application/json")
                    .attr("id", "base64")
                    .raw(store.sideband_json()?),
            );
        }

        let html = format!(
            "<!DOCTYPE html><head><meta charset=\"UTF-8\"><style>{}</style><body style=\"{}\">{}<script>{}</script></body>",
            self.assets.stylesheet,
            escape_html(&self.config.theme_style()),
            Node::from(container).to_html(),
            self.assets.loader_script,
        );

        let name = document_name(bundle.start, bundle.end(), base_name);
        debug!(document = %name, messages = bundle.len(), attachments = store.len(), "rendered bundle");

        Ok(Document {
            name,
            bytes: html.into_bytes(),
        })
    }

    fn bubble(&self, msg: &Message, store: &mut AttachmentStore) -> Node {
        let side = if msg.is_main_user { "flRight" } else { "flLeft" };
        let mut label = format!("{} [{}]", msg.author, msg.date);

        let language = self.config.language;
        let body: Vec<Node> = match classify(&clean_text(&msg.text), language, self.table) {
            SpecialContent::Poll(poll) => {
                label.push_str(" — ");
                label.push_str(self.table.get(Phrase::AutodetectedPoll, language));
                vec![Node::from(poll_card(&poll))]
            }
            SpecialContent::Event(event) => {
                label.push_str(" — ");
                label.push_str(self.table.get(Phrase::AutodetectedEvent, language));
                vec![Node::from(event_card(&event))]
            }
            SpecialContent::Plain => self.plain_nodes(&msg.text, store),
        };

        Element::new("div")
            .class(format!("bubble {side}"))
            .child(Element::new("label").class("authorText").text(label))
            .children(body)
            .into()
    }

    fn plain_nodes(&self, text: &str, store: &mut AttachmentStore) -> Vec<Node> {
        let segments = tokenize(text, self.files);
        if segments.is_empty() {
            return vec![Element::new("label").text(text).into()];
        }

        segments
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(t) => Node::from(Element::new("label").text(t)),
                Segment::Attachment(file) => {
                    let attachment = store.resolve(file);
                    Node::from(media_node(&attachment, store))
                }
            })
            .collect()
    }
}

fn media_node(attachment: &AttachmentRef, store: &AttachmentStore) -> Element {
    let name = attachment.file_name.as_str();
    let data_url = || store.data_url(name).unwrap_or_default().to_string();

    let Some(tag) = attachment.kind.element() else {
        let link = Element::new("a").class("colorCard").text(name);
        return match attachment.encoding {
            EncodingMode::Inline => link.attr("href", data_url()).attr("download", name),
            EncodingMode::Sideband => link.attr("data-file-base64src", name),
            EncodingMode::Path => link.attr("href", format!("./{name}")),
        };
    };

    let element = Element::new(tag);
    let element = match attachment.encoding {
        EncodingMode::Inline => element.attr("src", data_url()),
        EncodingMode::Sideband => element
            .attr("data-mimetype", attachment.mime_type.as_str())
            .attr("data-file-base64src", name),
        EncodingMode::Path => element.attr("data-file-src", name),
    };
    if attachment.kind == MediaKind::Image {
        element
    } else {
        element.flag("controls")
    }
}

fn poll_card(poll: &PollInfo) -> Element {
    let options = poll.options.iter().map(|option| {
        let row = Element::new("div")
            .class("pollOption")
            .attr(
                "style",
                format!(
                    "background: linear-gradient(to right, var(--accent) {}%,var(--card) 0%);",
                    option.vote_percentage
                ),
            )
            .text(option.label.as_str());
        Node::from(row)
    });

    Element::new("div")
        .class("colorCard")
        .child(Element::new("h3").text(poll.title.as_str()))
        .children(options)
}

fn event_card(event: &EventInfo) -> Element {
    let mut start = format_start_time(event.start_time_millis);
    if event.cancelled {
        start.push_str(" — Cancelled");
    }

    let mut rows = vec![info_row(Element::new("p").text(start))];
    if let Some(description) = &event.description {
        rows.push(info_row(Element::new("p").text(description.as_str())));
    }
    if let Some(link) = &event.join_link {
        rows.push(info_row(
            Element::new("a")
                .attr("href", link.as_str())
                .attr("target", "_blank")
                .text(link.as_str()),
        ));
    }
    if let Some(location) = &event.location_name {
        let text = match &event.location_point {
            Some(point) => format!("{location} [{point}]"),
            None => location.clone(),
        };
        rows.push(info_row(Element::new("p").text(text)));
    }

    Element::new("div")
        .class("colorCard")
        .child(Element::new("h3").text(event.title.as_str()))
        .children(rows)
}

fn info_row(content: Element) -> Node {
    Element::new("div")
        .class("eventInfoContainer")
        .child(content)
        .into()
}

/// Formats epoch milliseconds as a UTC date, `Invalid Date` when missing or out of range.
pub(crate) fn format_start_time(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || "Invalid Date".to_string(),
            |dt| dt.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
        )
}
