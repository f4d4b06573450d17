//! Attachment resolution.
//!
//! A WhatsApp export refers to media by file name inside the message body,
//! e.g. `IMG-20240101-WA0001.jpg (file attached)`. This module finds those
//! names, splits the body around them and decides how each file ends up in
//! the document:
//!
//! - [`EncodingMode::Inline`] - a base64 data URL on the element itself
//! - [`EncodingMode::Sideband`] - the element names the file; one JSON map per
//!   document carries the data URLs
//! - [`EncodingMode::Path`] - a relative reference, bytes are never read
//!
//! # Example
//!
//! ```rust
//! use chatpage::attachments::{Segment, tokenize};
//! use chatpage::inputs::InputFile;
//!
//! let files = vec![InputFile::from_bytes("cat.jpg", vec![1, 2, 3])];
//! let segments = tokenize(" cat.jpg (file attached)", &files);
//!
//! assert_eq!(segments.len(), 3);
//! assert!(matches!(segments[1], Segment::Attachment(f) if f.name() == "cat.jpg"));
//! ```

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::config::EncodingMode;
use crate::error::Result;
use crate::inputs::InputFile;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "webp", "jpeg", "avif", "gif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "aac", "m4a", "opus", "ogg", "wav", "flac", "alac"];

/// Media category of an attachment, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    /// Anything else, rendered as a download link
    Other,
}

impl MediaKind {
    /// Categorises a lowercased extension.
    pub fn from_extension(ext: &str) -> Self {
        if IMAGE_EXTENSIONS.contains(&ext) {
            MediaKind::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            MediaKind::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }

    /// Returns the HTML element used to show this kind, `None` for links.
    pub fn element(self) -> Option<&'static str> {
        match self {
            MediaKind::Image => Some("img"),
            MediaKind::Video => Some("video"),
            MediaKind::Audio => Some("audio"),
            MediaKind::Other => None,
        }
    }

    fn mime_prefix(self) -> Option<&'static str> {
        match self {
            MediaKind::Image => Some("image"),
            MediaKind::Video => Some("video"),
            MediaKind::Audio => Some("audio"),
            MediaKind::Other => None,
        }
    }
}

/// Returns the mime type announced for `file`.
///
/// ```rust
/// use chatpage::attachments::mime_type;
/// use chatpage::inputs::InputFile;
///
/// assert_eq!(mime_type(&InputFile::from_bytes("a.JPEG", vec![])), "image/jpg");
/// assert_eq!(mime_type(&InputFile::from_bytes("clip.mov", vec![])), "video/quicktime");
/// assert_eq!(mime_type(&InputFile::from_bytes("doc.pdf", vec![])), "application/octet-stream");
/// ```
pub fn mime_type(file: &InputFile) -> String {
    let ext = file.extension();
    match MediaKind::from_extension(&ext).mime_prefix() {
        Some(prefix) => {
            let subtype = match ext.as_str() {
                "jpeg" => "jpg",
                "mkv" => "x-matroska",
                "mov" => "quicktime",
                other => other,
            };
            format!("{prefix}/{subtype}")
        }
        None => "application/octet-stream".to_string(),
    }
}

/// How one referenced file is embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub file_name: String,
    pub mime_type: String,
    pub kind: MediaKind,
    pub encoding: EncodingMode,
}

/// A piece of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Attachment(&'a InputFile),
}

/// Returns the files whose names occur in `text`, ordered by first occurrence.
pub fn referenced_files<'f>(text: &str, files: &'f [InputFile]) -> Vec<&'f InputFile> {
    let mut found: Vec<(usize, &InputFile)> = files
        .iter()
        .filter(|f| !f.name().is_empty())
        .filter_map(|f| text.find(f.name()).map(|pos| (pos, f)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, f)| f).collect()
}

/// Splits `text` into text and attachment segments.
///
/// At each step the earliest occurring file name wins; on a tie the longest
/// name wins. Empty text segments are skipped.
pub fn tokenize<'a>(text: &'a str, files: &'a [InputFile]) -> Vec<Segment<'a>> {
    let candidates = referenced_files(text, files);
    let mut segments = Vec::new();
    let mut rest = text;

    loop {
        let next = candidates
            .iter()
            .filter_map(|f| rest.find(f.name()).map(|pos| (pos, *f)))
            .min_by(|(pa, fa), (pb, fb)| {
                pa.cmp(pb).then_with(|| fb.name().len().cmp(&fa.name().len()))
            });

        let Some((pos, file)) = next else {
            break;
        };
        if pos > 0 {
            segments.push(Segment::Text(&rest[..pos]));
        }
        segments.push(Segment::Attachment(file));
        rest = &rest[pos + file.name().len()..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// Resolves attachments for one document.
///
/// Data URLs are cached by file name, so a file referenced many times is
/// read once and appears once in the sideband map.
#[derive(Debug, Default)]
pub struct AttachmentStore {
    mode: EncodingMode,
    data_urls: BTreeMap<String, String>,
}

impl AttachmentStore {
    /// Creates an empty store.
    pub fn new(mode: EncodingMode) -> Self {
        Self {
            mode,
            data_urls: BTreeMap::new(),
        }
    }

    /// Returns the encoding mode.
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Resolves `file`, reading its bytes when the mode embeds them.
    pub fn resolve(&mut self, file: &InputFile) -> AttachmentRef {
        let mime = mime_type(file);
        if self.mode.reads_bytes() && !self.data_urls.contains_key(file.name()) {
            let url = data_url(file, &mime);
            self.data_urls.insert(file.name().to_string(), url);
        }

        AttachmentRef {
            file_name: file.name().to_string(),
            kind: MediaKind::from_extension(&file.extension()),
            mime_type: mime,
            encoding: self.mode,
        }
    }

    /// Returns the cached data URL of a resolved file.
    pub fn data_url(&self, file_name: &str) -> Option<&str> {
        self.data_urls.get(file_name).map(String::as_str)
    }

    /// Returns the number of cached files.
    pub fn len(&self) -> usize {
        self.data_urls.len()
    }

    /// Returns `true` if nothing was cached.
    pub fn is_empty(&self) -> bool {
        self.data_urls.is_empty()
    }

    /// Serialises the name → data URL map for embedding in a `<script>` element.
    pub fn sideband_json(&self) -> Result<String> {
        let json = serde_json::to_string(&self.data_urls)?;
        Ok(json.replace("</", "<\\/"))
    }
}

fn data_url(file: &InputFile, mime: &str) -> String {
    match file.read() {
        Ok(bytes) => {
            debug!(file = file.name(), size = bytes.len(), "encoding attachment");
            format!("data:{mime};base64,{}", STANDARD.encode(&bytes))
        }
        Err(e) => {
            warn!(file = file.name(), error = %e, "could not read attachment");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> InputFile {
        InputFile::from_bytes(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_media_kind() {
        assert_eq!(MediaKind::from_extension("webp"), MediaKind::Image);
        assert_eq!(MediaKind::from_extension("mkv"), MediaKind::Video);
        assert_eq!(MediaKind::from_extension("opus"), MediaKind::Audio);
        assert_eq!(MediaKind::from_extension("pdf"), MediaKind::Other);
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type(&file("a.png")), "image/png");
        assert_eq!(mime_type(&file("a.mkv")), "video/x-matroska");
        assert_eq!(mime_type(&file("a.m4a")), "audio/m4a");
        assert_eq!(mime_type(&file("a.vcf")), "application/octet-stream");
    }

    #[test]
    fn test_referenced_files_order() {
        let files = vec![file("b.jpg"), file("a.jpg"), file("unused.png")];
        let found = referenced_files("a.jpg then b.jpg", &files);
        let names: Vec<_> = found.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_tokenize_plain() {
        let files = vec![file("a.jpg")];
        assert_eq!(tokenize(" hello", &files), vec![Segment::Text(" hello")]);
        assert!(tokenize("", &files).is_empty());
    }

    #[test]
    fn test_tokenize_repeated_reference() {
        let files = vec![file("a.jpg")];
        let segments = tokenize("a.jpg and a.jpg", &files);
        assert_eq!(
            segments,
            vec![
                Segment::Attachment(&files[0]),
                Segment::Text(" and "),
                Segment::Attachment(&files[0]),
            ]
        );
    }

    #[test]
    fn test_tokenize_longest_name_wins() {
        let files = vec![file("a.jp"), file("a.jpg")];
        let segments = tokenize(" a.jpg!", &files);
        assert_eq!(
            segments,
            vec![
                Segment::Text(" "),
                Segment::Attachment(&files[1]),
                Segment::Text("!"),
            ]
        );
    }

    #[test]
    fn test_store_caches_once() {
        let files = vec![file("a.jpg")];
        let mut store = AttachmentStore::new(EncodingMode::Sideband);
        store.resolve(&files[0]);
        store.resolve(&files[0]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.data_url("a.jpg"), Some("data:image/jpg;base64,YS5qcGc="));
    }

    #[test]
    fn test_path_mode_reads_nothing() {
        let missing = InputFile::from_path("/not/here/a.jpg");
        let mut store = AttachmentStore::new(EncodingMode::Path);
        let attachment = store.resolve(&missing);

        assert_eq!(attachment.encoding, EncodingMode::Path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_unreadable_file_is_empty_payload() {
        let missing = InputFile::from_path("/not/here/a.jpg");
        let mut store = AttachmentStore::new(EncodingMode::Inline);
        store.resolve(&missing);
        assert_eq!(store.data_url("a.jpg"), Some(""));
    }

    #[test]
    fn test_sideband_json_escapes_script_end() {
        let mut store = AttachmentStore::new(EncodingMode::Sideband);
        store.resolve(&InputFile::from_bytes("x</script>.txt", vec![]));
        let json = store.sideband_json().unwrap();
        assert!(!json.contains("</"));
        assert!(json.contains("x<\\/script>.txt"));
    }
}
