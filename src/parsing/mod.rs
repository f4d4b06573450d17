//! Shared parsing utilities.
//!
//! Timestamp-boundary segmentation and dialect detection for WhatsApp
//! transcripts. [`crate::parser::WhatsAppParser`] builds messages on top of it.

pub mod whatsapp;

// Re-export commonly used items
pub use whatsapp::{Dialect, RawEntry, detect_dialect, split_entries};
