//! Core pipeline of chatpage.
//!
//! This module contains:
//! - [`bundle`] - pagination of the message sequence
//! - [`output`] - document sinks (folder, zip, memory)
//! - [`processor`] - the [`Converter`] tying parsing, rendering and output together
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # fn main() -> chatpage::Result<()> {
//! use chatpage::config::{Assets, ConvertConfig};
//! use chatpage::core::{Converter, DirectorySink};
//! use chatpage::inputs::collect_inputs;
//!
//! let files = collect_inputs(&["WhatsApp Chat with Alice.txt", "media/"])?;
//! let config = ConvertConfig::new().with_display_name("Bob").with_page_size(500);
//! let assets = Assets::default();
//!
//! let mut sink = DirectorySink::new("out");
//! let stats = Converter::new(&config, &assets).convert(&files, &mut sink)?;
//! println!("{} documents", stats.documents);
//! # Ok(())
//! # }
//! ```

pub mod bundle;
pub mod output;
pub mod processor;

pub use bundle::{Bundle, bundles};
pub use output::{DirectorySink, DocumentSink, MemorySink};
#[cfg(feature = "archive")]
pub use output::ZipSink;
pub use processor::{ConversionStats, Converter};

// Re-export Message from the crate root
pub use crate::Message;
