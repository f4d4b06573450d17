//! # chatpage CLI
//!
//! Command-line interface for the chatpage library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use chatpage::ChatpageError;
use chatpage::cli::{Args, SinkKind};
use chatpage::config::{Assets, ConvertConfig};
use chatpage::core::{Converter, DirectorySink, DocumentSink};
use chatpage::inputs::collect_inputs;
use chatpage::translation::Language;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "chatpage=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), ChatpageError> {
    let total_start = Instant::now();

    // Settings file first, flags on top
    let base = match &args.settings {
        Some(path) => ConvertConfig::from_json_file(path)?,
        None => ConvertConfig::default().with_language(locale_language()),
    };
    let config = args.apply(base);
    config.validate()?;
    let assets = Assets::load(args.style.as_deref(), args.loader.as_deref())?;

    println!("📦 chatpage v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for input in &args.inputs {
        println!("📂 Input:    {}", input.display());
    }
    println!("💾 Output:   {} ({})", args.output.display(), args.sink);
    println!("🌍 Language: {}", config.language);
    println!("📎 Media:    {}", config.encoding);
    if config.page_size > 0 {
        println!("📄 Per page: {} messages", config.page_size);
    }
    if !config.display_name.is_empty() {
        println!("👤 You:      {}", config.display_name);
    }
    println!();

    println!("⏳ Collecting inputs...");
    let files = collect_inputs(&args.inputs)?;
    let transcripts = files.iter().filter(|f| f.is_transcript()).count();
    println!(
        "   Found {} files ({} transcript{})",
        files.len(),
        transcripts,
        if transcripts == 1 { "" } else { "s" }
    );

    println!("🖨️  Rendering documents...");
    let mut sink = make_sink(args)?;
    let stats = Converter::new(&config, &assets).convert(&files, sink.as_mut())?;

    println!();
    if stats.documents == 0 {
        println!("⚠️  No messages found, nothing written");
    } else {
        println!("✅ Done! Output saved to {}", args.output.display());
    }

    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", stats.messages);
    println!("   Polls:     {}", stats.polls);
    println!("   Events:    {}", stats.events);
    println!("   Documents: {}", stats.documents);
    if !stats.is_complete() {
        println!("   Failed:    {}", stats.failed());
        for failure in &stats.failures {
            println!("     - {}", failure);
        }
    }
    for path in &stats.written {
        println!("   📄 {}", path.display());
    }

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    if total_time.as_secs_f64() > 0.0 {
        let msgs_per_sec = stats.messages as f64 / total_time.as_secs_f64();
        println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);
    }

    Ok(())
}

/// Export language guessed from `LANG`, English when unset.
fn locale_language() -> Language {
    std::env::var("LANG")
        .map(|locale| Language::from_locale(&locale))
        .unwrap_or_default()
}

fn make_sink(args: &Args) -> Result<Box<dyn DocumentSink>, ChatpageError> {
    match args.sink {
        SinkKind::Folder => Ok(Box::new(DirectorySink::new(&args.output))),
        #[cfg(feature = "archive")]
        SinkKind::Zip => Ok(Box::new(chatpage::core::ZipSink::new(&args.output))),
        #[cfg(not(feature = "archive"))]
        SinkKind::Zip => Err(ChatpageError::invalid_config(
            "sink",
            "zip output requires the `archive` feature",
        )),
    }
}
