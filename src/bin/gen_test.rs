//! Synthetic WhatsApp export generator for stress testing chatpage.
//!
//! Writes a transcript mixing plain text, multiline bodies, polls, events,
//! attachment references and system notifications, plus the referenced
//! media files as small dummy blobs.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output_dir] [mac]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_export

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const ZALGO_CHARS: &[char] = &[
    '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0304}', '\u{0305}', '\u{0306}', '\u{0307}',
    '\u{0308}', '\u{0309}', '\u{030A}', '\u{030B}', '\u{030C}', '\u{030D}', '\u{030E}', '\u{030F}',
];

const EMOJIS: &[&str] = &[
    "😀", "😂", "😍", "🤔", "😱", "🔥", "👍", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "村上",
    "محمد",
    "User \"Quoted\"",
    "<script>alert(1)</script>",
    "🔥FireUser🔥",
];

const MEDIA: &[&str] = &[
    "IMG-20240101-WA0001.jpg",
    "IMG-20240101-WA0002.webp",
    "VID-20240102-WA0003.mp4",
    "PTT-20240103-WA0004.opus",
    "DOC-20240104-WA0005.pdf",
    "STK-20240105-WA0006.webp",
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_export", String::as_str);
    let mac = args.get(3).is_some_and(|s| s == "mac");

    println!("🧪 Generating {} messages into {}/", count, output);

    if let Err(e) = generate(count, Path::new(output), mac) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }

    println!("✅ Done");
}

fn generate(count: usize, dir: &Path, mac: bool) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut rng = rand::thread_rng();

    let path = dir.join("WhatsApp Chat with Alice.txt");
    let mut out = BufWriter::new(File::create(&path)?);

    for i in 0..count {
        let stamp = timestamp(&mut rng, mac);
        let body = generate_body(&mut rng, i);

        // Roughly one in fifty lines is a system notification
        if rng.gen_range(0..50) == 0 {
            writeln!(out, "{stamp}Messages and calls are end-to-end encrypted")?;
            continue;
        }

        let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
        writeln!(out, "{stamp}{sender}: {body}")?;
    }
    out.flush()?;

    for name in MEDIA {
        let size = rng.gen_range(16..4096);
        let bytes: Vec<u8> = (0..size).map(|_| rng.gen_range(0..=255u8)).collect();
        fs::write(dir.join(name), bytes)?;
    }

    println!("📄 {}", path.display());
    Ok(())
}

fn timestamp(rng: &mut impl Rng, mac: bool) -> String {
    let day = rng.gen_range(1..=28);
    let month = rng.gen_range(1..=12);
    let hour = rng.gen_range(0..24);
    let minute = rng.gen_range(0..60);

    if mac {
        let second = rng.gen_range(0..60);
        format!("[{day:02}/{month:02}/2024, {hour:02}:{minute:02}:{second:02}] ")
    } else {
        format!("{month}/{day}/24, {hour}:{minute:02} - ")
    }
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match rng.gen_range(0..12) {
        0 => generate_poll(rng),
        1 => generate_event(rng, index),
        2 | 3 => {
            let media = MEDIA.choose(rng).copied().unwrap_or(MEDIA[0]);
            format!("{media} (file attached)")
        }
        4 => (0..rng.gen_range(2..6))
            .map(|n| format!("line {n} of message {index}"))
            .collect::<Vec<_>>()
            .join("\n"),
        5 => (0..rng.gen_range(1..20))
            .map(|_| *EMOJIS.choose(rng).unwrap_or(&"🙂"))
            .collect(),
        6 => generate_zalgo("This is zalgo text", rng),
        7 => "Check https://example.com/?a=1&b=<2> \"quoted\"".to_string(),
        8 => "\u{200E}left-to-right\u{00A0}mark\u{200F}".to_string(),
        _ => format!("Message number {index}"),
    }
}

fn generate_poll(rng: &mut impl Rng) -> String {
    let mut poll = String::from("POLL:\nWhere do we meet?");
    for option in ["Home", "Office", "Park (north side)"] {
        let votes = rng.gen_range(0..10);
        let unit = if votes == 1 { "vote" } else { "votes" };
        poll.push_str(&format!("\nOPTION: {option} ({votes} {unit})"));
    }
    poll
}

fn generate_event(rng: &mut impl Rng, index: usize) -> String {
    let start: i64 = rng.gen_range(1_600_000_000_000..1_800_000_000_000);
    let cancelled = rng.gen_bool(0.2);
    format!(
        "EVENT: Meetup #{index}\nEvent Start time: {start}\nEvent Description: Bring snacks\nEvent Location Name: Central Park\nEvent Cancelled: {cancelled}"
    )
}

fn generate_zalgo(text: &str, rng: &mut impl Rng) -> String {
    let mut result = String::new();
    for c in text.chars() {
        result.push(c);
        for _ in 0..rng.gen_range(1..=6) {
            result.push(ZALGO_CHARS[rng.gen_range(0..ZALGO_CHARS.len())]);
        }
    }
    result
}
