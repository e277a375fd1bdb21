//! Basic INI Usage
//!
//! This example demonstrates parsing, querying, editing, and rewriting an
//! INI document, plus file persistence through the profile layer.
//!
//! Run with: `cargo run --example basic`

use ini::{LayoutMode, ParseOptions, Profile, WriteOptions, parse, serialize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== dx-ini: Basic Usage ===\n");

    // =========================================================================
    // Part 1: Parse and query
    // =========================================================================

    let source = "\
; application settings
[server]
host = example.org
port = 8080

[ui]
theme = dark
";

    let mut doc = parse(source, ParseOptions::default())?;
    println!("1. Parsed {} section(s): {:?}", doc.section_count(), doc.read_sections());
    println!("   server.host  = {:?}", doc.get_value("server", "host"));
    // Names compare case-insensitively by default
    println!("   SERVER.PORT  = {:?}", doc.get_value("SERVER", "PORT"));
    // Missing entries substitute the caller's default
    println!("   server.proxy = {:?}\n", doc.read_value("server", "proxy", "none"));

    // =========================================================================
    // Part 2: Edit and rewrite canonically
    // =========================================================================

    doc.set_value("server", "port", "9090")?;
    doc.set_value("limits", "max_connections", "64")?;
    doc.delete_key("ui", "theme");

    println!("2. Canonical serialization after edits:");
    println!("{}", serialize(&doc, WriteOptions::default()));

    // =========================================================================
    // Part 3: Layout preservation
    // =========================================================================

    let options = ParseOptions::default().with_layout(LayoutMode::Preserve);
    let mut preserved = parse(source, options)?;
    preserved.set_value("server", "port", "9090")?;

    println!("3. Preserve mode keeps the comment through an edit:");
    println!("{}", serialize(&preserved, WriteOptions::default()));

    // =========================================================================
    // Part 4: Profile files
    // =========================================================================

    let path = std::env::temp_dir().join("dx-ini-basic-example.ini");
    let mut profile = Profile::create(&path);
    profile.write_value("window", "width", "1280")?;
    profile.write_value("window", "height", "720")?;
    profile.save()?;

    let reopened = Profile::open(&path)?;
    println!("4. Reloaded profile from {:?}:", reopened.path());
    println!("   window.width = {}", reopened.read_value("window", "width", "?"));

    std::fs::remove_file(&path).ok();
    Ok(())
}
