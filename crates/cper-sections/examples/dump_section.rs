//! Simple decoder to inspect Platform Action Event section files.

use std::fs;

use cper_sections::section_to_ir;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "section.bin".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let (ir, desc) = section_to_ir(&data).expect("Failed to decode");

    println!("\n{}", desc);
    println!(
        "{}",
        serde_json::to_string_pretty(&ir).expect("Failed to render IR")
    );
}
