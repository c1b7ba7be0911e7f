//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static MUSIC: Emoji<'_, '_> = Emoji("🎵 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static GAUGE: Emoji<'_, '_> = Emoji("🎚️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!("    {} {}", MUSIC, style("mp4tomp3").cyan().bold());
    println!("    {}", style("Extract MP3 audio from your videos").dim());
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(movie_dir: &Path, output: &Path, bitrate: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:   {:<38}│",
        FOLDER,
        truncate_path(movie_dir, 37)
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        truncate_path(output, 37)
    );
    println!(
        "    │  {} Bitrate: {:<38}│",
        GAUGE,
        style(bitrate).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a header for the file being converted
pub fn print_file_header(name: &str) {
    println!();
    println!(
        "    {} {} {}",
        style("CONVERT").cyan().bold(),
        style("│").dim(),
        style(name).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print a warning or hint
pub fn print_hint(message: &str) {
    println!("    {} {}", style("Hint:").yellow().bold(), message);
}

/// Print indented engine diagnostics
pub fn print_diagnostics(diagnostics: &str) {
    for line in diagnostics.lines() {
        eprintln!("      {} {}", style("│").dim(), style(line).dim());
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
