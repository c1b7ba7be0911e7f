//! Tables for candidate files and media metadata

use std::path::{Path, PathBuf};

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::converter::MediaInfo;
use crate::utils::format_file_size;

/// Build the numbered candidate table (1-based indices).
pub fn candidate_table(candidates: &[PathBuf]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("File").add_attribute(Attribute::Bold),
        Cell::new("Size").add_attribute(Attribute::Bold),
    ]);

    for (i, path) in candidates.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let size = std::fs::metadata(path)
            .map(|m| format_file_size(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());

        table.add_row(vec![
            Cell::new(i + 1)
                .fg(Color::Cyan)
                .set_alignment(CellAlignment::Right),
            Cell::new(name).fg(Color::Magenta),
            Cell::new(size)
                .fg(Color::Green)
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Print the candidate table under a title naming the directory.
pub fn display_candidates(directory: &Path, candidates: &[PathBuf]) {
    println!();
    println!(
        "    {} {} {}",
        style("🎬").cyan(),
        style(format!("Video files in {}", directory.display()))
            .white()
            .bold(),
        style(format!("({})", candidates.len())).dim()
    );
    println!("    {}", style("─".repeat(50)).dim());

    for line in candidate_table(candidates).to_string().lines() {
        println!("    {}", line);
    }
}

/// Build the metadata card for one file.
pub fn media_info_table(info: &MediaInfo) -> Table {
    let unknown = || "unknown".to_string();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let rows = [
        ("File", info.file_name.clone()),
        ("Size", format_file_size(info.file_size_bytes)),
        ("Duration", info.duration()),
        ("Format", info.container_format_name.clone()),
        (
            "Video codec",
            info.video_codec.clone().unwrap_or_else(|| "none".to_string()),
        ),
        ("Audio codec", info.audio_codec.clone().unwrap_or_else(unknown)),
        (
            "Audio bitrate",
            info.audio_bitrate_bps
                .map(|b| format!("{} kbps", b / 1000))
                .unwrap_or_else(unknown),
        ),
        (
            "Sample rate",
            info.sample_rate_hz
                .map(|r| format!("{} Hz", r))
                .unwrap_or_else(unknown),
        ),
    ];

    for (field, value) in rows {
        table.add_row(vec![
            Cell::new(field).fg(Color::Cyan),
            Cell::new(value).fg(Color::Green),
        ]);
    }

    table
}

/// Print the metadata card.
pub fn display_media_info(info: &MediaInfo) {
    for line in media_info_table(info).to_string().lines() {
        println!("    {}", line);
    }
}
