//! CLI output formatting for `wallgen generate`.
//!
//! # Output Format
//!
//! ```text
//! ========================================
//!    WallGen - High-Quality Wallpaper Generator
//! ========================================
//! Input: photos/mountain-4k.jpg
//! Output Dir: output
//! Format: jpg, Quality: 95
//! ----------------------------------------
//! Loading source image...
//! Generating wallpapers...
//!   -> Processing 1366x768... DONE
//!   -> Processing 3840x2160... DONE (upscaled)
//!   -> Processing 1080x2400... FAILED: IO error: ...
//! ----------------------------------------
//! All tasks completed in 1.42s (1 failed)
//! ========================================
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability. Format functions are pure and do no I/O. The
//! binary prints their lines as events arrive.

use crate::batch::{BatchEvent, BatchReport};
use crate::imaging::ExportSettings;
use std::path::Path;
use std::time::Duration;

const HEAVY_RULE: &str = "========================================";
const LIGHT_RULE: &str = "----------------------------------------";

/// Banner printed before a batch starts.
pub fn format_banner(input: &Path, output_dir: &Path, settings: &ExportSettings) -> Vec<String> {
    vec![
        HEAVY_RULE.to_string(),
        "   WallGen - High-Quality Wallpaper Generator".to_string(),
        HEAVY_RULE.to_string(),
        format!("Input: {}", input.display()),
        format!("Output Dir: {}", output_dir.display()),
        format!(
            "Format: {}, Quality: {}",
            settings.format,
            settings.quality.value()
        ),
        LIGHT_RULE.to_string(),
    ]
}

/// Format a single progress event.
///
/// `Started` and `Finished` produce fragments of the same line, so callers
/// should `print!` each returned line without a trailing newline and rely on
/// the embedded `\n` terminators.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Loading { .. } => vec![
            "Loading source image...\n".to_string(),
            "Generating wallpapers...\n".to_string(),
        ],
        BatchEvent::Started { resolution } => {
            vec![format!("  -> Processing {}... ", resolution)]
        }
        BatchEvent::Finished { status, .. } => match status {
            Ok(false) => vec!["DONE\n".to_string()],
            Ok(true) => vec!["DONE (upscaled)\n".to_string()],
            Err(msg) => vec![format!("FAILED: {}\n", msg)],
        },
    }
}

/// Human-friendly elapsed time: `850ms`, `1.42s`, `2m 03s`.
fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        let secs = elapsed.as_secs();
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Footer printed after a batch completes.
pub fn format_footer(report: &BatchReport) -> Vec<String> {
    let failed = report.failed().count();
    let summary = if failed == 0 {
        format!("All tasks completed in {}", format_elapsed(report.elapsed))
    } else {
        format!(
            "All tasks completed in {} ({} failed)",
            format_elapsed(report.elapsed),
            failed
        )
    };
    vec![LIGHT_RULE.to_string(), summary, HEAVY_RULE.to_string()]
}

/// Print lines to stdout, one per line.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
