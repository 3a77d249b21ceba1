//! CLI progress display utilities
//!
//! Step indicators, emoji and progress bars for the command-line tool.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("\u{1f50d} ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("\u{1f4be} ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("\u{2728} ", "");
/// Truck - for batch operations
pub static TRUCK: Emoji<'_, '_> = Emoji("\u{1f69a} ", "");
/// Ruler - for 3D model operations
pub static CUBE: Emoji<'_, '_> = Emoji("\u{1f4d0} ", "");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/2] Message...`
///
/// # Example
/// ```ignore
/// print_step(1, 2, LOOKING_GLASS, "Decoding ship.xac...");
/// print_step(2, 2, DISK, "Writing ship.json...");
/// ```
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

// =============================================================================
// Progress Styles
// =============================================================================

/// Progress bar style for determinate progress
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
}

/// Create a simple progress bar
#[must_use]
pub fn simple_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}
