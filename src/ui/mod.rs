//! Terminal output helpers shared by the commands
//!
//! Colors approximate the design palette with 256-color codes:
//! PRIMARY (#64B5F6) ≈ 117, SUCCESS (#A5D6A7) ≈ 114, AI_ACCENT (#FFCA28) ≈ 220,
//! ERROR (#EF9A9A) ≈ 210, MUTED (#546E7A) ≈ 242, FG (#D4D4D7) ≈ 252.

use std::time::Duration;

use console::{Color, Style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::context::Omission;

pub mod symbols {
    pub const AI_ICON: &str = "󰌤";
    pub const FILE: &str = "󰈙";
    pub const FOLDER: &str = "󰉋";
    pub const DIFF: &str = "󰦓";
    pub const ERROR: &str = "󰅚";
    pub const SKIP: &str = "󰒭";
    pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}

fn style(code: u8) -> Style {
    Style::new().fg(Color::Color256(code))
}

fn primary() -> Style {
    style(117).bold()
}

fn success() -> Style {
    style(114)
}

fn accent() -> Style {
    style(220)
}

fn error() -> Style {
    style(210)
}

fn muted() -> Style {
    style(242)
}

fn fg() -> Style {
    style(252)
}

pub fn print_header(title: &str, detail: Option<&str>) {
    println!();
    println!("  {}", primary().apply_to(format!("{} {}", symbols::AI_ICON, title)));
    if let Some(detail) = detail {
        println!("{} {}", muted().apply_to("  │"), fg().apply_to(detail));
    }
    println!("{}", muted().apply_to(format!("  ╰{}─", "─".repeat(50))));
    println!();
}

pub fn print_target(path: &str, is_dir: bool) {
    let icon = if is_dir { symbols::FOLDER } else { symbols::FILE };
    println!("  {}", muted().apply_to(format!("{} Context: {}", icon, path)));
    println!();
}

/// Spinner shown while waiting on the model
pub fn thinking_spinner(provider: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .template("  {spinner:.yellow} {msg}")
    {
        pb.set_style(spinner_style.tick_strings(&symbols::SPINNER));
    }
    pb.set_message(format!("{} {} is thinking...", symbols::AI_ICON, provider));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn print_response(title: &str, response: &str) {
    println!(
        "  {}",
        success().bold().apply_to(format!("{} {}", symbols::AI_ICON, title))
    );
    println!("{}", muted().apply_to(format!("  ╭{}─", "─".repeat(60))));
    for line in response.lines() {
        println!("{} {}", muted().apply_to("  │"), fg().apply_to(line));
    }
    println!("{}", muted().apply_to(format!("  ╰{}─", "─".repeat(60))));
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiffLine {
    Fence,
    Header,
    Hunk,
    Added,
    Removed,
    Unchanged,
}

/// Tag each line of a fenced unified diff. `---`/`+++` are file headers
/// only before the first hunk; inside a hunk they are ordinary edits.
fn classify_diff(diff: &str) -> Vec<(DiffLine, &str)> {
    let mut in_hunk = false;
    diff.lines()
        .map(|line| {
            let kind = if line.starts_with("```") {
                in_hunk = false;
                DiffLine::Fence
            } else if line.starts_with("@@") {
                in_hunk = true;
                DiffLine::Hunk
            } else if !in_hunk && (line.starts_with("---") || line.starts_with("+++")) {
                DiffLine::Header
            } else if line.starts_with('+') {
                DiffLine::Added
            } else if line.starts_with('-') {
                DiffLine::Removed
            } else {
                DiffLine::Unchanged
            };
            (kind, line)
        })
        .collect()
}

/// Colorize a fenced unified diff line by line
pub fn print_diff(diff: &str) {
    println!(
        "  {}",
        primary().apply_to(format!("{} Proposed changes", symbols::DIFF))
    );
    for (kind, line) in classify_diff(diff) {
        let styled = match kind {
            DiffLine::Fence => continue,
            DiffLine::Header => muted().bold().apply_to(line),
            DiffLine::Hunk => accent().apply_to(line),
            DiffLine::Added => success().apply_to(line),
            DiffLine::Removed => error().apply_to(line),
            DiffLine::Unchanged => fg().apply_to(line),
        };
        println!("  {}", styled);
    }
    println!();
}

/// List omitted entries on stderr
pub fn print_omissions(omitted: &[Omission]) {
    if omitted.is_empty() {
        return;
    }
    eprintln!(
        "  {}",
        muted().apply_to(format!("{} Omitted ({}):", symbols::SKIP, omitted.len()))
    );
    for omission in omitted {
        eprintln!(
            "  {}",
            muted().apply_to(format!(
                "   • {} ({})",
                omission.path.display(),
                omission.reason
            ))
        );
    }
}

pub fn print_error(message: &str) {
    eprintln!(
        "\n  {}",
        error().apply_to(format!("{} {}", symbols::ERROR, message))
    );
}
