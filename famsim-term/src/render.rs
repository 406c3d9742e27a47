//! Colored terminal rendering of screens, views and dialogs.

use colored::{ColoredString, Colorize};
use famsim_game::i18n::t;
use famsim_game::{AttributeBar, DialogBody, DialogSpec, GameView, Severity};
use std::io::{self, Write};

pub const BAR_CELLS: usize = 20;

fn paint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Danger => text.red(),
        Severity::Warning => text.yellow(),
        Severity::Neutral => text.cyan(),
        Severity::Good => text.green(),
    }
}

/// Number of filled cells for a bar of `BAR_CELLS` cells.
#[must_use]
pub fn filled_cells(bar: &AttributeBar) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = (bar.width_percent / 100.0 * BAR_CELLS as f64).round() as usize;
    filled.min(BAR_CELLS)
}

#[must_use]
pub fn bar_line(bar: &AttributeBar) -> String {
    let filled = filled_cells(bar);
    format!(
        "{:<8} {}{} {}",
        bar.label,
        paint(&"█".repeat(filled), bar.severity),
        "░".repeat(BAR_CELLS - filled).dimmed(),
        bar.display_value()
    )
}

pub fn title<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", text.bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(32).cyan())
}

/// Numbered choices, starting at 1.
pub fn numbered<W: Write, S: AsRef<str>>(out: &mut W, items: &[S]) -> io::Result<()> {
    for (index, item) in items.iter().enumerate() {
        writeln!(out, "  {}) {}", index + 1, item.as_ref())?;
    }
    Ok(())
}

pub fn game_view<W: Write>(out: &mut W, view: &GameView) -> io::Result<()> {
    let header = &view.header;
    writeln!(out)?;
    writeln!(
        out,
        "{} | {} | {} | {}: {} | {}: {}",
        header.day.bold(),
        header.season,
        header.economy,
        t("header.fortune"),
        header.fortune.yellow(),
        t("header.prestige"),
        header.prestige
    )?;
    writeln!(out, "{}", "-".repeat(48).dimmed())?;
    writeln!(out, "{}  {}", view.name.bright_white().bold(), view.basic_info)?;
    for bar in &view.bars {
        writeln!(out, "  {}", bar_line(bar))?;
    }
    for item in &view.status {
        writeln!(out, "  {}: {}", item.label, item.value)?;
    }
    if !view.events.is_empty() {
        writeln!(out, "{}", t("status.events").bold())?;
        for event in &view.events {
            writeln!(out, "  {} {}", event.date.dimmed(), event.text)?;
        }
    }
    writeln!(out, "{}", "-".repeat(48).dimmed())?;
    for (index, button) in view.activities.iter().enumerate() {
        let label = format!("{:>2}) {}", index + 1, button.label);
        if button.enabled {
            writeln!(out, "  {label}")?;
        } else {
            writeln!(out, "  {}", label.dimmed())?;
        }
    }
    Ok(())
}

pub fn dialog<W: Write, A>(out: &mut W, spec: &DialogSpec<A>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!("【{}】", spec.title).bright_yellow().bold())?;
    match &spec.body {
        DialogBody::Text(text) => {
            if !text.is_empty() {
                writeln!(out, "{text}")?;
            }
        }
        DialogBody::Sections(sections) => {
            for section in sections {
                writeln!(out, "{}", section.heading.bold())?;
                for line in &section.lines {
                    writeln!(out, "  {line}")?;
                }
            }
        }
    }
    if let Some(input) = &spec.input {
        writeln!(out, "{} [{}]", t("console.enter_text").dimmed(), input)?;
    }
    for (index, button) in spec.buttons.iter().enumerate() {
        let label = format!("[{}] {}", index + 1, button.text);
        if button.primary {
            writeln!(out, "  {}", label.bold())?;
        } else {
            writeln!(out, "  {label}")?;
        }
    }
    Ok(())
}
