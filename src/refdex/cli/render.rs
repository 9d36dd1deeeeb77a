//! # Rendering Module
//!
//! Turns command results into terminal text. Every function returns a
//! `String` and takes a `use_color` flag, so output can be checked in tests
//! without a terminal; the handlers pass the detected color support.
//!
//! Column widths are computed with `unicode-width` so terms with wide
//! characters still line up.

use super::styles::{ACTIVE, HEADING, MUTED, PAGE, SUCCESS, TERM, WARNING};
use console::Style;
use refdex::api::{CmdMessage, MessageLevel};
use refdex::commands::IndexSummary;
use refdex::config::{RefdexConfig, CONFIG_KEYS};
use refdex::group::CategoryGroup;
use refdex::model::Category;
use unicode_width::UnicodeWidthStr;

const UNCATEGORIZED: &str = "(uncategorized)";
const TERM_COLUMN_MAX: usize = 40;

fn paint(style: &Style, text: &str, use_color: bool) -> String {
    style.clone().force_styling(use_color).apply_to(text).to_string()
}

fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - current))
    }
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut output = String::new();
    for message in messages {
        let style: &Style = match message.level {
            MessageLevel::Info => &MUTED,
            MessageLevel::Success => &SUCCESS,
            MessageLevel::Warning => &WARNING,
        };
        output.push_str(&paint(style, &message.content, use_color));
        output.push('\n');
    }
    output
}

pub fn render_index_list(indexes: &[String], active: Option<&str>, use_color: bool) -> String {
    let mut output = String::new();
    for title in indexes {
        if Some(title.as_str()) == active {
            output.push_str(&format!("* {}\n", paint(&ACTIVE, title, use_color)));
        } else {
            output.push_str(&format!("  {}\n", title));
        }
    }
    output
}

pub fn render_summary(summary: &IndexSummary, use_color: bool) -> String {
    format!(
        "{} {}\n",
        paint(&HEADING, &summary.title, use_color),
        paint(
            &MUTED,
            &format!(
                "({} books, {} workbooks, {} entries, last book {})",
                summary.settings.books,
                summary.settings.workbooks,
                summary.entry_count,
                summary.settings.last_book
            ),
            use_color
        )
    )
}

/// Grouped preview: a heading per category, one line per entry with its
/// page reference, and the description indented underneath.
pub fn render_groups(groups: &[CategoryGroup], use_color: bool) -> String {
    if groups.is_empty() {
        return format!("{}\n", paint(&MUTED, "No entries yet.", use_color));
    }

    let term_width = groups
        .iter()
        .flat_map(|g| g.entries.iter())
        .map(|e| e.term.width())
        .max()
        .unwrap_or(0)
        .min(TERM_COLUMN_MAX);

    let mut output = String::new();
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let heading = if group.heading().is_empty() {
            UNCATEGORIZED
        } else {
            group.heading()
        };
        output.push_str(&paint(&HEADING, heading, use_color));
        output.push('\n');

        for entry in &group.entries {
            let term = pad_to_width(&entry.term, term_width);
            output.push_str(&format!(
                "  {}  {}\n",
                paint(&TERM, &term, use_color),
                paint(&PAGE, &entry.page, use_color)
            ));
            for line in entry.desc.lines().filter(|l| !l.trim().is_empty()) {
                output.push_str(&format!("      {}\n", paint(&MUTED, line, use_color)));
            }
        }
    }
    output
}

pub fn render_categories(use_color: bool) -> String {
    let width = Category::ALL
        .iter()
        .map(|c| c.label().width())
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for category in Category::ALL {
        output.push_str(&format!(
            "{}  {}\n",
            pad_to_width(category.label(), width),
            paint(&MUTED, &category.slug(), use_color)
        ));
    }
    output
}

pub fn render_config(config: &RefdexConfig) -> String {
    let mut output = String::new();
    for key in CONFIG_KEYS {
        if let Ok(value) = config.get(key) {
            output.push_str(&format!("{} = {}\n", key, value));
        }
    }
    output
}
