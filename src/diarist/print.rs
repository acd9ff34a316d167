use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use diarist::api::{CmdMessage, MessageLevel};
use diarist::config::{parse_hex_color, DiaristConfig, CONFIG_KEYS};
use diarist::data_url::DataUrl;
use diarist::model::{DiaryRecord, Theme};
use diarist::render::{DisplayItem, DisplayList, EntryView};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const TIME_WIDTH: usize = 16;
const SWATCH: &str = "■";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Blocking notices go to stderr so piped output stays clean.
pub(super) fn print_notice(message: &str) {
    eprintln!("{}", message.yellow());
}

pub(super) fn print_diaries(diaries: &[DiaryRecord], theme: Theme) {
    if diaries.is_empty() {
        println!("No diaries yet. Create one with `diarist create <title>`.");
        return;
    }

    for (i, diary) in diaries.iter().enumerate() {
        let swatch = match parse_hex_color(&diary.color) {
            Some([r, g, b]) => SWATCH.truecolor(r, g, b),
            None => SWATCH.normal(),
        };
        let idx_str = format!("{}. ", i + 1);

        let fixed_width = 2 + SWATCH.width() + 1 + idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&diary.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "  {} {}{}{}{}",
            swatch,
            idx_str.yellow(),
            accent(&title, theme),
            " ".repeat(padding),
            format_time_ago(diary.created_at).dimmed()
        );
    }
}

pub(super) fn print_diary(diary: &DiaryRecord, display: &DisplayList, theme: Theme) {
    println!("{}", accent(&diary.title, theme));
    println!("{}", "-".repeat(diary.title.width().max(8)));

    for (i, item) in display.items.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match item {
            DisplayItem::Placeholder(text) => println!("{}", text.dimmed()),
            DisplayItem::Entry(entry) => {
                println!("{} {}", entry.label.bold(), entry.timestamp.dimmed());
                match &entry.view {
                    EntryView::Text { lines, .. } => {
                        for line in lines {
                            println!("  {}", line);
                        }
                    }
                    EntryView::Image { src, .. } | EntryView::Audio { src } => {
                        println!("  {}", media_summary(src).cyan());
                    }
                }
            }
        }
    }
}

pub(super) fn print_config(config: &DiaristConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn accent(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.blue().bold(),
        Theme::Dark => text.bright_cyan().bold(),
    }
}

/// "[image/png, 3.1 KB]" for a stored data URL
fn media_summary(src: &str) -> String {
    match src.parse::<DataUrl>() {
        Ok(url) => {
            let bytes = url.payload().len() / 4 * 3;
            format!("[{}, {}]", url.media_type(), format_size(bytes))
        }
        Err(_) => "[unreadable media]".to_string(),
    }
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
