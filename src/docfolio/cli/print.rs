use chrono::{Local, NaiveDate};
use colored::Colorize;
use docfolio::api::{CmdMessage, MessageLevel};
use docfolio::commands::CategoryUsage;
use docfolio::config::DocfolioConfig;
use docfolio::index::DisplayDocument;
use docfolio::model::DocumentType;
use docfolio::viewer::{DocumentView, Preview};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TYPE_WIDTH: usize = 7;
const CATEGORY_WIDTH: usize = 14;
const TIME_WIDTH: usize = 14;

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

pub(super) fn print_documents(documents: &[DisplayDocument]) {
    if documents.is_empty() {
        println!("No documents found.");
        return;
    }

    for dd in documents {
        let idx_str = format!("{}. ", dd.index);
        let type_str = pad_to_width(&dd.document.doc_type.to_string(), TYPE_WIDTH);
        let category = pad_to_width(
            &truncate_to_width(&dd.document.category, CATEGORY_WIDTH),
            CATEGORY_WIDTH,
        );
        let time_ago = format_date_ago(&dd.document.date);

        let fixed_width = 4 + idx_str.width() + TYPE_WIDTH + 1 + CATEGORY_WIDTH + 1 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = truncate_to_width(&dd.document.name, available);
        let padding = available.saturating_sub(name.width());

        let type_colored = match dd.document.doc_type {
            DocumentType::Pdf => type_str.red(),
            DocumentType::Image => type_str.blue(),
        };

        println!(
            "    {}{} {}{} {}{}",
            idx_str.yellow(),
            type_colored,
            name,
            " ".repeat(padding),
            category.cyan(),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_views(views: &[DocumentView]) {
    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let doc = &view.display.document;
        println!(
            "{} {}",
            view.display.index.to_string().yellow(),
            doc.name.bold()
        );
        println!("--------------------------------");
        println!("{:<10}{}", "Type:", doc.doc_type);
        println!("{:<10}{}", "Category:", doc.category);
        println!("{:<10}{}", "Date:", doc.date);
        println!("{:<10}{}", "Size:", format_size(view.bytes.len() as u64));
        if let Some(mime) = &doc.mime_type {
            println!("{:<10}{}", "Media:", mime);
        }
        println!("{:<10}{}", "Stored:", doc.uri.dimmed());
        println!("{:<10}{}", "Preview:", describe_preview(&view.preview));
    }
}

pub(super) fn describe_preview(preview: &Preview) -> String {
    match preview {
        Preview::Pdf { pages, version } => {
            let pages = match pages {
                1 => "1 page".to_string(),
                n => format!("{} pages", n),
            };
            match version {
                Some(v) => format!("PDF {}, {}", v, pages),
                None => format!("PDF, {}", pages),
            }
        }
        Preview::Image { format, dimensions } => match dimensions {
            Some((w, h)) => format!("{} image, {}x{}", format, w, h),
            None => format!("{} image", format),
        },
    }
}

pub(super) fn print_categories(categories: &[CategoryUsage]) {
    if categories.is_empty() {
        println!("No categories.");
        return;
    }
    for usage in categories {
        let count = match usage.documents {
            0 => "unused".dimmed(),
            1 => "1 document".normal(),
            n => format!("{} documents", n).normal(),
        };
        println!(
            "    {} {}",
            pad_to_width(&usage.name, CATEGORY_WIDTH + 2).cyan(),
            count
        );
    }
}

pub(super) fn print_config(config: &DocfolioConfig) {
    for key in DocfolioConfig::keys() {
        if let Some(value) = config.get(key) {
            let shown = if *key == "password" {
                "*".repeat(value.chars().count())
            } else {
                value
            };
            println!("{} = {}", key, shown);
        }
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

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

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Documents carry a calendar date only, so anything from today reads "today".
fn format_date_ago(date: &str) -> String {
    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return format!("{:>width$}", date, width = TIME_WIDTH);
    };
    let today = Local::now().date_naive();
    let days = today.signed_duration_since(day).num_days();

    let time_str = if days <= 0 {
        "today".to_string()
    } else {
        let formatter = Formatter::new();
        let elapsed = std::time::Duration::from_secs(days as u64 * 24 * 60 * 60);
        formatter
            .convert(elapsed)
            .replace("day ago", "day  ago")
            .replace("week ago", "week  ago")
            .replace("month ago", "month  ago")
            .replace("year ago", "year  ago")
    };

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfolio::viewer::ImageFormat;

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Each CJK char is two columns wide
        assert_eq!(truncate_to_width("文書管理システム", 6), "文書…");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_to_width("Educación", 11).width(), 11);
    }

    #[test]
    fn describes_previews() {
        let pdf = Preview::Pdf {
            pages: 3,
            version: Some("1.7".into()),
        };
        assert_eq!(describe_preview(&pdf), "PDF 1.7, 3 pages");

        let image = Preview::Image {
            format: ImageFormat::Png,
            dimensions: Some((640, 480)),
        };
        assert_eq!(describe_preview(&image), "PNG image, 640x480");
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(10), "10 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn today_and_unparseable_dates() {
        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(format_date_ago(&today).trim(), "today");
        assert_eq!(format_date_ago("sometime").trim(), "sometime");
    }
}
