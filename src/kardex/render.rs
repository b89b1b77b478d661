use chrono::{DateTime, Utc};
use colored::*;
use kardex::commands::{CmdMessage, MessageLevel};
use kardex::model::Product;
use kardex::page::PageControl;
use kardex::view::ViewSink;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PRICE_WIDTH: usize = 9;
const DISCOUNT_WIDTH: usize = 7;

/// Draws the catalog to stdout. The view publishes into this sink after
/// every recompute.
#[derive(Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ViewSink for TerminalRenderer {
    fn show_products(&mut self, products: &[Product]) {
        for product in products {
            print_card(product);
        }
    }

    fn show_controls(&mut self, controls: &[PageControl]) {
        if controls.is_empty() {
            return;
        }

        let mut parts: Vec<String> = Vec::new();
        for control in controls {
            match control {
                PageControl::Prev { enabled, .. } => {
                    let label = "« Prev";
                    parts.push(if *enabled {
                        label.to_string()
                    } else {
                        label.dimmed().to_string()
                    });
                }
                PageControl::Page { number, current } => {
                    parts.push(if *current {
                        format!("[{}]", number).bold().to_string()
                    } else {
                        number.to_string()
                    });
                }
                PageControl::Gap => parts.push("…".dimmed().to_string()),
                PageControl::Next { enabled, .. } => {
                    let label = "Next »";
                    parts.push(if *enabled {
                        label.to_string()
                    } else {
                        label.dimmed().to_string()
                    });
                }
            }
        }
        println!("\n  {}", parts.join("  "));
    }
}

fn print_card(product: &Product) {
    let price = format!("{:>width$.2}", product.price, width = PRICE_WIDTH);
    let discount = format!("{:>width$}", format!("-{}%", product.discount), width = DISCOUNT_WIDTH);
    let time_ago = format_time_ago(product.created_at);

    let preview: String = product
        .description
        .chars()
        .take(60)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    let fixed = PRICE_WIDTH + DISCOUNT_WIDTH + TIME_WIDTH + 4;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title_display = truncate_to_width(&product.title, available);
    let padding = available.saturating_sub(title_display.width());

    println!(
        "{}{} {} {} {}",
        title_display.bold(),
        " ".repeat(padding),
        price,
        discount.yellow(),
        time_ago.dimmed()
    );
    println!(
        "    {}  {}  {}",
        product.id.to_string().dimmed(),
        product.category.cyan(),
        truncate_to_width(&preview, available.saturating_sub(8)).dimmed()
    );
}

pub fn print_product_detail(product: &Product) {
    println!("{}", product.title.bold());
    println!("--------------------------------");
    println!("{}", product.description);
    println!();
    println!("id        {}", product.id);
    println!("category  {}", product.category);
    println!("price     {:.2}", product.price);
    println!("discount  {}%", product.discount);
    println!("image     {}", product.image);
    println!("created   {}", product.created_at.to_rfc3339());
    println!("updated   {}", product.updated_at.to_rfc3339());
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
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
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
