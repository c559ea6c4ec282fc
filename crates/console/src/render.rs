//! Plain-text rendering of catalog cards, ledgers and published events.

use chrono::NaiveDate;

use kiosk_catalog::{Book, ImageSource, MenuItem};
use kiosk_library::{LibraryEvent, LibraryStats, LoanEntry};
use kiosk_ordering::{CartEvent, CartView, OrderReceipt};

pub fn menu_item(item: &MenuItem) -> String {
    format!("[{:>3}] {:<22} Rs. {:<5} {}", item.id.get(), item.name, item.price, item.category)
}

pub fn book(book: &Book, image: &ImageSource) -> String {
    let image = match image {
        ImageSource::File(path) => path.display().to_string(),
        ImageSource::Placeholder => "no image".to_string(),
    };
    format!(
        "[{:>3}] {:<26} {:<20} {:<10} {:<9} ({image})",
        book.id.get(),
        book.name,
        book.author,
        book.category,
        book.status.label()
    )
}

pub fn cart(view: &CartView) -> String {
    let mut out: Vec<String> = view
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>3}. {} -------- Rs.{}", i + 1, line.name, line.price))
        .collect();
    if view.is_empty() {
        out.push("cart is empty".to_string());
    }
    out.push(format!("Total: Rs.{}", view.total));
    out.join("\n")
}

pub fn loan(position: usize, entry: &LoanEntry, today: NaiveDate) -> String {
    let mut line = format!(
        "{:>3}. {} by {}  Due: {}",
        position + 1,
        entry.name,
        entry.author,
        entry.due_date
    );
    if entry.is_overdue(today) {
        line.push_str(&format!(" ({} days overdue)", entry.days_overdue(today)));
    }
    line
}

pub fn stats(stats: &LibraryStats) -> String {
    [
        format!("Total Books:           {}", stats.total),
        format!("Available Books:       {}", stats.available),
        format!("Borrowed Books:        {}", stats.borrowed),
        format!("Overdue Books:         {}", stats.overdue),
        format!(
            "Most Popular Category: {}",
            stats.most_popular_category.as_deref().unwrap_or("None")
        ),
    ]
    .join("\n")
}

pub fn receipt(receipt: &OrderReceipt) -> String {
    format!(
        "Order placed: {} item(s), Rs.{}. Thank you! Your food is on the way.",
        receipt.line_count, receipt.total
    )
}

/// One status line per published event.
pub fn cart_event(event: &CartEvent) -> String {
    match event {
        CartEvent::ItemAdded(e) => format!("* added {} (Total: Rs.{})", e.name, e.cart.total),
        CartEvent::ItemRemoved(e) => format!("* removed {} (Total: Rs.{})", e.name, e.cart.total),
        CartEvent::OrderPlaced(e) => format!("* {}", receipt(&e.receipt)),
    }
}

pub fn library_event(event: &LibraryEvent) -> String {
    let summary = match event {
        LibraryEvent::BookBorrowed(e) => {
            format!("You have borrowed '{}'. Return by: {}", e.name, e.due_date)
        }
        LibraryEvent::BookReturned(e) => format!("Book '{}' returned successfully", e.name),
        LibraryEvent::BookAdded(e) => format!("Added new book: {}", e.book.name),
    };
    let stats = event.stats();
    format!(
        "* {summary} [available {}/{}, overdue {}]",
        stats.available, stats.total, stats.overdue
    )
}
