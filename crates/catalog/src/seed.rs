//! Built-in catalogs.
//!
//! The menu is the whole food-ordering catalog (that app has no data file). The
//! books are the library fallback used whenever the data file is missing or
//! unreadable.

use kiosk_core::ItemId;

use crate::item::{Book, MenuItem};

const MENU: &[(&str, u64, &str)] = &[
    ("Burger", 120, "Snacks"),
    ("Cake", 150, "Dessert"),
    ("Pasta", 100, "Meals"),
    ("Coffee", 80, "Drinks"),
    ("Tea", 30, "Drinks"),
    ("Fries", 60, "Snacks"),
    ("Chocolate Ice Cream", 90, "Dessert"),
    ("Coca Cola", 40, "Drinks"),
    ("Cup Cake", 60, "Dessert"),
    ("Desert", 110, "Dessert"),
    ("Fruit Salad", 70, "Healthy"),
    ("Large Sandwich", 130, "Meals"),
    ("Milkshake", 80, "Drinks"),
    ("Noodles", 90, "Meals"),
    ("Pancake", 100, "Dessert"),
    ("Roll", 60, "Snacks"),
    ("Sandwich", 90, "Meals"),
    ("Slice", 50, "Dessert"),
];

const BOOKS: &[(&str, &str, &str)] = &[
    ("The Great Gatsby", "F. Scott Fitzgerald", "Fiction"),
    ("To Kill a Mockingbird", "Harper Lee", "Fiction"),
    ("1984", "George Orwell", "Sci-Fi"),
    ("The Hobbit", "J.R.R. Tolkien", "Fantasy"),
    ("Pride and Prejudice", "Jane Austen", "Romance"),
    ("Harry Potter", "J.K. Rowling", "Fantasy"),
    ("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy"),
    ("The Catcher in the Rye", "J.D. Salinger", "Fiction"),
];

/// Food-ordering menu; ids are 1-based positions.
pub fn menu() -> Vec<MenuItem> {
    MENU.iter()
        .enumerate()
        .map(|(i, (name, price, category))| {
            MenuItem::new(ItemId::new(i as u64 + 1), *name, *price, *category)
        })
        .collect()
}

/// Library fallback catalog; every book starts available.
pub fn books() -> Vec<Book> {
    BOOKS
        .iter()
        .enumerate()
        .map(|(i, (name, author, category))| {
            Book::new(ItemId::new(i as u64 + 1), *name, *author, *category)
        })
        .collect()
}
