//! Filter engine: pure `(items, query) -> ordered subsequence`.
//!
//! Three predicates are ANDed:
//! - free text: case-insensitive substring of the name (books also match author)
//! - category: exact match, or the "All" sentinel
//! - status: exact match, or "All" (items without a status only pass "All")
//!
//! Output keeps catalog order. Nothing is cached; catalogs are tens of items.

use core::str::FromStr;

use kiosk_core::DomainError;

use crate::item::{BookStatus, CatalogItem};

/// Selector sentinel meaning "no filter".
pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Interpret a selector value; "All" (or blank) disables the filter.
    pub fn parse(selected: &str) -> Self {
        let selected = selected.trim();
        if selected.is_empty() || selected == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(selected.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: Option<BookStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(*wanted),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Only(s.parse()?))
    }
}

/// Search + selector state, as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
}

impl CatalogQuery {
    /// Matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Free-text search. Surrounding whitespace is ignored, so a query of only
    /// spaces is the same as no query and matches every item; inner spaces
    /// (`"ice cream"`) are still part of the needle.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    fn needle(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Does `item` satisfy every predicate of `query`?
pub fn matches<T: CatalogItem>(item: &T, query: &CatalogQuery) -> bool {
    matches_with_needle(item, query, &query.needle())
}

fn matches_with_needle<T: CatalogItem>(item: &T, query: &CatalogQuery, needle: &str) -> bool {
    let text_match = needle.is_empty() || item.matches_text(needle);
    text_match && query.category.matches(item.category()) && query.status.matches(item.status())
}

/// Stable filter over `items`.
pub fn filter<'a, T: CatalogItem>(items: &'a [T], query: &CatalogQuery) -> Vec<&'a T> {
    let needle = query.needle();
    items
        .iter()
        .filter(|item| matches_with_needle(*item, query, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Book, MenuItem};
    use crate::seed;
    use kiosk_core::ItemId;

    fn names<T: CatalogItem>(items: &[&T]) -> Vec<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let books = seed::books();
        let out = filter(&books, &CatalogQuery::all());
        assert_eq!(out.len(), books.len());
        assert!(out.iter().zip(books.iter()).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn text_matches_name_or_author_case_insensitively() {
        let books = seed::books();
        let out = filter(&books, &CatalogQuery::all().text("TOLKIEN"));
        assert_eq!(names(&out), vec!["The Hobbit", "The Lord of the Rings"]);

        let out = filter(&books, &CatalogQuery::all().text("  gatsby "));
        assert_eq!(names(&out), vec!["The Great Gatsby"]);
    }

    #[test]
    fn whitespace_only_text_matches_everything() {
        let menu = seed::menu();
        assert_eq!(filter(&menu, &CatalogQuery::all().text("   ")).len(), menu.len());

        let out = filter(&menu, &CatalogQuery::all().text(" ice cream "));
        assert_eq!(names(&out), vec!["Chocolate Ice Cream"]);
    }

    #[test]
    fn category_and_status_are_anded() {
        let mut books = seed::books();
        books[3].status = BookStatus::Borrowed; // The Hobbit

        let query = CatalogQuery::all()
            .category(CategoryFilter::parse("Fantasy"))
            .status("available".parse().unwrap());
        let out = filter(&books, &query);
        assert_eq!(names(&out), vec!["Harry Potter", "The Lord of the Rings"]);

        let query = CatalogQuery::all().status("Borrowed".parse().unwrap());
        assert_eq!(names(&filter(&books, &query)), vec!["The Hobbit"]);
    }

    #[test]
    fn category_match_is_exact() {
        let menu = seed::menu();
        let out = filter(&menu, &CatalogQuery::all().category(CategoryFilter::parse("drinks")));
        assert!(out.is_empty());
        let out = filter(&menu, &CatalogQuery::all().category(CategoryFilter::parse("Drinks")));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn all_sentinel_parses_to_no_filter() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert!("overdue".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn menu_items_only_pass_the_all_status() {
        let menu = vec![MenuItem::new(ItemId::new(1), "Tea", 30, "Drinks")];
        let query = CatalogQuery::all().status(StatusFilter::Only(BookStatus::Available));
        assert!(filter(&menu, &query).is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_book() -> impl Strategy<Value = (String, String, String, bool)> {
            (
                "[A-Ca-c ]{0,6}",
                "[A-Ca-c ]{0,6}",
                prop::sample::select(vec!["Fiction", "Fantasy", "Sci-Fi"]),
                any::<bool>(),
            )
                .prop_map(|(n, a, c, borrowed)| (n, a, c.to_string(), borrowed))
        }

        fn arb_query() -> impl Strategy<Value = CatalogQuery> {
            (
                "[A-Ca-c]{0,2}",
                prop::sample::select(vec!["All", "Fiction", "Fantasy", "Sci-Fi"]),
                prop::sample::select(vec!["All", "available", "borrowed"]),
            )
                .prop_map(|(text, cat, status)| {
                    CatalogQuery::all()
                        .text(text)
                        .category(CategoryFilter::parse(cat))
                        .status(status.parse().unwrap())
                })
        }

        fn reference_predicate(book: &Book, query: &CatalogQuery) -> bool {
            let needle = query.text.trim().to_lowercase();
            let text = needle.is_empty()
                || book.name.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle);
            let category = match &query.category {
                CategoryFilter::All => true,
                CategoryFilter::Only(c) => &book.category == c,
            };
            let status = match query.status {
                StatusFilter::All => true,
                StatusFilter::Only(s) => book.status == s,
            };
            text && category && status
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: the result is exactly the order-preserving subsequence of
            /// items that satisfy all three predicates.
            #[test]
            fn filter_is_exact_ordered_subsequence(
                raw in prop::collection::vec(arb_book(), 0..20),
                query in arb_query(),
            ) {
                let books: Vec<Book> = raw
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, author, category, borrowed))| {
                        let mut book = Book::new(ItemId::new(i as u64 + 1), name, author, category);
                        if borrowed {
                            book.status = BookStatus::Borrowed;
                        }
                        book
                    })
                    .collect();

                let out = filter(&books, &query);

                let positions: Vec<usize> = out
                    .iter()
                    .map(|hit| books.iter().position(|b| std::ptr::eq(b, *hit)).unwrap())
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

                let expected: Vec<usize> = books
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| reference_predicate(b, &query))
                    .map(|(i, _)| i)
                    .collect();
                prop_assert_eq!(positions, expected);
            }
        }
    }
}
