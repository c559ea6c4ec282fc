use serde::{Deserialize, Serialize};

use kiosk_catalog::CatalogItem;

/// Numbers shown on the library statistics panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total: usize,
    pub available: usize,
    pub borrowed: usize,
    pub overdue: usize,
    pub most_popular_category: Option<String>,
}

/// Category with the most items; on a tie the category seen first wins.
///
/// A single pass counts categories in first-seen order, then the running best
/// is only replaced by a strictly larger count.
pub fn most_popular_category<'a, T, I>(items: I) -> Option<String>
where
    T: CatalogItem + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for item in items {
        let category = item.category();
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (category, n) in counts {
        if best.is_none_or(|(_, top)| n > top) {
            best = Some((category, n));
        }
    }
    best.map(|(category, _)| category.to_string())
}
