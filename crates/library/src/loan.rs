use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kiosk_core::{DomainError, DomainResult, EntryId, ItemId};

use crate::due_date::DueDate;

/// A current loan.
///
/// `name`/`author` are a snapshot taken at borrow time and are not kept in sync
/// with later catalog edits. The entry id is process-local and is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanEntry {
    #[serde(skip, default)]
    pub entry_id: EntryId,
    #[serde(rename = "id")]
    pub book_id: ItemId,
    pub name: String,
    pub author: String,
    pub due_date: DueDate,
}

impl LoanEntry {
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.due_date.is_overdue(as_of)
    }

    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        self.due_date.days_overdue(as_of)
    }
}

/// Ordered list of current loans, addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoanLedger {
    entries: Vec<LoanEntry>,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<LoanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[LoanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LoanEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, entry_id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.entry_id == entry_id)
    }

    pub fn push(&mut self, entry: LoanEntry) {
        self.entries.push(entry);
    }

    pub fn remove_at(&mut self, index: usize) -> DomainResult<LoanEntry> {
        if index >= self.entries.len() {
            return Err(DomainError::out_of_range(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    pub fn overdue(&self, as_of: NaiveDate) -> impl Iterator<Item = &LoanEntry> {
        self.entries.iter().filter(move |e| e.is_overdue(as_of))
    }

    /// Loans due on or before `as_of`.
    pub fn overdue_count(&self, as_of: NaiveDate) -> usize {
        self.overdue(as_of).count()
    }

    pub fn into_entries(self) -> Vec<LoanEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(id: u64, due: NaiveDate) -> LoanEntry {
        LoanEntry {
            entry_id: EntryId::new(),
            book_id: ItemId::new(id),
            name: format!("Book {id}"),
            author: "Someone".to_string(),
            due_date: DueDate::new(due),
        }
    }

    #[test]
    fn overdue_count_includes_yesterday_and_excludes_tomorrow() {
        let as_of = date(2026, 10, 19);
        let mut ledger = LoanLedger::new();
        ledger.push(loan(1, date(2026, 10, 18)));
        ledger.push(loan(2, date(2026, 10, 20)));
        ledger.push(loan(3, date(2026, 10, 19)));

        assert_eq!(ledger.overdue_count(as_of), 2);
        let overdue: Vec<_> = ledger.overdue(as_of).map(|e| e.book_id).collect();
        assert_eq!(overdue, vec![ItemId::new(1), ItemId::new(3)]);
    }

    #[test]
    fn loan_due_today_is_overdue() {
        let today = date(2026, 10, 19);
        let ledger = LoanLedger::from_entries(vec![loan(1, today)]);
        assert_eq!(ledger.overdue_count(today), 1);
        assert_eq!(ledger.entries()[0].days_overdue(today), 0);
    }

    #[test]
    fn remove_at_rejects_stale_index() {
        let mut ledger = LoanLedger::new();
        ledger.push(loan(1, date(2026, 10, 18)));

        assert_eq!(ledger.remove_at(1).unwrap_err(), DomainError::out_of_range(1, 1));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.remove_at(0).unwrap().book_id, ItemId::new(1));
        assert!(ledger.is_empty());
    }

    #[test]
    fn entry_serializes_in_document_shape() {
        let entry = loan(3, date(2026, 11, 2));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "Book 3",
                "author": "Someone",
                "due_date": "02-11-2026"
            })
        );

        let back: LoanEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.book_id, entry.book_id);
        assert_eq!(back.due_date, entry.due_date);
    }
}
