use chrono::NaiveDate;

use kiosk_catalog::{Book, BookStatus, Catalog, CatalogQuery};
use kiosk_core::{DomainError, DomainResult, EntryId, ItemId};

use crate::due_date::{DEFAULT_LOAN_DAYS, DueDate};
use crate::loan::{LoanEntry, LoanLedger};
use crate::snapshot::LibrarySnapshot;
use crate::stats::{self, LibraryStats};

/// Input of the "add book" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBook {
    pub name: String,
    pub author: String,
    pub category: String,
}

impl NewBook {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            category: category.into(),
        }
    }

    /// Trimmed copy; every field is required.
    fn validated(&self) -> DomainResult<NewBook> {
        let trimmed = NewBook::new(self.name.trim(), self.author.trim(), self.category.trim());
        let missing: Vec<&str> = [
            ("name", &trimmed.name),
            ("author", &trimmed.author),
            ("category", &trimmed.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(trimmed)
        } else {
            Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Library state: the book catalog (source of truth for status) plus current loans.
///
/// Every operation either fully applies or leaves both halves untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    catalog: Catalog<Book>,
    loans: LoanLedger,
    loan_days: u64,
}

impl Library {
    pub fn new(catalog: Catalog<Book>, loans: LoanLedger) -> Self {
        Self {
            catalog,
            loans,
            loan_days: DEFAULT_LOAN_DAYS,
        }
    }

    pub fn from_snapshot(snapshot: LibrarySnapshot) -> Self {
        Self::new(
            Catalog::from_items(snapshot.books),
            LoanLedger::from_entries(snapshot.borrowed),
        )
    }

    pub fn with_loan_days(mut self, loan_days: u64) -> Self {
        self.loan_days = loan_days;
        self
    }

    pub fn catalog(&self) -> &Catalog<Book> {
        &self.catalog
    }

    pub fn loans(&self) -> &LoanLedger {
        &self.loans
    }

    pub fn loan_days(&self) -> u64 {
        self.loan_days
    }

    pub fn book(&self, id: ItemId) -> Option<&Book> {
        self.catalog.get(id)
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<&Book> {
        self.catalog.filter(query)
    }

    /// Lend an available book; the loan is due `loan_days` after `today`.
    pub fn borrow(&mut self, book_id: ItemId, today: NaiveDate) -> DomainResult<LoanEntry> {
        let due_date = DueDate::after(today, self.loan_days)?;
        let book = self
            .catalog
            .get_mut(book_id)
            .filter(|book| book.is_available())
            .ok_or(DomainError::NotAvailable(book_id))?;

        book.status = BookStatus::Borrowed;
        let entry = LoanEntry {
            entry_id: EntryId::new(),
            book_id,
            name: book.name.clone(),
            author: book.author.clone(),
            due_date,
        };
        self.loans.push(entry.clone());
        Ok(entry)
    }

    /// End the loan at `index` and make its book available again.
    ///
    /// A loan whose book has since vanished from the catalog is still removed.
    pub fn return_book(&mut self, index: usize) -> DomainResult<LoanEntry> {
        let entry = self.loans.remove_at(index)?;
        if let Some(book) = self.catalog.get_mut(entry.book_id) {
            book.status = BookStatus::Available;
        }
        Ok(entry)
    }

    pub fn return_entry(&mut self, entry_id: EntryId) -> DomainResult<LoanEntry> {
        let index = self.loans.position(entry_id).ok_or(DomainError::NotFound)?;
        self.return_book(index)
    }

    /// Add a new, available book with the next free id.
    pub fn add_book(&mut self, new_book: &NewBook) -> DomainResult<Book> {
        let fields = new_book.validated()?;
        let book = Book::new(self.catalog.next_id()?, fields.name, fields.author, fields.category);
        self.catalog.push(book.clone())?;
        Ok(book)
    }

    pub fn overdue_count(&self, as_of: NaiveDate) -> usize {
        self.loans.overdue_count(as_of)
    }

    pub fn most_popular_category(&self) -> Option<String> {
        stats::most_popular_category(self.catalog.iter())
    }

    pub fn stats(&self, as_of: NaiveDate) -> LibraryStats {
        let available = self.catalog.iter().filter(|b| b.is_available()).count();
        LibraryStats {
            total: self.catalog.len(),
            available,
            borrowed: self.catalog.len() - available,
            overdue: self.overdue_count(as_of),
            most_popular_category: self.most_popular_category(),
        }
    }

    pub fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            books: self.catalog.items().to_vec(),
            borrowed: self.loans.entries().to_vec(),
        }
    }
}
