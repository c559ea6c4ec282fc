//! Console command grammar.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use kiosk_catalog::{CatalogQuery, CategoryFilter, StatusFilter};
use kiosk_core::ItemId;
use kiosk_library::NewBook;

pub const USAGE: &str = "\
menu [text] [@category]          list menu items
cart add <item-id>               add a menu item to the cart
cart rm <n>                      remove cart line n
cart                             show the cart
order                            place the order
books [text] [@category] [#status]
borrow <book-id>                 borrow an available book
return <n>                       return loan n
loans                            list current loans
stats                            library statistics
add-book <name> | <author> | <category> [| <image-path>]
help | quit";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Menu(CatalogQuery),
    CartAdd(ItemId),
    /// Zero-based cart line.
    CartRemove(usize),
    ShowCart,
    Order,
    Books(CatalogQuery),
    Borrow(ItemId),
    /// Zero-based loan line.
    Return(usize),
    Loans,
    Stats,
    AddBook {
        book: NewBook,
        image: Option<PathBuf>,
    },
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, args) = match line.split_once(char::is_whitespace) {
            Some((word, args)) => (word, args.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "menu" => ConsoleCommand::Menu(parse_query(args, false)?),
            "cart" => parse_cart(args)?,
            "order" => ConsoleCommand::Order,
            "books" => ConsoleCommand::Books(parse_query(args, true)?),
            "borrow" => ConsoleCommand::Borrow(parse_id(args, "borrow <book-id>")?),
            "return" => ConsoleCommand::Return(parse_line_number(args, "return <n>")?),
            "loans" => ConsoleCommand::Loans,
            "stats" => ConsoleCommand::Stats,
            "add-book" => parse_add_book(args)?,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            _ => return Err(ParseError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_cart(args: &str) -> Result<ConsoleCommand, ParseError> {
    let (sub, rest) = match args.split_once(char::is_whitespace) {
        Some((sub, rest)) => (sub, rest.trim()),
        None => (args, ""),
    };
    match sub {
        "" => Ok(ConsoleCommand::ShowCart),
        "add" => Ok(ConsoleCommand::CartAdd(parse_id(rest, "cart add <item-id>")?)),
        "rm" => Ok(ConsoleCommand::CartRemove(parse_line_number(rest, "cart rm <n>")?)),
        _ => Err(ParseError::Usage("cart add <item-id> | cart rm <n> | cart")),
    }
}

/// `[text] [@category] [#status]`, markers in either order.
///
/// A word starting with `@` or `#` opens that part, and the following plain words
/// join it until the next marker (`@Space Opera #available`). Words before the
/// first marker are the search text. A lone marker or one inside a word (`C#`)
/// is ordinary text.
fn parse_query(args: &str, with_status: bool) -> Result<CatalogQuery, ParseError> {
    let usage = if with_status {
        "books [text] [@category] [#status]"
    } else {
        "menu [text] [@category]"
    };

    #[derive(Clone, Copy, PartialEq)]
    enum Part {
        Text,
        Category,
        Status,
    }

    let mut text: Vec<&str> = Vec::new();
    let mut category: Option<Vec<&str>> = None;
    let mut status: Option<Vec<&str>> = None;
    let mut part = Part::Text;

    for word in args.split_whitespace() {
        let marker = match (word.strip_prefix('@'), word.strip_prefix('#')) {
            (Some(rest), _) if !rest.is_empty() => Some((Part::Category, rest)),
            (_, Some(rest)) if !rest.is_empty() => Some((Part::Status, rest)),
            _ => None,
        };

        match marker {
            Some((Part::Status, _)) if !with_status => return Err(ParseError::Usage(usage)),
            Some((next, rest)) => {
                let slot = if next == Part::Category { &mut category } else { &mut status };
                if slot.is_some() {
                    return Err(ParseError::Usage(usage));
                }
                *slot = Some(vec![rest]);
                part = next;
            }
            None => match part {
                Part::Text => text.push(word),
                Part::Category => category.get_or_insert_with(Vec::new).push(word),
                Part::Status => status.get_or_insert_with(Vec::new).push(word),
            },
        }
    }

    let mut query = CatalogQuery::all().text(text.join(" "));
    if let Some(category) = category {
        query = query.category(CategoryFilter::parse(&category.join(" ")));
    }
    if let Some(status) = status {
        let status =
            StatusFilter::from_str(&status.join(" ")).map_err(|e| ParseError::Invalid(e.to_string()))?;
        query = query.status(status);
    }
    Ok(query)
}

fn parse_id(arg: &str, usage: &'static str) -> Result<ItemId, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    arg.parse().map_err(|e: kiosk_core::DomainError| ParseError::Invalid(e.to_string()))
}

/// Lines are shown numbered from 1.
fn parse_line_number(arg: &str, usage: &'static str) -> Result<usize, ParseError> {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or(ParseError::Usage(usage))
}

fn parse_add_book(args: &str) -> Result<ConsoleCommand, ParseError> {
    const USAGE: &str = "add-book <name> | <author> | <category> [| <image-path>]";
    let parts: Vec<&str> = args.split('|').map(str::trim).collect();
    let (book, image) = match parts.as_slice() {
        [name, author, category] => (NewBook::new(*name, *author, *category), None),
        [name, author, category, image] => (
            NewBook::new(*name, *author, *category),
            Some(*image).filter(|p| !p.is_empty()).map(PathBuf::from),
        ),
        _ => return Err(ParseError::Usage(USAGE)),
    };
    Ok(ConsoleCommand::AddBook { book, image })
}
