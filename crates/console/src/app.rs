//! The interactive session: read a line, run it, print what changed.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::debug;

use kiosk_events::{InMemoryEventBus, Subscription};
use kiosk_infra::{Clock, ImageImport, LibraryService, LibraryStore, OrderingService, ServiceError};
use kiosk_library::LibraryEvent;
use kiosk_ordering::CartEvent;

use crate::command::{ConsoleCommand, USAGE};
use crate::render;

pub type Ordering<C> = OrderingService<InMemoryEventBus<CartEvent>, C>;
pub type Lending<S, C> = LibraryService<S, InMemoryEventBus<LibraryEvent>, C>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<S, C, W> {
    ordering: Ordering<C>,
    library: Lending<S, C>,
    cart_events: Subscription<CartEvent>,
    library_events: Subscription<LibraryEvent>,
    out: W,
}

impl<S, C, W> Console<S, C, W>
where
    S: LibraryStore,
    C: Clock,
    W: Write,
{
    pub fn new(ordering: Ordering<C>, library: Lending<S, C>, out: W) -> Self {
        let cart_events = ordering.subscribe();
        let library_events = library.subscribe();
        Self {
            ordering,
            library,
            cart_events,
            library_events,
            out,
        }
    }

    pub fn library(&self) -> &Lending<S, C> {
        &self.library
    }

    pub fn ordering(&self) -> &Ordering<C> {
        &self.ordering
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead) -> anyhow::Result<()> {
        writeln!(self.out, "kiosk ready; type `help` for commands")?;
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if self.handle_line(&line)? == Flow::Quit {
                break;
            }
        }
        self.out.flush().context("failed to flush output")?;
        Ok(())
    }

    /// Parse and execute one line. Bad input and rejected actions are printed,
    /// only output failures are returned.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        let command = match ConsoleCommand::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "! {err}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "console command");

        let flow = match self.execute(command) {
            Ok(flow) => flow,
            Err(CommandError::Service(err)) => {
                writeln!(self.out, "! {err}")?;
                Flow::Continue
            }
            Err(CommandError::Output(err)) => return Err(err).context("failed to write output"),
        };
        self.print_events()?;
        Ok(flow)
    }

    fn execute(&mut self, command: ConsoleCommand) -> Result<Flow, CommandError> {
        match command {
            ConsoleCommand::Menu(query) => {
                let items = self.ordering.browse(&query);
                for item in &items {
                    writeln!(self.out, "{}", render::menu_item(item))?;
                }
                writeln!(self.out, "{} item(s)", items.len())?;
            }
            ConsoleCommand::CartAdd(item_id) => {
                self.ordering.add_to_cart(item_id)?;
            }
            ConsoleCommand::CartRemove(index) => {
                if self.ordering.remove_from_cart(index)?.is_none() {
                    writeln!(self.out, "nothing to remove at line {}", index + 1)?;
                }
            }
            ConsoleCommand::ShowCart => {
                writeln!(self.out, "{}", render::cart(&self.ordering.view()))?;
            }
            ConsoleCommand::Order => {
                self.ordering.place_order()?;
            }
            ConsoleCommand::Books(query) => {
                let books = self.library.search(&query);
                for book in &books {
                    let image = self.library.image_for(book);
                    writeln!(self.out, "{}", render::book(book, &image))?;
                }
                writeln!(self.out, "{} book(s)", books.len())?;
            }
            ConsoleCommand::Borrow(book_id) => {
                self.library.borrow(book_id)?;
            }
            ConsoleCommand::Return(index) => {
                self.library.return_book(index)?;
            }
            ConsoleCommand::Loans => {
                let today = self.library.today();
                let loans = self.library.library().loans();
                if loans.is_empty() {
                    writeln!(self.out, "no books borrowed")?;
                }
                for (i, entry) in loans.entries().iter().enumerate() {
                    writeln!(self.out, "{}", render::loan(i, entry, today))?;
                }
            }
            ConsoleCommand::Stats => {
                writeln!(self.out, "{}", render::stats(&self.library.stats()))?;
            }
            ConsoleCommand::AddBook { book, image } => {
                let (_, import) = self.library.add_book(&book, image.as_deref())?;
                match &import {
                    ImageImport::Copied(path) => {
                        writeln!(self.out, "image saved to {}", path.display())?
                    }
                    ImageImport::Failed(_) => {
                        if let Some(warning) = import.warning() {
                            writeln!(self.out, "! {warning}")?;
                        }
                    }
                    ImageImport::NotRequested => {}
                }
            }
            ConsoleCommand::Help => writeln!(self.out, "{USAGE}")?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_events(&mut self) -> std::io::Result<()> {
        for event in self.cart_events.drain() {
            writeln!(self.out, "{}", render::cart_event(&event))?;
        }
        for event in self.library_events.drain() {
            writeln!(self.out, "{}", render::library_event(&event))?;
        }
        Ok(())
    }
}

/// Either a rejected action (printed) or broken output (fatal).
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Output(#[from] std::io::Error),
}
