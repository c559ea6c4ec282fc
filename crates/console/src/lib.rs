//! Line-oriented console front end for the ordering and library services.
//!
//! The console is a subscriber like any other presentation layer: it issues
//! service calls and prints whatever events those calls published.

pub mod app;
pub mod command;
pub mod render;

pub use app::{Console, Flow};
pub use command::{ConsoleCommand, ParseError};
