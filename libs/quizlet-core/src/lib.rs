//! Core library for turning vocabulary markup into flashcard listings.
//!
//! Provides:
//! - Line interpreter for the `#group` / `#showgroup` markup
//! - Pinyin tone-number escaping
//! - Term and group model with the fixed output formats

pub mod command;
pub mod error;
pub mod escaper;
pub mod group;
pub mod parser;
pub mod term;

pub use command::{split_lines, Command, END_OF_FILE};
pub use error::{CommandError, ParseError, Result};
pub use escaper::escape;
pub use group::Group;
pub use parser::{parse, parse_document, render, Document};
pub use term::{Format, Term};
