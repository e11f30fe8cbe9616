//! Line-by-line interpreter for the vocabulary markup.
//!
//! Every call starts from an empty state. Lines are folded through a
//! [`ParserState`] in order, followed by the synthetic [`END_OF_FILE`] line,
//! and the first failing line aborts the whole parse.

use crate::command::{split_lines, Command, END_OF_FILE};
use crate::error::{CommandError, ParseError, Result};
use crate::group::Group;
use serde::Serialize;
use std::collections::HashMap;
use std::iter;

/// Output of a successful parse together with the groups it defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub output: String,
    /// Groups in the order they were opened.
    pub groups: Vec<Group>,
}

/// Parse a document and return its rendered flashcard text.
pub fn parse(text: &str) -> Result<String> {
    parse_document(text).map(|document| document.output)
}

/// Parse a document, keeping the groups as well as the rendered text.
pub fn parse_document(text: &str) -> Result<Document> {
    let lines = split_lines(text);
    let (state, output) = lines
        .into_iter()
        .chain(iter::once(END_OF_FILE))
        .enumerate()
        .try_fold(
            (ParserState::default(), String::new()),
            |(mut state, mut output), (idx, line)| {
                let line_num = idx + 1;
                let text = state.process_line(line).map_err(|kind| {
                    tracing::debug!(line = line_num, error = %kind, "markup parse aborted");
                    ParseError::new(line_num, line, kind)
                })?;
                output.push_str(&text);
                Ok::<_, ParseError>((state, output))
            },
        )?;

    Ok(Document {
        output,
        groups: state.groups,
    })
}

/// Host-facing entry point: the rendered text, or the diagnostic that replaces it.
pub fn render(text: &str) -> String {
    parse(text).unwrap_or_else(|error| error.to_string())
}

/// Group registry and open-group pointer for a single parse.
#[derive(Debug, Default)]
struct ParserState {
    groups: Vec<Group>,
    by_name: HashMap<String, usize>,
    current: Option<usize>,
}

impl ParserState {
    fn process_line(&mut self, line: &str) -> std::result::Result<String, CommandError> {
        match Command::parse(line) {
            Command::Empty | Command::Comment => Ok(String::new()),
            Command::Group { args } => self.open_group(&args),
            Command::EndGroup { args } => self.close_group(&args),
            Command::ShowGroup { args } => self.show_group(&args),
            Command::EndFile { args } => self.end_file(&args),
            Command::Unknown(word) => Err(CommandError::UnknownCommand(word.to_string())),
            Command::Content(text) => self.add_content(text),
        }
    }

    fn open_group(&mut self, args: &[&str]) -> std::result::Result<String, CommandError> {
        if self.current.is_some() {
            return Err(CommandError::AlreadyInGroup);
        }
        let name = match args {
            [] => return Err(CommandError::MissingGroupName),
            [name] => *name,
            _ => return Err(CommandError::TooManyParameters { allowed: 1 }),
        };
        if self.by_name.contains_key(name) {
            return Err(CommandError::DuplicateGroupName(name.to_string()));
        }

        let idx = self.groups.len();
        self.groups.push(Group::new(name));
        self.by_name.insert(name.to_string(), idx);
        self.current = Some(idx);
        Ok(String::new())
    }

    fn close_group(&mut self, args: &[&str]) -> std::result::Result<String, CommandError> {
        let idx = self.current.ok_or(CommandError::NotInGroup)?;
        if !args.is_empty() {
            return Err(CommandError::TooManyParameters { allowed: 0 });
        }
        if self.groups[idx].is_dirty() {
            return Err(CommandError::IncompleteTerm);
        }

        self.current = None;
        Ok(String::new())
    }

    fn show_group(&self, args: &[&str]) -> std::result::Result<String, CommandError> {
        if self.current.is_some() {
            return Err(CommandError::ShowGroupInsideGroup);
        }
        let (name, formats) = args.split_first().ok_or(CommandError::MissingGroupName)?;
        let idx = self
            .by_name
            .get(*name)
            .ok_or_else(|| CommandError::UnknownGroup(name.to_string()))?;

        self.groups[*idx].display(formats)
    }

    fn end_file(&self, args: &[&str]) -> std::result::Result<String, CommandError> {
        if self.current.is_some() {
            return Err(CommandError::GroupNotClosed);
        }
        if !args.is_empty() {
            return Err(CommandError::TooManyParameters { allowed: 0 });
        }
        Ok(String::new())
    }

    fn add_content(&mut self, text: &str) -> std::result::Result<String, CommandError> {
        let idx = self.current.ok_or(CommandError::TermOutsideGroup)?;
        self.groups[idx].add_line(text);
        Ok(String::new())
    }
}
