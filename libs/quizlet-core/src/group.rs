//! Named groups of terms.

use crate::error::CommandError;
use crate::term::Term;
use serde::Serialize;

/// A named, ordered collection of terms.
///
/// Content lines arrive one at a time: headword, reading, definition. The
/// third line completes a term and clears the pending slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    name: String,
    terms: Vec<Term>,
    #[serde(skip)]
    pending_headword: Option<String>,
    #[serde(skip)]
    pending_reading: Option<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            pending_headword: None,
            pending_reading: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Feed the next content line into the term being built.
    pub fn add_line(&mut self, line: &str) {
        match (self.pending_headword.take(), self.pending_reading.take()) {
            (None, _) => self.pending_headword = Some(line.to_string()),
            (Some(headword), None) => {
                self.pending_headword = Some(headword);
                self.pending_reading = Some(line.to_string());
            }
            (Some(headword), Some(reading)) => {
                self.terms.push(Term::new(headword, reading, line));
            }
        }
    }

    /// True while a term has been started but not finished.
    pub fn is_dirty(&self) -> bool {
        self.pending_headword.is_some()
    }

    /// Render every term once per format name, formats outermost.
    ///
    /// Fails as a whole on the first invalid format name; nothing rendered
    /// before it is returned.
    pub fn display<S: AsRef<str>>(&self, format_names: &[S]) -> Result<String, CommandError> {
        if format_names.is_empty() {
            return Err(CommandError::NoOutputFormats);
        }

        let mut output = String::new();
        for name in format_names {
            for term in &self.terms {
                output.push_str(&term.format(name.as_ref())?);
            }
        }
        Ok(output)
    }
}
