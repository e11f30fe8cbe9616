//! Line classification for the markup language.
//!
//! # Format
//! ```text
//! ## a comment
//! #group animals
//! 猫
//! mao1
//! cat
//! #endgroup
//! #showgroup animals reading writing
//! ```

/// Marker appended after the last real line to validate the final state.
pub const END_OF_FILE: &str = "#endfile";

/// One classified input line. Command variants carry the words after the keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Empty,
    Comment,
    Group { args: Vec<&'a str> },
    EndGroup { args: Vec<&'a str> },
    ShowGroup { args: Vec<&'a str> },
    EndFile { args: Vec<&'a str> },
    Unknown(&'a str),
    /// Headword, reading or definition line inside a group.
    Content(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line.is_empty() {
            return Self::Empty;
        }
        if !line.starts_with('#') {
            return Self::Content(line);
        }

        let mut words = split_words(line);
        let args = words.split_off(1);
        match words[0] {
            "##" => Self::Comment,
            "#group" => Self::Group { args },
            "#endgroup" => Self::EndGroup { args },
            "#showgroup" => Self::ShowGroup { args },
            END_OF_FILE => Self::EndFile { args },
            other => Self::Unknown(other),
        }
    }
}

/// Split a command line on single spaces.
///
/// Empty words between consecutive spaces are kept, trailing empty words are
/// dropped. The first word is never empty for a line starting with `#`.
pub fn split_words(line: &str) -> Vec<&str> {
    let mut words: Vec<&str> = line.split(' ').collect();
    while words.len() > 1 && words.last().is_some_and(|word| word.is_empty()) {
        words.pop();
    }
    words
}

/// Split a document into input lines.
///
/// A trailing `\r` is stripped from each line and trailing empty lines are
/// dropped, so a final newline never changes the result.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}
