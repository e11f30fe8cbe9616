//! Error types for quizlet-core.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Validation failure of a single markup line.
///
/// The `Display` text is the message shown to the user after the
/// `Error on line N: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("cannot open new group, already inside group")]
    AlreadyInGroup,

    #[error("no group name specified")]
    MissingGroupName,

    /// `allowed` is how many parameters the command accepts.
    #[error("{}", too_many_parameters(.allowed))]
    TooManyParameters { allowed: usize },

    #[error("group already exists: {0}")]
    DuplicateGroupName(String),

    #[error("cannot close group, not inside group")]
    NotInGroup,

    #[error("group contains an incomplete term (check to make sure each term has corresponding pinyin and definition)")]
    IncompleteTerm,

    #[error("this command is not allowed inside a group")]
    ShowGroupInsideGroup,

    #[error("group does not exist: {0}")]
    UnknownGroup(String),

    #[error("no output formats specified")]
    NoOutputFormats,

    #[error("invalid format name specified: {0}")]
    InvalidFormatName(String),

    #[error("unknown parser command: {0}")]
    UnknownCommand(String),

    #[error("only parser commands are allowed outside groups")]
    TermOutsideGroup,

    #[error("group not closed")]
    GroupNotClosed,
}

fn too_many_parameters(allowed: &usize) -> &'static str {
    if *allowed == 0 {
        "this command takes no arguments"
    } else {
        "too many parameters"
    }
}

/// The first error of a document, located at the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: {kind}\n\n{raw}")]
pub struct ParseError {
    /// 1-based line number; the synthetic end marker counts as the line after the last one.
    pub line: usize,
    /// Raw text of the offending line.
    pub raw: String,
    pub kind: CommandError,
}

impl ParseError {
    pub fn new(line: usize, raw: impl Into<String>, kind: CommandError) -> Self {
        Self {
            line,
            raw: raw.into(),
            kind,
        }
    }

    /// The user-facing message without the line prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Serialize for ParseError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ParseError", 3)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("raw", &self.raw)?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
