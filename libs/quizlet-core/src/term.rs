//! Vocabulary terms and their output formats.

use crate::error::CommandError;
use crate::escaper::escape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output layout for a term. Each format is one tab-separated flashcard line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// `headword<TAB>reading: definition`
    Reading,
    /// `definition<TAB>reading: headword`
    Writing,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Reading, Format::Writing];

    /// Name used in `#showgroup` commands.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Writing => "writing",
        }
    }

    /// Look up a format by its command name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CommandError::InvalidFormatName(s.to_string()))
    }
}

/// One vocabulary entry. The reading is stored already escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub headword: String,
    pub reading: String,
    pub definition: String,
}

impl Term {
    /// Build a term from its raw lines, converting tone numbers in the reading.
    pub fn new(
        headword: impl Into<String>,
        reading: impl AsRef<str>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            headword: headword.into(),
            reading: escape(reading.as_ref()),
            definition: definition.into(),
        }
    }

    /// Render the term using the format called `name`.
    pub fn format(&self, name: &str) -> Result<String, CommandError> {
        let format = name.parse::<Format>()?;
        Ok(self.render(format))
    }

    pub fn render(&self, format: Format) -> String {
        match format {
            Format::Reading => format!("{}\t{}: {}\n", self.headword, self.reading, self.definition),
            Format::Writing => format!("{}\t{}: {}\n", self.definition, self.reading, self.headword),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hello() -> Term {
        Term::new("你好", "ni3 hao3", "hello")
    }

    #[test]
    fn new_escapes_reading() {
        let term = hello();
        assert_eq!(term.headword, "你好");
        assert_eq!(term.reading, "nǐ hǎo");
        assert_eq!(term.definition, "hello");
    }

    #[test]
    fn format_reading() {
        assert_eq!(hello().format("reading").unwrap(), "你好\tnǐ hǎo: hello\n");
    }

    #[test]
    fn format_writing() {
        assert_eq!(hello().format("writing").unwrap(), "hello\tnǐ hǎo: 你好\n");
    }

    #[test]
    fn format_rejects_unknown_name() {
        assert_eq!(
            hello().format("Reading"),
            Err(CommandError::InvalidFormatName("Reading".to_string()))
        );
        assert_eq!(
            hello().format(""),
            Err(CommandError::InvalidFormatName(String::new()))
        );
    }

    #[test]
    fn format_names_are_stable() {
        for format in Format::ALL {
            assert_eq!(Format::from_name(format.name()), Some(format));
            assert_eq!(format.to_string(), format.name());
        }
        assert_eq!(Format::from_name("bogus"), None);
    }
}
