//! All errors related to commit messages.

use std::fmt;

use winnow::error::{ContextError, ParseError, StrContext};

use crate::parser;

/// The error returned when parsing a commit message fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,

    commit: Option<String>,
}

impl Error {
    /// Create a new error from a `ErrorKind`.
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { kind, commit: None }
    }

    pub(crate) fn with_parser(commit: &str, err: &ParseError<&str, ContextError>) -> Self {
        use ErrorKind::{InvalidFormat, InvalidScope, MissingDescription, MissingType, UnknownType};

        // The innermost label names the rule that actually failed.
        let kind = err
            .inner()
            .context()
            .find_map(|context| match context {
                StrContext::Label(label) => Some(*label),
                _ => None,
            })
            .map_or(InvalidFormat, |label| match label {
                parser::TYPE => MissingType,
                parser::KNOWN_TYPE => UnknownType,
                parser::SCOPE => InvalidScope,
                parser::DESCRIPTION => MissingDescription,
                _ => InvalidFormat,
            });

        Self::new(kind).set_commit(commit)
    }

    pub(crate) fn set_commit(mut self, commit: &str) -> Self {
        self.commit = Some(commit.to_owned());
        self
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The commit message that failed to parse, if known.
    pub fn commit(&self) -> Option<&str> {
        self.commit.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for Error {}

/// All possible error kinds returned when parsing a commit message.
///
/// Each kind narrows down which part of the header line,
/// `<type>[(<scope>)][!]: <description>`, is malformed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The commit type is missing from the commit message.
    MissingType,

    /// The commit type is not one of the recognized commit types.
    UnknownType,

    /// The scope has an invalid format.
    InvalidScope,

    /// The description of the commit is missing.
    MissingDescription,

    /// Any other part of the commit does not conform to the conventional
    /// commit header format.
    InvalidFormat,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingType => f.write_str("missing type definition"),
            Self::UnknownType => f.write_str("unrecognized commit type"),
            Self::InvalidScope => f.write_str("invalid scope format"),
            Self::MissingDescription => f.write_str("missing commit description"),
            Self::InvalidFormat => f.write_str("invalid commit format"),
        }
    }
}
