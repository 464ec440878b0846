//! Parse, classify and render [Conventional Commit] messages.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! # Example
//!
//! ```rust
//! use commit_format::{CommitMessage, CommitType};
//! use indoc::indoc;
//!
//! let message = indoc!("
//!     Docs(example)!: add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: readers now have something to read
//!     Closes #12
//! ");
//!
//! let commit = CommitMessage::parse(message).unwrap();
//!
//! // Type tokens are classified case-insensitively, plurals included.
//! assert_eq!(commit.ty, CommitType::Doc);
//! assert_eq!(commit.scope, "example");
//! assert_eq!(commit.description, "add tested usage example");
//! assert!(commit.breaking);
//!
//! // The first paragraph after the header is the body...
//! assert!(commit.body.contains("helps people understand"));
//!
//! // ...and every line after it is an opaque footer.
//! assert_eq!(commit.footers, ["BREAKING CHANGE: readers now have something to read", "Closes #12"]);
//!
//! // Rendering always uses the canonical keyword.
//! assert!(commit.to_string().starts_with("doc(example)!: add tested usage example\n\n"));
//! ```

#![warn(missing_docs)]

mod commit;
mod error;
mod parser;

pub use commit::{CommitMessage, CommitType};
pub use error::{Error, ErrorKind};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
