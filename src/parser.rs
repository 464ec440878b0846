use winnow::combinator::{cut_err, delimited, not, opt, preceded, trace};
use winnow::error::StrContext;
use winnow::token::{one_of, take_while};
use winnow::{ModalResult, Parser};

use crate::{CommitType, Error};

type Summary<'a> = (CommitType, Option<&'a str>, bool, &'a str);

type CommitDetails<'a> = (
    CommitType,
    Option<&'a str>,
    bool,
    &'a str,
    Vec<&'a str>,
    Vec<&'a str>,
);

// <message>         ::= <summary>, <newline>, <blank>*, <body>, (<blank>+, <footer>)*
//                    |  <summary>, <newline>*
pub(crate) fn parse(i: &str) -> Result<CommitDetails<'_>, Error> {
    let message = i.trim_end();
    let mut lines = message.lines();

    let header = lines.next().unwrap_or_default();
    let (ty, scope, breaking, description) = summary
        .parse(header)
        .map_err(|err| Error::with_parser(i, &err))?;

    let mut lines = lines.skip_while(|line| is_blank(line));
    let body = lines.by_ref().take_while(|line| !is_blank(line)).collect();
    // Anything past the body, including further paragraphs, is footer lines.
    let footers = lines.filter(|line| !is_blank(line)).collect();

    Ok((ty, scope, breaking, description, body, footers))
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

// <CR>              ::= "0x000D"
// <LF>              ::= "0x000A"
fn is_line_ending(c: char) -> bool {
    c == '\n' || c == '\r'
}

// <parens>          ::= "(" | ")"
fn is_parens(c: char) -> bool {
    c == '(' || c == ')'
}

// <summary>         ::= <type>, ["(", <scope>, ")"], ["!"], ": ", <description>
fn summary<'i>(i: &mut &'i str) -> ModalResult<Summary<'i>> {
    trace(
        "summary",
        (
            type_,
            opt(scope_block),
            opt('!').map(|bang: Option<char>| bang.is_some()),
            preceded(separator, cut_err(description)),
        ),
    )
    .context(StrContext::Label(SUMMARY))
    .parse_next(i)
}

pub(crate) const SUMMARY: &str = "summary";

// <type>            ::= <any UTF8-octets except newline or parens or ":" or "!" or whitespace>+
//
// The token must also name one of the known commit types.
fn type_(i: &mut &str) -> ModalResult<CommitType> {
    trace(
        "type",
        take_while(1.., |c: char| {
            !is_line_ending(c) && !is_parens(c) && c != ':' && c != '!' && !c.is_whitespace()
        })
        .context(StrContext::Label(TYPE))
        .verify_map(|token: &str| Some(CommitType::classify(token)).filter(|ty| !ty.is_none()))
        .context(StrContext::Label(KNOWN_TYPE)),
    )
    .parse_next(i)
}

pub(crate) const TYPE: &str = "type";
pub(crate) const KNOWN_TYPE: &str = "known type";

fn scope_block<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    delimited(
        '(',
        cut_err(scope),
        cut_err(')').context(StrContext::Label(SCOPE)),
    )
    .parse_next(i)
}

// <scope>           ::= <any UTF8-octets except newline or parens>+
fn scope<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace(
        "scope",
        take_while(1.., |c: char| !is_line_ending(c) && !is_parens(c)),
    )
    .context(StrContext::Label(SCOPE))
    .parse_next(i)
}

pub(crate) const SCOPE: &str = "scope";

// <separator>       ::= ":", " "
//
// Exactly one space: the description may not start with more whitespace.
fn separator(i: &mut &str) -> ModalResult<()> {
    trace("separator", (':', ' ', not(one_of(char::is_whitespace))).void())
        .context(StrContext::Label(SEPARATOR))
        .parse_next(i)
}

pub(crate) const SEPARATOR: &str = "separator";

// <description>     ::= <any UTF8-octets except newline>+
fn description<'i>(i: &mut &'i str) -> ModalResult<&'i str> {
    trace("description", take_while(1.., |c: char| !is_line_ending(c)))
        .context(StrContext::Label(DESCRIPTION))
        .parse_next(i)
}

pub(crate) const DESCRIPTION: &str = "description";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    mod message {
        use super::*;

        #[test]
        fn errors() {
            let err = parse("Hello World").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownType);
            assert_eq!(err.commit(), Some("Hello World"));

            let err = parse("fix Improved error messages\n").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);

            let err = parse("").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingType);

        }

        #[test]
        fn body_without_blank_line() {
            let (ty, _, _, description, body, footers) =
                parse("feat: subject\nbody line\nmore body\n\nRefs: #1").unwrap();

            assert_eq!(ty, CommitType::Feature);
            assert_eq!(description, "subject");
            assert_eq!(body, ["body line", "more body"]);
            assert_eq!(footers, ["Refs: #1"]);
        }

        #[test]
        fn header_only() {
            let (ty, scope, breaking, description, body, footers) =
                parse("feat(api)!: hello world\n\n\n").unwrap();

            assert_eq!(ty, CommitType::Feature);
            assert_eq!(scope, Some("api"));
            assert!(breaking);
            assert_eq!(description, "hello world");
            assert!(body.is_empty());
            assert!(footers.is_empty());
        }

        #[test]
        fn body_keeps_line_breaks() {
            let (_, _, _, _, body, footers) =
                parse("fix: message\n\nfirst line\n    indented\nlast line\n").unwrap();

            assert_eq!(body, ["first line", "    indented", "last line"]);
            assert!(footers.is_empty());
        }

        #[test]
        fn extra_blank_lines_collapse() {
            let (_, _, _, _, body, footers) =
                parse("fix: message\n\n\n\nbody\n \n\nfoot 1\nfoot 2").unwrap();

            assert_eq!(body, ["body"]);
            assert_eq!(footers, ["foot 1", "foot 2"]);
        }

        #[test]
        fn later_paragraphs_become_footers() {
            let (_, _, _, _, body, footers) =
                parse("docs: message\n\nbody\n\nsecond\nparagraph\n\nRefs: #1").unwrap();

            assert_eq!(body, ["body"]);
            assert_eq!(footers, ["second", "paragraph", "Refs: #1"]);
        }

        #[test]
        fn crlf_line_endings() {
            let (ty, _, _, description, body, footers) =
                parse("test: message\r\n\r\nbody\r\n\r\nfoot\r\n").unwrap();

            assert_eq!(ty, CommitType::Test);
            assert_eq!(description, "message");
            assert_eq!(body, ["body"]);
            assert_eq!(footers, ["foot"]);
        }
    }

    mod summary {
        use super::*;

        #[test]
        fn test_type() {
            let mut p = type_;

            // valid
            assert_eq!(p.parse_peek("feat").unwrap(), ("", CommitType::Feature));
            assert_eq!(p.parse_peek("FEAT").unwrap(), ("", CommitType::Feature));
            assert_eq!(p.parse_peek("fixes: bar").unwrap(), (": bar", CommitType::Fix));
            assert_eq!(p.parse_peek("perf!: bar").unwrap(), ("!: bar", CommitType::Perf));
            assert_eq!(p.parse_peek("ci(bar").unwrap(), ("(bar", CommitType::Ci));
            assert_eq!(p.parse_peek("docs ").unwrap(), (" ", CommitType::Doc));

            // invalid
            assert!(p.parse_peek("").is_err());
            assert!(p.parse_peek(" ").is_err());
            assert!(p.parse_peek(")").is_err());
            assert!(p.parse_peek(" feat").is_err());
            assert!(p.parse_peek("foo").is_err());
            assert!(p.parse_peek("featx: bar").is_err());
        }

        #[test]
        fn test_scope() {
            let mut p = scope;

            // valid
            assert_eq!(p.parse_peek("foo").unwrap(), ("", "foo"));
            assert_eq!(p.parse_peek("foo bar").unwrap(), ("", "foo bar"));
            assert_eq!(p.parse_peek("foo-bar").unwrap(), ("", "foo-bar"));
            assert_eq!(p.parse_peek("x86)").unwrap(), (")", "x86"));

            // invalid
            assert!(p.parse_peek("").is_err());
            assert!(p.parse_peek(")").is_err());
        }

        #[test]
        fn test_summary() {
            let mut p = summary;

            // valid
            assert_eq!(
                p.parse_peek("feat: bar").unwrap(),
                ("", (CommitType::Feature, None, false, "bar"))
            );
            assert_eq!(
                p.parse_peek("fix(bar): baz").unwrap(),
                ("", (CommitType::Fix, Some("bar"), false, "baz"))
            );
            assert_eq!(
                p.parse_peek("chore(bar-baz)!: qux").unwrap(),
                ("", (CommitType::Chore, Some("bar-baz"), true, "qux"))
            );
            assert_eq!(
                p.parse_peek("refactor!: bar (#1)").unwrap(),
                ("", (CommitType::Refactor, None, true, "bar (#1)"))
            );

            // invalid
            assert!(p.parse_peek("").is_err());
            assert!(p.parse_peek("feat").is_err());
            assert!(p.parse_peek("feat bar").is_err());
            assert!(p.parse_peek("feat : bar").is_err());
            assert!(p.parse_peek("feat:bar").is_err());
            assert!(p.parse_peek("feat:  bar").is_err());
            assert!(p.parse_peek("feat: ").is_err());
            assert!(p.parse_peek("feat(: bar").is_err());
            assert!(p.parse_peek("feat): bar").is_err());
            assert!(p.parse_peek("feat(): bar").is_err());
            assert!(p.parse_peek("feat(bar)").is_err());
            assert!(p.parse_peek("feat(bar) : baz").is_err());
            assert!(p.parse_peek("feat (bar): baz").is_err());
            assert!(p.parse_peek("feat!(bar): baz").is_err());
        }

        #[test]
        fn error_kinds() {
            let kind = |header: &str| parse(header).unwrap_err().kind();

            assert_eq!(kind(": bar"), ErrorKind::MissingType);
            assert_eq!(kind("feature-ish: bar"), ErrorKind::UnknownType);
            assert_eq!(kind("feat(): bar"), ErrorKind::InvalidScope);
            assert_eq!(kind("feat(bar: baz"), ErrorKind::InvalidScope);
            assert_eq!(kind("feat:bar"), ErrorKind::InvalidFormat);
            assert_eq!(kind("feat:  bar"), ErrorKind::InvalidFormat);
        }
    }
}
