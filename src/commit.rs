//! The commit type classifier and the structured commit message.

use std::fmt;
use std::str::FromStr;

use crate::parser::parse;
use crate::{Error, ErrorKind};

const BREAKING_PHRASE: &str = "BREAKING CHANGE:";
const BREAKING_ARROW: &str = "BREAKING-CHANGE:";

/// The category of a commit.
///
/// Every category renders as one canonical keyword (see
/// [`CommitType::keyword`]) and is recognized from a handful of
/// case-insensitive aliases (see [`CommitType::aliases`]).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommitType {
    /// Not a recognized commit type.
    #[default]
    None,
    /// Changes to the build system or dependencies.
    Build,
    /// Changes to continuous integration.
    Ci,
    /// Other changes that don't touch sources or tests.
    Chore,
    /// Documentation only changes.
    Doc,
    /// A new feature (correlates with `minor` in semver).
    Feature,
    /// A bug fix (correlates with `patch` in semver).
    Fix,
    /// A performance improvement.
    Perf,
    /// A code change that neither fixes a bug nor adds a feature.
    Refactor,
    /// Formatting and whitespace changes.
    Style,
    /// Adding or correcting tests.
    Test,
}

impl CommitType {
    /// Every recognized commit type, excluding [`CommitType::None`].
    pub const ALL: [CommitType; 10] = [
        CommitType::Build,
        CommitType::Ci,
        CommitType::Chore,
        CommitType::Doc,
        CommitType::Feature,
        CommitType::Fix,
        CommitType::Perf,
        CommitType::Refactor,
        CommitType::Style,
        CommitType::Test,
    ];

    /// Classify a free-form token, ignoring case.
    ///
    /// Only whole-token matches against [`CommitType::aliases`] count;
    /// anything else is [`CommitType::None`].
    ///
    /// ```rust
    /// use commit_format::CommitType;
    ///
    /// assert_eq!(CommitType::classify("Features"), CommitType::Feature);
    /// assert_eq!(CommitType::classify("fixes"), CommitType::Fix);
    /// assert_eq!(CommitType::classify("buildsomething"), CommitType::None);
    /// ```
    pub fn classify(token: &str) -> Self {
        // Keep in sync with `aliases`.
        match token.to_lowercase().as_str() {
            "b" | "build" | "builds" => Self::Build,
            "ci" => Self::Ci,
            "ch" | "chore" | "chores" => Self::Chore,
            "d" | "doc" | "docs" => Self::Doc,
            "fe" | "feat" | "feats" | "feature" | "features" => Self::Feature,
            "fi" | "fix" | "fixes" => Self::Fix,
            "p" | "perf" | "perfs" | "performance" | "performances" => Self::Perf,
            "r" | "refactor" | "refactors" => Self::Refactor,
            "s" | "style" | "styles" => Self::Style,
            "t" | "test" | "tests" => Self::Test,
            _ => Self::None,
        }
    }

    /// The keyword used when rendering a commit message.
    ///
    /// [`CommitType::None`] renders as an empty keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Doc => "doc",
            Self::Feature => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Refactor => "refactor",
            Self::Style => "style",
            Self::Test => "test",
        }
    }

    /// The lowercase tokens [`CommitType::classify`] accepts for this type.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::None => &[],
            Self::Build => &["b", "build", "builds"],
            Self::Ci => &["ci"],
            Self::Chore => &["ch", "chore", "chores"],
            Self::Doc => &["d", "doc", "docs"],
            Self::Feature => &["fe", "feat", "feats", "feature", "features"],
            Self::Fix => &["fi", "fix", "fixes"],
            Self::Perf => &["p", "perf", "perfs", "performance", "performances"],
            Self::Refactor => &["r", "refactor", "refactors"],
            Self::Style => &["s", "style", "styles"],
            Self::Test => &["t", "test", "tests"],
        }
    }

    /// Whether this is the "not recognized" sentinel.
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for CommitType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match Self::classify(token) {
            Self::None => Err(Error::new(ErrorKind::UnknownType).set_commit(token)),
            ty => Ok(ty),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CommitType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.keyword())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CommitType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let token = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        token.parse::<Self>().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for CommitType {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "CommitType".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        let keywords: Vec<&str> = Self::ALL.iter().map(|ty| ty.keyword()).collect();
        schemars::json_schema!({
            "type": "string",
            "enum": keywords,
        })
    }
}

/// A conventional commit message.
///
/// Empty `scope` and `body`, and no `footers`, mean the part is absent.
///
/// ```rust
/// use commit_format::{CommitMessage, CommitType};
///
/// let message = CommitMessage::new(CommitType::Feature, "message")
///     .with_scope("scope")
///     .with_breaking(true)
///     .with_body("The message body")
///     .with_footers(["First foot", "Second foot"]);
///
/// assert_eq!(
///     message.to_string(),
///     "feat(scope)!: message\n\nThe message body\n\nFirst foot\nSecond foot"
/// );
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CommitMessage {
    /// The type of the commit.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: CommitType,
    /// The optional scope of the commit.
    pub scope: String,
    /// The one-line commit description.
    pub description: String,
    /// Marks the commit with `!` as introducing a breaking change.
    pub breaking: bool,
    /// The commit body, containing a more detailed explanation of the commit
    /// changes.
    pub body: String,
    /// Trailing lines, kept verbatim.
    pub footers: Vec<String>,
}

impl CommitMessage {
    /// Start a commit message from its type and description.
    pub fn new(ty: CommitType, description: impl Into<String>) -> Self {
        Self {
            ty,
            description: description.into(),
            ..Self::default()
        }
    }

    /// Parse a commit message.
    ///
    /// Trailing whitespace is ignored. The first paragraph after the header
    /// is the body and every remaining non-blank line is a footer.
    ///
    /// # Errors
    ///
    /// This function returns an error if the first line is not a
    /// `<type>[(<scope>)][!]: <description>` header with a recognized type.
    pub fn parse(string: &str) -> Result<Self, Error> {
        let (ty, scope, breaking, description, body, footers) = parse(string)?;

        Ok(Self {
            ty,
            scope: scope.unwrap_or_default().to_owned(),
            description: description.to_owned(),
            breaking,
            body: body.join("\n"),
            footers: footers.into_iter().map(str::to_owned).collect(),
        })
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Set the breaking change marker.
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = breaking;
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append one footer line.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footers.push(footer.into());
        self
    }

    /// Append several footer lines.
    pub fn with_footers<I>(mut self, footers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.footers.extend(footers.into_iter().map(Into::into));
        self
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set either when the commit has an exclamation mark after
    /// the message type and scope, e.g.:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when a footer starts with `BREAKING CHANGE:`:
    /// ```text
    /// feat: my commit description
    ///
    /// details
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn is_breaking(&self) -> bool {
        self.breaking
            || self
                .footers
                .iter()
                .any(|footer| footer.starts_with(BREAKING_PHRASE) || footer.starts_with(BREAKING_ARROW))
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ty.keyword())?;

        if !self.scope.is_empty() {
            write!(f, "({})", self.scope)?;
        }

        if self.breaking {
            f.write_str("!")?;
        }

        write!(f, ": {}", self.description)?;

        if !self.body.is_empty() {
            write!(f, "\n\n{}", self.body)?;
        }

        if !self.footers.is_empty() {
            write!(f, "\n\n{}", self.footers.join("\n"))?;
        }

        Ok(())
    }
}

impl FromStr for CommitMessage {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}
