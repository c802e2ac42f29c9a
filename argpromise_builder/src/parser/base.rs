use std::rc::Rc;
use thiserror::Error;

use crate::api::{Command, CommandSummary, Fulfill, OptionPromise, PathInspector};
use crate::parser::TokenSets;

/// Error from configuring the parser in a way which can never parse correctly.
///
/// This is a bug in the calling program, not in its input.
/// The panicking registration methods (ex: [`Parser::string`]) abort with this message.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// Error from parsing the input tokens.
///
/// The display of each variant is the complete message for the user, including the usage text.
/// Print it verbatim and exit with a non-zero status.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Too few tokens, an unknown command, or an explicit `-h`/`--help`.
    #[error("{0}")]
    Usage(String),

    /// A token could not be converted into its promise type, or was rejected by its validator.
    #[error("Failed to parse {name}: {reason}\n{usage}")]
    Value {
        /// The declared name of the rejected positional.
        name: String,
        /// Why the token was rejected.
        reason: String,
        /// The usage text of the parser which rejected the token.
        usage: String,
    },

    /// A command handler failed for its own reasons.
    #[error(transparent)]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl ParseError {
    /// Wrap a command handler's own failure.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::ParseError;
    ///
    /// let error = ParseError::handler("the database is locked");
    /// assert_eq!(error.to_string(), "the database is locked");
    /// ```
    pub fn handler(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ParseError::Handler(error.into())
    }

    /// The usage text carried by this error, if any.
    pub fn usage(&self) -> Option<&str> {
        match self {
            ParseError::Usage(usage) | ParseError::Value { usage, .. } => Some(usage),
            ParseError::Handler(_) => None,
        }
    }
}

/// One expectation of the specification sequence.
pub(crate) enum Specification<'a> {
    Positional(Box<dyn Fulfill + 'a>),
    Commands(Vec<Command<'a>>),
}

impl<'a> std::fmt::Debug for Specification<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Specification::Positional(promise) => f
                .debug_tuple("Positional")
                .field(&promise.name())
                .finish(),
            Specification::Commands(commands) => f
                .debug_tuple("Commands")
                .field(&commands.iter().map(Command::name).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// The command line parser.
///
/// Parsing happens in two phases:
/// 1. Registration builds the ordered specification (positionals, then at most one trailing group of commands).
/// Each registration returns a promise handle, to be read after parsing.
/// 2. [`Parser::parse`] matches the input tokens against the specification in one pass, fulfilling the promises.
/// A matched command receives a new child `Parser`, scoped to the tokens after the command name.
///
/// `Parser` is single threaded; registration must not happen concurrently.
pub struct Parser<'a> {
    pub(crate) tokens: TokenSets,
    pub(crate) specification: Vec<Specification<'a>>,
    pub(crate) command: Option<CommandSummary>,
    pub(crate) options: Vec<OptionPromise>,
    pub(crate) inspector: Rc<dyn PathInspector>,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("tokens", &self.tokens)
            .field("specification", &self.specification)
            .field("command", &self.command)
            .field("options", &self.options)
            .finish()
    }
}
