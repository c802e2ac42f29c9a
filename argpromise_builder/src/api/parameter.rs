use crate::parser::{ParseError, Parser};
use crate::prelude::CommandHandler;

/// Behaviour to dispatch a matched command onto its child parser.
///
/// Implemented for every `FnOnce(Parser<'a>) -> Result<(), ParseError>`.
/// Implement it directly for handlers which carry their own state (see [`Command::with_dispatch`]).
pub trait Dispatch<'a> {
    /// Run the command with the `parser` scoped to the tokens after the command name.
    fn dispatch(self: Box<Self>, parser: Parser<'a>) -> Result<(), ParseError>;
}

impl<'a, F> Dispatch<'a> for F
where
    F: FnOnce(Parser<'a>) -> Result<(), ParseError>,
{
    fn dispatch(self: Box<Self>, parser: Parser<'a>) -> Result<(), ParseError> {
        (*self)(parser)
    }
}

/// The display side of a command, shared with the child parser for its usage text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CommandSummary {
    pub(crate) name: String,
    pub(crate) short_description: Option<String>,
    pub(crate) long_description: Option<String>,
}

impl CommandSummary {
    /// The description shown in the command's own usage text.
    pub(crate) fn description(&self) -> Option<&str> {
        self.long_description
            .as_deref()
            .or(self.short_description.as_deref())
    }
}

/// A sub-command, selected when its name appears in the command position.
///
/// The command's parser shares the lifetime `'a` of the parser it was added to,
/// so nested commands may borrow the same program variables.
///
/// ### Example
/// ```
/// # use argpromise_builder as argpromise;
/// use argpromise::{Command, Parser};
///
/// let mut name = None;
/// let mut parser = Parser::new(&["program", "greet", "world"]);
/// parser.command(
///     Command::new("greet", |mut parser| {
///         let who = parser.string("who");
///         parser.parse()?;
///         name = who.value().ok();
///         Ok(())
///     })
///     .short_description("Say hello."),
/// );
/// parser.parse().unwrap();
///
/// assert_eq!(name, Some("world".to_string()));
/// ```
pub struct Command<'a> {
    summary: CommandSummary,
    dispatch: Box<dyn Dispatch<'a> + 'a>,
}

impl<'a> std::fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.summary.name)
            .finish()
    }
}

impl<'a> Command<'a> {
    /// Create a command from a name and handler closure.
    ///
    /// The name must match the Cli token exactly (case-sensitive).
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: FnOnce(Parser<'a>) -> Result<(), ParseError> + 'a,
    {
        Self::with_dispatch(name, handler)
    }

    /// Create a command from a name and any [`Dispatch`] implementation.
    pub fn with_dispatch(name: impl Into<String>, dispatch: impl Dispatch<'a> + 'a) -> Self {
        Self {
            summary: CommandSummary {
                name: name.into(),
                ..CommandSummary::default()
            },
            dispatch: Box::new(dispatch),
        }
    }

    /// Create a command from a self-describing [`CommandHandler`] type.
    pub fn from_handler<H: CommandHandler + 'a>() -> Self {
        let mut command = Self::new(H::name(), H::handle);
        command.summary.short_description = H::short_description().map(str::to_string);
        command.summary.long_description = H::long_description().map(str::to_string);
        command
    }

    /// Document the one-line description, shown beside the name when listing the commands.
    /// If repeated, only the final description will apply.
    pub fn short_description(mut self, description: impl Into<String>) -> Self {
        self.summary.short_description.replace(description.into());
        self
    }

    /// Document the full description, shown in the command's own usage text.
    /// If repeated, only the final description will apply.
    pub fn long_description(mut self, description: impl Into<String>) -> Self {
        self.summary.long_description.replace(description.into());
        self
    }

    /// The name of this command.
    pub fn name(&self) -> &str {
        &self.summary.name
    }

    pub(crate) fn summary(&self) -> &CommandSummary {
        &self.summary
    }

    pub(crate) fn dispatch(self, parser: Parser<'a>) -> Result<(), ParseError> {
        self.dispatch.dispatch(parser)
    }
}
