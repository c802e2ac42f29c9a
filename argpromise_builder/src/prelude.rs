//! Traits which, typically, may be imported without concern: `use argpromise::prelude::*`.
use crate::parser::{ParseError, Parser};

/// Behaviour to describe a command, independent of how it is dispatched.
///
/// Typically derived via `#[derive(CommandDescription)]` (see `argpromise::derive`).
// Needs to be imported in order to implement a self-describing command.
pub trait CommandDescription {
    /// The token which selects this command on the Cli.
    fn name() -> &'static str;

    /// The one-line description, shown beside the name in the command listing.
    fn short_description() -> Option<&'static str> {
        None
    }

    /// The full description, shown in the usage text of the command itself.
    fn long_description() -> Option<&'static str> {
        None
    }
}

/// Behaviour for a self-describing command: a [`CommandDescription`] with a static dispatch function.
///
/// Register with [`Parser::command_handler`].
// Needs to be imported in order to implement a self-describing command.
pub trait CommandHandler: CommandDescription {
    /// Handle the command, using the child `parser` scoped to the tokens after the command name.
    fn handle(parser: Parser<'_>) -> Result<(), ParseError>;
}
