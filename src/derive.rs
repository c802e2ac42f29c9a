//! Derive Api for `argpromise` command descriptions.
//!
//! ### Getting Started
//! Describe a command on its handler type via `#[derive(CommandDescription)]`.
//! Then implement [`CommandHandler`](../prelude/trait.CommandHandler.html) for the same type, and register it with [`Parser::command_handler`](../struct.Parser.html#method.command_handler).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_derived.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ demo_derived
//! Usage: demo_derived <command>
//!
//! The following commands are available:
//!
//!     greet    Greet someone.
//!     count    Count up to a number.
//!
//! $ demo_derived greet -h
//! Usage: demo_derived greet <name> [greeting]
//!
//! Print the greeting for someone.
//!
//! The name is taken as is.
//!
//! $ demo_derived count 0
//! Failed to parse limit: it must be positive
//! Usage: demo_derived count <limit>
//! ```
//!
//! ### Configuration
//! The command description is inferred from the type, and may be overridden with `#[command(..)]` attributes:
//! * `#[command(name = "..")]` sets the token which selects the command.
//! Defaults to the type name in kebab case (ex: `RemoteAdd` becomes `remote-add`).
//! * `#[command(short = "..")]` sets the one-line description, shown when listing the commands.
//! Defaults to none.
//! * `#[command(long = "..")]` sets the full description, shown in the command's own usage text.
//! Defaults to the doc comment of the type, if any.
//!
//! If an attribute is repeated, only the final value applies.
pub use argpromise_derive::*;
