//! `argpromise` is a declarative command line parser for Rust.
//!
//! Programs declare what they expect from the Cli, and receive *promises* for the parsed values.
//! Parsing then happens in a single step, after which every promise may be read.
//! `argpromise` prioritizes the following design concerns:
//! * *Type safe argument parsing*:
//! The user should not call any `&str -> T` conversion functions directly.
//! * *Declared, then parsed*:
//! Values are requested before they exist, and become readable once the parse succeeds.
//! Reading a required value before then is an explicit error, never a crash.
//! * *Sub-command paradigm*:
//! Commands may nest to any depth, each with its own arguments and its own usage text.
//! * *Basic UX*:
//! Any failure produces a single message, including the usage text of the (sub-)command at fault.
//!
//! # Usage
//! This page includes a few demos on using `argpromise`.
//! More examples are outlined in [the source](https://github.com/sawatzkylindsey/argpromise/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_copy.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ demo_copy -h
//! Usage: demo_copy [--verbose] <source> <destination> [copies]
//!
//! $ demo_copy Cargo.toml backup 2
//! Cargo.toml -> backup.0
//! Cargo.toml -> backup.1
//!
//! $ demo_copy Cargo.toml
//! Usage: demo_copy [--verbose] <source> <destination> [copies]
//!
//! $ demo_copy Cargo.toml backup 20
//! Failed to parse copies: it must be between 1 and 10
//! Usage: demo_copy [--verbose] <source> <destination> [copies]
//!
//! $ demo_copy missing.txt backup
//! Failed to parse source: the file doesn't exist
//! Usage: demo_copy [--verbose] <source> <destination> [copies]
//! ```
//!
//! # Builder Api
//! Configure `argpromise` by starting with a [`Parser`] and registering the expected input, in order.
//!
//! * Arguments are matched positionally.
//! Register them via the typed methods (ex: [`Parser::string`], [`Parser::int`], [`Parser::url`]), or [`Parser::argument`] for any `T: FromStr`.
//! Each returns a [`Promise`] (or [`OptionalPromise`] for the `optional_*` variants).
//! * Required arguments may not follow optional arguments.
//! Arguments may not follow commands.
//! These are bugs in the calling program, so registration panics (use [`Parser::try_argument`] to check instead).
//! * Options are flags, matched via `--NAME` or `-N` anywhere in the input, and registered via [`Parser::option`].
//! Their [`OptionPromise`] reports [`OptionPromise::was_present`].
//! * Values may be validated after conversion via [`Promise::validate`].
//! [`Parser::existing_file`] and [`Parser::existing_directory`] validate against the filesystem.
//!
//! ### Sub-commands
//! Register commands via [`Parser::command`], after any arguments.
//! When the Cli names a command, its handler receives a new [`Parser`] scoped to the tokens after the command name.
//! The handler registers the command's own arguments (or more commands) on that parser, and parses it in turn.
//! Options are shared with every command parser.
//!
//! ```no_run
#![doc = include_str!("../demos/demo_git.rs")]
//! ```
//!
//! ```console
//! $ demo_git
//! Usage: demo_git [--verbose] <command>
//!
//! The following commands are available:
//!
//!     status    Show the working tree status.
//!     remote    Manage the set of tracked repositories.
//!
//! $ demo_git remote -h
//! Usage: demo_git remote [--verbose] <command>
//!
//! Manage the set of repositories ("remotes") whose branches you track.
//!
//! The following commands are available:
//!
//!     add       Add a remote.
//!     remove    Remove a remote.
//!
//! $ demo_git remote add origin https://example.com/repo
//! RemoteAdd { name: "origin", location: "https://example.com/repo" }
//!
//! $ demo_git remote add origin repo
//! Failed to parse location: it is invalid
//! Usage: demo_git remote add [--verbose] <name> <location>
//! ```
//!
//! # Cli Semantics
//! `argpromise` parses the Cli tokens according to the following set of rules.
//!
//! * Tokens starting with `--` are long flags (`--NAME`).
//! * Tokens starting with `-` are short flags, where each character is its own flag (`-abc` is `-a -b -c`).
//! * All other tokens are positional.
//! The first positional is the invocation label (ex: the program name), shown in the usage text.
//! * Positionals are matched against the registered arguments in order.
//! Missing optional arguments are left unset, while extra positionals are ignored.
//! * `-h` or `--help` displays the usage text, once all the arguments of the (sub-)command are matched.
//!
//! # Derive Api
//! Commands may also be described via their handler type; see the [derive Api](./derive/index.html).
//!
//! # Features
//! * `tracing_debug`: emit `tracing::debug!` events while parsing.
pub use argpromise_builder::*;

pub mod derive;
