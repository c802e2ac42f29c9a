use std::env;
use std::rc::Rc;
use std::str::FromStr;
use url::Url;

use crate::api::{
    Command, CommandSummary, LocalFileSystem, OptionPromise, OptionalPromise, PathInspector,
    Promise,
};
use crate::parser::{ConfigError, Parser, Specification, TokenSets};
use crate::prelude::CommandHandler;

impl<'a> Parser<'a> {
    /// Create a command line parser over the input `tokens`.
    ///
    /// The first positional token is the invocation label (ex: the program name), shown in the usage text.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::Parser;
    ///
    /// let parser = Parser::new(&["program"]);
    /// assert_eq!(parser.usage(), "Usage: program\n");
    /// ```
    pub fn new(tokens: &[&str]) -> Self {
        Self::scoped(
            TokenSets::classify(tokens),
            None,
            Vec::default(),
            Rc::new(LocalFileSystem),
        )
    }

    /// Create a command line parser over the Cli [`env::args`].
    pub fn from_env() -> Self {
        let arguments: Vec<String> = env::args().collect();
        Self::new(
            arguments
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    pub(crate) fn scoped(
        tokens: TokenSets,
        command: Option<CommandSummary>,
        options: Vec<OptionPromise>,
        inspector: Rc<dyn PathInspector>,
    ) -> Self {
        Self {
            tokens,
            specification: Vec::default(),
            command,
            options,
            inspector,
        }
    }

    /// Replace the filesystem lookup used by the `existing_*` registrations.
    /// Command parsers inherit this inspector.
    pub fn with_path_inspector(mut self, inspector: impl PathInspector + 'static) -> Self {
        self.inspector = Rc::new(inspector);
        self
    }

    pub(crate) fn path_inspector(&self) -> Rc<dyn PathInspector> {
        self.inspector.clone()
    }

    fn has_optional(&self) -> bool {
        self.specification.iter().any(|specification| {
            matches!(specification, Specification::Positional(promise) if promise.is_optional())
        })
    }

    fn has_commands(&self) -> bool {
        self.specification
            .iter()
            .any(|specification| matches!(specification, Specification::Commands(_)))
    }

    /// Declare a required positional of type `T`, or explain why it cannot be declared here.
    ///
    /// A required positional may not follow an optional positional, nor the commands.
    pub fn try_argument<T: FromStr + 'a>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<Promise<T>, ConfigError> {
        let name = name.into();

        if self.has_optional() {
            return Err(ConfigError(format!(
                "Cannot specify required argument '{name}' after optional argument."
            )));
        }

        if self.has_commands() {
            return Err(ConfigError(format!(
                "Cannot specify argument '{name}' after command. Instead add it to the command parser."
            )));
        }

        let promise = Promise::new(name);
        self.specification
            .push(Specification::Positional(promise.binding()));
        Ok(promise)
    }

    /// Declare an optional positional of type `T`, or explain why it cannot be declared here.
    ///
    /// An optional positional may not follow the commands.
    pub fn try_optional_argument<T: FromStr + 'a>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<OptionalPromise<T>, ConfigError> {
        let name = name.into();

        if self.has_commands() {
            return Err(ConfigError(format!(
                "Cannot specify argument '{name}' after command. Instead add it to the command parser."
            )));
        }

        let promise = OptionalPromise::new(name);
        self.specification
            .push(Specification::Positional(promise.binding()));
        Ok(promise)
    }

    /// Declare a required positional of type `T`.
    ///
    /// Panics when declared after an optional positional, or after the commands.
    /// These are bugs in the calling program (see [`Parser::try_argument`]).
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::Parser;
    ///
    /// let mut parser = Parser::new(&["program", "1.5"]);
    /// let ratio = parser.argument::<f64>("ratio");
    /// parser.parse().unwrap();
    ///
    /// assert_eq!(ratio.value().unwrap(), 1.5);
    /// ```
    pub fn argument<T: FromStr + 'a>(&mut self, name: impl Into<String>) -> Promise<T> {
        self.try_argument(name)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    /// Declare an optional positional of type `T`.
    ///
    /// Panics when declared after the commands (see [`Parser::try_optional_argument`]).
    pub fn optional_argument<T: FromStr + 'a>(
        &mut self,
        name: impl Into<String>,
    ) -> OptionalPromise<T> {
        self.try_optional_argument(name)
            .unwrap_or_else(|error| panic!("{error}"))
    }

    /// Declare a required string positional.
    pub fn string(&mut self, name: impl Into<String>) -> Promise<String> {
        self.argument(name)
    }

    /// Declare a required integer positional.
    pub fn int(&mut self, name: impl Into<String>) -> Promise<i64> {
        self.argument(name)
    }

    /// Declare a required url positional.
    pub fn url(&mut self, name: impl Into<String>) -> Promise<Url> {
        self.argument(name)
    }

    /// Declare an optional string positional.
    pub fn optional_string(&mut self, name: impl Into<String>) -> OptionalPromise<String> {
        self.optional_argument(name)
    }

    /// Declare an optional integer positional.
    pub fn optional_int(&mut self, name: impl Into<String>) -> OptionalPromise<i64> {
        self.optional_argument(name)
    }

    /// Declare an optional url positional.
    pub fn optional_url(&mut self, name: impl Into<String>) -> OptionalPromise<Url> {
        self.optional_argument(name)
    }

    /// Declare a flag, matched via `--NAME` or the `-N` abbreviation anywhere in the input.
    ///
    /// Options may be declared at any point; they are visible to all command parsers.
    pub fn option(&mut self, name: impl Into<String>, abbreviation: Option<char>) -> OptionPromise {
        let option = OptionPromise::new(name, abbreviation);
        self.options.push(option.clone());
        option
    }

    /// Add a command to the trailing group of commands.
    ///
    /// Once a command is added, no more positionals may be declared on this parser.
    /// Declare those on the command's own parser instead.
    pub fn command(&mut self, command: Command<'a>) {
        match self.specification.last_mut() {
            Some(Specification::Commands(commands)) => commands.push(command),
            _ => self
                .specification
                .push(Specification::Commands(vec![command])),
        }
    }

    /// Add a self-describing command to the trailing group of commands.
    pub fn command_handler<H: CommandHandler + 'a>(&mut self) {
        self.command(Command::from_handler::<H>());
    }
}
