use crate::api::Rejection;
use crate::parser::base::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// What to do after looking at one entry of the specification sequence.
enum Step {
    Next,
    Dispatch,
    Missing,
    Rejected(String, Rejection),
}

impl<'a> Parser<'a> {
    /// Run the parser against its input tokens.
    ///
    /// 1. Every option is matched against the flags of the input.
    /// 2. The specification sequence is matched against the positional tokens, in order.
    /// Each promise is fulfilled by coercing (and validating) its token.
    /// 3. If the sequence ends in commands, the matching command is dispatched with a new parser.
    /// That parser's tokens are the invocation label (now including the command name), followed by the remaining positionals.
    /// 4. Otherwise, if `-h` or `--help` is present, the usage text is returned as an error.
    ///
    /// Any failure stops the parse immediately.
    /// Extra positional tokens beyond the specification are ignored.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::Parser;
    ///
    /// let mut parser = Parser::new(&["command", "value1"]);
    /// let _ = parser.string("argument 1");
    /// let _ = parser.string("argument 2");
    /// let _ = parser.optional_string("argument 3");
    ///
    /// let error = parser.parse().unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Usage: command <argument 1> <argument 2> [argument 3]\n"
    /// );
    /// ```
    pub fn parse(self) -> Result<(), ParseError> {
        self.parse_with(|| {})
    }

    /// Run the parser against its input tokens, calling `before_dispatch` right before a matched command is dispatched.
    ///
    /// `before_dispatch` is not called when there is no command to dispatch, nor when parsing fails beforehand.
    /// See [`Parser::parse`] for the parsing semantics.
    pub fn parse_with(mut self, before_dispatch: impl FnOnce()) -> Result<(), ParseError> {
        self.scan_options();

        for offset in 0..self.specification.len() {
            let token = self.tokens.positional(offset).map(str::to_string);
            let step = match &mut self.specification[offset] {
                Specification::Positional(promise) => match token {
                    Some(token) => match promise.fulfill(&token) {
                        Ok(()) => {
                            #[cfg(feature = "tracing_debug")]
                            {
                                debug!("Fulfilled '{}' with '{token}'.", promise.name());
                            }
                            Step::Next
                        }
                        Err(rejection) => Step::Rejected(promise.name().to_string(), rejection),
                    },
                    None if promise.is_optional() => Step::Next,
                    None => Step::Missing,
                },
                Specification::Commands(_) => Step::Dispatch,
            };

            match step {
                Step::Next => {}
                Step::Dispatch => return self.dispatch(offset, before_dispatch),
                Step::Missing => return Err(self.usage_error()),
                Step::Rejected(name, rejection) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Rejected '{name}': {rejection:?}.");
                    }
                    return Err(ParseError::Value {
                        name,
                        reason: rejection.to_string(),
                        usage: self.usage(),
                    });
                }
            }
        }

        if self.tokens.help_requested() {
            return Err(self.usage_error());
        }

        Ok(())
    }

    pub(crate) fn scan_options(&self) {
        for option in &self.options {
            option.scan(&self.tokens);
        }
    }

    fn dispatch(
        mut self,
        offset: usize,
        before_dispatch: impl FnOnce(),
    ) -> Result<(), ParseError> {
        let position = match (&self.specification[offset], self.tokens.positional(offset)) {
            (Specification::Commands(commands), Some(token)) => {
                commands.iter().position(|command| command.name() == token)
            }
            (Specification::Commands(_), None) => None,
            (Specification::Positional(_), _) => {
                unreachable!("internal error - dispatch must be at the commands")
            }
        };

        let position = match position {
            Some(position) => position,
            None => return Err(self.usage_error()),
        };

        let command = match self.specification.swap_remove(offset) {
            Specification::Commands(mut commands) => commands.swap_remove(position),
            Specification::Positional(_) => {
                unreachable!("internal error - dispatch must be at the commands")
            }
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Dispatching command '{}'.", command.name());
        }

        let Parser {
            tokens,
            options,
            inspector,
            ..
        } = self;
        let child = Self::scoped(
            tokens.descend(offset),
            Some(command.summary().clone()),
            options,
            inspector,
        );
        before_dispatch();
        command.dispatch(child)
    }

    pub(crate) fn usage_error(&self) -> ParseError {
        ParseError::Usage(self.usage())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Command;
    use crate::parser::{ParseError, Parser};
    use crate::test::assert_contains;
    use rand::{thread_rng, Rng};
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn parse_empty() {
        Parser::new(&[]).parse().unwrap();
    }

    #[test]
    fn parse_simple() {
        let mut parser = Parser::new(&["command", "value1", "2"]);
        let argument_1 = parser.string("argument 1");
        let argument_2 = parser.int("argument 2");

        parser.parse().unwrap();

        assert_eq!(argument_1.value().unwrap(), "value1");
        assert_eq!(argument_2.value().unwrap(), 2);
    }

    #[test]
    fn parse_url() {
        let mut parser = Parser::new(&["command", "https://example.com/a"]);
        let location = parser.url("location");

        parser.parse().unwrap();

        assert_eq!(location.value().unwrap().as_str(), "https://example.com/a");
    }

    #[test]
    fn parse_used_optional() {
        let mut parser = Parser::new(&["command", "value1", "value2", "3"]);
        let argument_1 = parser.string("argument 1");
        let argument_2 = parser.optional_string("argument 2");
        let argument_3 = parser.optional_int("argument 3");

        parser.parse().unwrap();

        assert_eq!(argument_1.value().unwrap(), "value1");
        assert_eq!(argument_2.value(), Some("value2".to_string()));
        assert_eq!(argument_3.value(), Some(3));
    }

    #[test]
    fn parse_unused_optional() {
        let mut parser = Parser::new(&["command", "value1"]);
        let argument_1 = parser.string("argument 1");
        let argument_2 = parser.optional_string("argument 2");
        let argument_3 = parser.optional_int("argument 3");

        parser.parse().unwrap();

        assert_eq!(argument_1.value().unwrap(), "value1");
        assert_eq!(argument_2.value(), None);
        assert_eq!(argument_3.value(), None);
    }

    #[test]
    fn parse_extra_ignored() {
        let mut parser = Parser::new(&["command", "a", "b", "c"]);
        let argument = parser.string("argument");

        parser.parse().unwrap();

        assert_eq!(argument.value().unwrap(), "a");
    }

    #[test]
    fn parse_random() {
        for _ in 0..100 {
            let length = thread_rng().gen_range(0..8);
            let values: Vec<i64> = (0..length)
                .map(|_| thread_rng().gen_range(0..=i64::MAX))
                .collect();
            let tokens: Vec<String> = std::iter::once("command".to_string())
                .chain(values.iter().map(|v| v.to_string()))
                .collect();
            let token_refs: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
            let mut parser = Parser::new(token_refs.as_slice());
            let promises: Vec<_> = (0..length)
                .map(|i| parser.int(format!("argument {i}")))
                .collect();

            parser.parse().unwrap();

            let parsed: Vec<i64> = promises.iter().map(|p| p.value().unwrap()).collect();
            assert_eq!(parsed, values);
        }
    }

    #[rstest]
    #[case(vec!["command", "-5"])]
    #[case(vec!["command", "-5", "--", "-"])]
    fn parse_negative_is_flag(#[case] tokens: Vec<&str>) {
        let mut parser = Parser::new(tokens.as_slice());
        let n = parser.int("n");

        let error = parser.parse().unwrap_err();

        assert_matches!(&error, ParseError::Usage(_));
        assert_eq!(error.to_string(), "Usage: command <n>\n");
        assert!(!n.is_fulfilled());
    }

    #[test]
    fn parse_too_few() {
        let mut parser = Parser::new(&["command", "value1"]);
        let argument_1 = parser.string("argument 1");
        let argument_2 = parser.string("argument 2");
        let _ = parser.optional_string("argument 3");

        let error = parser.parse().unwrap_err();

        assert_matches!(&error, ParseError::Usage(_));
        assert_eq!(
            error.to_string(),
            "Usage: command <argument 1> <argument 2> [argument 3]\n"
        );
        assert_eq!(argument_1.value().unwrap(), "value1");
        assert!(argument_2.value().is_err());
    }

    #[rstest]
    #[case(vec!["command", "abc"], "count", "it is invalid")]
    #[case(vec!["command", "1", "x"], "limit", "it is invalid")]
    #[case(vec!["command", "1", "0"], "limit", "it must be positive")]
    fn parse_rejected(
        #[case] tokens: Vec<&str>,
        #[case] expected_name: &str,
        #[case] expected_reason: &str,
    ) {
        let mut parser = Parser::new(tokens.as_slice());
        let _ = parser.int("count");
        let _ = parser.optional_int("limit").validate(|limit| {
            if *limit > 0 {
                Ok(())
            } else {
                Err("it must be positive".to_string())
            }
        });

        let error = parser.parse().unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Failed to parse {expected_name}: {expected_reason}\nUsage: command <count> [limit]\n")
        );
        assert_matches!(error, ParseError::Value { name, reason, .. } => {
            assert_eq!(name, expected_name);
            assert_eq!(reason, expected_reason);
        });
    }

    #[rstest]
    #[case(vec!["command", "a", "-h"])]
    #[case(vec!["command", "a", "--help"])]
    #[case(vec!["command", "-xh", "a"])]
    fn parse_help(#[case] tokens: Vec<&str>) {
        let mut parser = Parser::new(tokens.as_slice());
        let argument = parser.string("argument");

        let error = parser.parse().unwrap_err();

        assert_eq!(error.to_string(), "Usage: command <argument>\n");
        assert_eq!(argument.value().unwrap(), "a");
    }

    #[test]
    fn parse_help_after_missing() {
        // The missing argument is reported before the help request.
        let mut parser = Parser::new(&["command", "-h"]);
        let _ = parser.string("argument");

        let error = parser.parse().unwrap_err();

        assert_eq!(error.to_string(), "Usage: command <argument>\n");
    }

    #[test]
    fn parse_help_after_rejected() {
        let mut parser = Parser::new(&["command", "x", "-h"]);
        let _ = parser.int("argument");

        let error = parser.parse().unwrap_err();

        assert_matches!(error, ParseError::Value { .. });
    }

    #[rstest]
    #[case(vec!["command"], false, false)]
    #[case(vec!["command", "--verbose"], true, false)]
    #[case(vec!["command", "-v"], true, false)]
    #[case(vec!["command", "-q", "--verbose"], true, true)]
    #[case(vec!["command", "--quiet"], false, true)]
    fn parse_options(
        #[case] tokens: Vec<&str>,
        #[case] expected_verbose: bool,
        #[case] expected_quiet: bool,
    ) {
        let mut parser = Parser::new(tokens.as_slice());
        let verbose = parser.option("verbose", Some('v'));
        let quiet = parser.option("quiet", Some('q'));

        parser.parse().unwrap();

        assert_eq!(verbose.was_present(), expected_verbose);
        assert_eq!(quiet.was_present(), expected_quiet);
    }

    #[test]
    fn parse_options_before_failure() {
        let mut parser = Parser::new(&["command", "--verbose"]);
        let verbose = parser.option("verbose", None);
        let _ = parser.string("argument");

        parser.parse().unwrap_err();

        assert!(verbose.was_present());
    }

    #[test]
    fn scan_options_idempotent() {
        let mut parser = Parser::new(&["command", "-v"]);
        let verbose = parser.option("verbose", Some('v'));
        let quiet = parser.option("quiet", Some('q'));

        parser.scan_options();
        let first = (verbose.was_present(), quiet.was_present());
        parser.scan_options();
        let second = (verbose.was_present(), quiet.was_present());

        assert_eq!(first, (true, false));
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(vec!["command", "command1", "a", "b"], "command1", vec!["a", "b"])]
    #[case(vec!["command", "command2"], "command2", vec![])]
    #[case(vec!["command", "command2", "x"], "command2", vec!["x"])]
    fn dispatch(
        #[case] tokens: Vec<&str>,
        #[case] expected_command: &str,
        #[case] expected_remaining: Vec<&str>,
    ) {
        let dispatched: Rc<RefCell<Option<(String, String, Vec<String>)>>> = Rc::default();
        let mut parser = Parser::new(tokens.as_slice());

        for name in ["command1", "command2"] {
            let dispatched = dispatched.clone();
            parser.command(Command::new(name, move |parser| {
                dispatched.borrow_mut().replace((
                    name.to_string(),
                    parser.tokens.label().to_string(),
                    parser.tokens.positionals()[1..].to_vec(),
                ));
                Ok(())
            }));
        }

        parser.parse().unwrap();

        let (command, label, remaining) = dispatched.borrow_mut().take().unwrap();
        assert_eq!(command, expected_command);
        assert_eq!(label, format!("command {expected_command}"));
        assert_eq!(remaining, expected_remaining);
    }

    #[test]
    fn dispatch_after_positionals() {
        let mut remaining = Vec::default();
        let mut parser = Parser::new(&["command", "1", "sub", "x", "y"]);
        let count = parser.int("count");
        parser.command(Command::new("sub", |mut parser| {
            let first = parser.string("first");
            parser.parse()?;
            remaining.push(first.value().unwrap());
            Ok(())
        }));

        parser.parse().unwrap();

        assert_eq!(count.value().unwrap(), 1);
        assert_eq!(remaining, vec!["x".to_string()]);
    }

    #[test]
    fn dispatch_options_inherited() {
        let mut seen = None;
        let mut parser = Parser::new(&["command", "sub", "--verbose"]);
        let verbose = parser.option("verbose", Some('v'));
        parser.command(Command::new("sub", |mut parser| {
            let local = parser.option("local", Some('l'));
            seen = Some(parser.usage());
            parser.parse()?;
            assert!(!local.was_present());
            Ok(())
        }));

        parser.parse().unwrap();

        assert!(verbose.was_present());
        assert_eq!(seen.unwrap(), "Usage: command sub [--verbose] [--local]\n");
    }

    #[rstest]
    #[case(vec!["command"])]
    #[case(vec!["command", "unknown"])]
    #[case(vec!["command", "Command1"])]
    fn dispatch_unmatched(#[case] tokens: Vec<&str>) {
        let mut parser = Parser::new(tokens.as_slice());
        parser.command(Command::new("command1", |_| unreachable!()));
        parser.command(Command::new("command2", |_| unreachable!()));

        let error = parser.parse().unwrap_err();

        assert_eq!(
            error.to_string(),
            "Usage: command <command>\n\nThe following commands are available:\n\n    command1    \n    command2    \n"
        );
    }

    #[test]
    fn dispatch_first_match() {
        let calls = RefCell::new(Vec::default());
        let mut parser = Parser::new(&["command", "same"]);
        parser.command(Command::new("same", |_| {
            calls.borrow_mut().push(1);
            Ok(())
        }));
        parser.command(Command::new("same", |_| {
            calls.borrow_mut().push(2);
            Ok(())
        }));

        parser.parse().unwrap();

        assert_eq!(calls.into_inner(), vec![1]);
    }

    #[test]
    fn dispatch_child_usage() {
        let mut parser = Parser::new(&["command", "command1"]);
        parser.command(Command::new("command1", |mut parser| {
            let _ = parser.string("argument 1");
            let _ = parser.string("argument 2");
            let _ = parser.optional_string("argument 3");
            parser.parse()
        }));
        parser.command(Command::new("command2", |mut parser| {
            let _ = parser.string("argument 3");
            let _ = parser.string("argument 4");
            let _ = parser.optional_string("argument 5");
            parser.parse()
        }));

        let error = parser.parse().unwrap_err();

        assert_eq!(
            error.to_string(),
            "Usage: command command1 <argument 1> <argument 2> [argument 3]\n"
        );
    }

    #[test]
    fn dispatch_help_child() {
        let mut parser = Parser::new(&["command", "-h", "command1", "a"]);
        parser.command(
            Command::new("command1", |mut parser| {
                let _ = parser.string("argument");
                parser.parse()
            })
            .long_description("The first command."),
        );

        let error = parser.parse().unwrap_err();

        assert_eq!(
            error.to_string(),
            "Usage: command command1 <argument>\n\nThe first command.\n"
        );
    }

    #[test]
    fn dispatch_handler_error() {
        let mut parser = Parser::new(&["command", "command1"]);
        parser.command(Command::new("command1", |_| {
            Err(ParseError::handler("broken"))
        }));

        let error = parser.parse().unwrap_err();

        assert_matches!(&error, ParseError::Handler(_));
        assert_eq!(error.to_string(), "broken");
        assert_eq!(error.usage(), None);
    }

    #[test]
    fn dispatch_nested() {
        let leaf = RefCell::new(None);
        let leaf = &leaf;
        let mut parser = Parser::new(&["git", "-v", "remote", "add", "origin", "https://example.com"]);
        let verbose = parser.option("verbose", Some('v'));
        parser.command(Command::new("remote", move |mut parser| {
            parser.command(Command::new("add", move |mut parser| {
                let name = parser.string("name");
                let location = parser.url("location");
                let label = parser.usage();
                parser.parse()?;
                leaf.borrow_mut().replace((
                    label,
                    name.value().unwrap(),
                    location.value().unwrap(),
                ));
                Ok(())
            }));
            parser.parse()
        }));

        parser.parse().unwrap();

        let (label, name, location) = leaf.borrow_mut().take().unwrap();
        assert!(verbose.was_present());
        assert_eq!(label, "Usage: git remote add [--verbose] <name> <location>\n");
        assert_eq!(name, "origin");
        assert_eq!(location.as_str(), "https://example.com/");
    }

    #[test]
    fn before_dispatch() {
        let calls = RefCell::new(Vec::default());
        let mut parser = Parser::new(&["command", "command1"]);
        parser.command(Command::new("command1", |_| {
            calls.borrow_mut().push("handler");
            Ok(())
        }));

        parser
            .parse_with(|| calls.borrow_mut().push("before"))
            .unwrap();

        assert_eq!(calls.into_inner(), vec!["before", "handler"]);
    }

    #[rstest]
    #[case(vec!["command", "a"], true)]
    #[case(vec!["command"], false)]
    #[case(vec!["command", "a", "unknown"], false)]
    fn before_dispatch_skipped(#[case] tokens: Vec<&str>, #[case] positional_only: bool) {
        let mut called = false;
        let mut parser = Parser::new(tokens.as_slice());
        let _ = parser.string("argument");
        if !positional_only {
            parser.command(Command::new("command1", |_| Ok(())));
        }

        let _ = parser.parse_with(|| called = true);

        assert!(!called);
    }

    #[test]
    fn dispatch_usage_error_is_usage() {
        let mut parser = Parser::new(&["command", "nope"]);
        parser.command(Command::new("command1", |_| Ok(())));

        let error = parser.parse().unwrap_err();

        assert_matches!(&error, ParseError::Usage(_));
        assert_contains!(error.usage().unwrap(), "The following commands are available:");
    }
}
