use crate::api::CommandSummary;
use crate::parser::base::*;

const COMMAND_INDENT: usize = 4;
const COMMAND_PADDING: usize = 4;

impl<'a> Parser<'a> {
    /// The usage text of this parser, as shown on any parse failure.
    ///
    /// Mirrors the specification: the invocation label, every option, every positional (`<required>` or `[optional]`).
    /// A trailing group of commands is listed by name, beside each short description.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::{Command, Parser};
    ///
    /// let mut parser = Parser::new(&["program"]);
    /// let _ = parser.option("verbose", Some('v'));
    /// let _ = parser.string("name");
    /// parser.command(Command::new("run", |_| Ok(())).short_description("Run it."));
    ///
    /// assert_eq!(
    ///     parser.usage(),
    ///     "Usage: program [--verbose] <name> <command>\n\nThe following commands are available:\n\n    run    Run it.\n"
    /// );
    /// ```
    pub fn usage(&self) -> String {
        let mut usage = format!("Usage: {}", self.tokens.label());

        for option in &self.options {
            usage += &format!(" [--{}]", option.name());
        }

        for specification in &self.specification {
            match specification {
                Specification::Positional(promise) if promise.is_optional() => {
                    usage += &format!(" [{}]", promise.name());
                }
                Specification::Positional(promise) => {
                    usage += &format!(" <{}>", promise.name());
                }
                Specification::Commands(commands) => {
                    usage += " <command>\n";
                    self.describe(&mut usage);
                    usage += "\nThe following commands are available:\n";
                    let width = commands
                        .iter()
                        .map(|command| command.name().chars().count())
                        .max()
                        .unwrap_or(0)
                        + COMMAND_PADDING;

                    for command in commands {
                        usage += &format!(
                            "\n{:indent$}{}",
                            "",
                            pad(command.name(), width),
                            indent = COMMAND_INDENT
                        );

                        if let Some(description) = &command.summary().short_description {
                            usage += description;
                        }
                    }

                    usage += "\n";
                    return usage;
                }
            }
        }

        usage += "\n";
        self.describe(&mut usage);
        usage
    }

    fn describe(&self, usage: &mut String) {
        if let Some(description) = self
            .command
            .as_ref()
            .and_then(CommandSummary::description)
        {
            *usage += &format!("\n{description}\n");
        }
    }
}

// Pads by characters, not bytes.
fn pad(value: &str, width: usize) -> String {
    let length = value.chars().count();
    format!("{value}{}", " ".repeat(width.saturating_sub(length)))
}
