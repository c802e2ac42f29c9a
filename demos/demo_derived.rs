use argpromise::derive::*;
use argpromise::prelude::*;
use argpromise::{ParseError, Parser};

/// Print the greeting for someone.
///
/// The name is taken as is.
#[derive(CommandDescription)]
#[command(short = "Greet someone.")]
struct Greet;

impl CommandHandler for Greet {
    fn handle(mut parser: Parser<'_>) -> Result<(), ParseError> {
        let name = parser.string("name");
        let greeting = parser.optional_string("greeting");
        parser.parse()?;

        let name = name.take().map_err(ParseError::handler)?;
        let greeting = greeting.take().unwrap_or_else(|| "Hello".to_string());
        println!("{greeting}, {name}!");
        Ok(())
    }
}

#[derive(CommandDescription)]
#[command(name = "count", short = "Count up to a number.")]
struct CountUp;

impl CommandHandler for CountUp {
    fn handle(mut parser: Parser<'_>) -> Result<(), ParseError> {
        let limit = parser.int("limit").validate(|limit| {
            if *limit > 0 {
                Ok(())
            } else {
                Err("it must be positive".to_string())
            }
        });
        parser.parse()?;

        for i in 1..=limit.take().map_err(ParseError::handler)? {
            println!("{i}");
        }

        Ok(())
    }
}

fn main() {
    let mut parser = Parser::from_env();
    parser.command_handler::<Greet>();
    parser.command_handler::<CountUp>();

    if let Err(error) = parser.parse() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
