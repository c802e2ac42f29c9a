use argpromise::{Command, ParseError, Parser};
use std::cell::RefCell;

#[derive(Debug)]
enum Action {
    Status,
    RemoteAdd { name: String, location: String },
    RemoteRemove { name: String },
}

fn main() {
    let action = RefCell::new(None);
    let action = &action;

    let mut parser = Parser::from_env();
    let verbose = parser.option("verbose", Some('v'));
    parser.command(
        Command::new("status", move |parser| {
            parser.parse()?;
            action.borrow_mut().replace(Action::Status);
            Ok(())
        })
        .short_description("Show the working tree status."),
    );
    parser.command(
        Command::new("remote", move |mut parser| {
            parser.command(
                Command::new("add", move |mut parser| {
                    let name = parser.string("name");
                    let location = parser.url("location");
                    parser.parse()?;
                    action.borrow_mut().replace(Action::RemoteAdd {
                        name: name.take().map_err(ParseError::handler)?,
                        location: location.take().map_err(ParseError::handler)?.to_string(),
                    });
                    Ok(())
                })
                .short_description("Add a remote."),
            );
            parser.command(
                Command::new("remove", move |mut parser| {
                    let name = parser.string("name");
                    parser.parse()?;
                    action.borrow_mut().replace(Action::RemoteRemove {
                        name: name.take().map_err(ParseError::handler)?,
                    });
                    Ok(())
                })
                .short_description("Remove a remote."),
            );
            parser.parse()
        })
        .short_description("Manage the set of tracked repositories.")
        .long_description("Manage the set of repositories (\"remotes\") whose branches you track."),
    );

    let result = parser.parse_with(|| {
        if verbose.was_present() {
            println!("Dispatching..");
        }
    });

    if let Err(error) = result {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let action = action.borrow_mut().take();

    match action {
        Some(action) => println!("{action:?}"),
        None => println!("Nothing to do."),
    }
}
