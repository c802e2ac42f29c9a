use argpromise::Parser;

fn main() {
    let mut parser = Parser::from_env();
    let verbose = parser.option("verbose", Some('v'));
    let source = parser.existing_file("source");
    let destination = parser.string("destination");
    let copies = parser
        .optional_int("copies")
        .validate(|copies| match copies {
            1..=10 => Ok(()),
            _ => Err("it must be between 1 and 10".to_string()),
        });

    if let Err(error) = parser.parse() {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let source = source.take().expect("source is required");
    let destination = destination.take().expect("destination is required");
    let copies = copies.take().unwrap_or(1);

    if verbose.was_present() {
        println!("Copying '{source}' to '{destination}', {copies} time(s).");
    }

    for i in 0..copies {
        println!("{source} -> {destination}.{i}");
    }
}
