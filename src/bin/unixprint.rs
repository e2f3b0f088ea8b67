use std::error::Error;
use std::io::BufReader;

use sarge::prelude::*;
use unixprint::cli::{InputArgs, OutputArgs};
use unixprint::{FileExistsPolicy, TextEncoding, UnixPrintBuilder};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  unixprint [--input <token> ...] [--output <token>] [--encoding <name>] [--input-encoding <name>] [--no-flush] [--append]"
    );
    eprintln!();
    eprintln!("Copies every input line to the output, ending each line with LF.");
    eprintln!("Line bytes are copied unchanged unless --input-encoding is given, in");
    eprintln!("which case lines are decoded from it and written in --encoding.");
    eprintln!();
    eprintln!("Input tokens:");
    eprintln!("  - | stdin          Read from stdin (default)");
    eprintln!("  <path>             Read from a file");
    eprintln!();
    eprintln!("Output tokens:");
    eprintln!("  - | stdout         Write to stdout (default)");
    eprintln!("  stderr             Write to stderr");
    eprintln!("  @<path>            Force treating value as a file path");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<InputArgs>(tag::both('i', "input"));
    let output_ref = reader.add::<OutputArgs>(tag::both('o', "output"));
    let encoding_ref = reader.add::<String>(tag::both('e', "encoding"));
    let input_encoding_ref = reader.add::<String>(tag::long("input-encoding"));
    let no_flush_ref = reader.add::<bool>(tag::long("no-flush"));
    let append_ref = reader.add::<bool>(tag::long("append"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => unreachable!("InputArgs parsing is infallible"),
        None => InputArgs::default(),
    };

    let output = match output_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => unreachable!("OutputArgs parsing is infallible"),
        None => OutputArgs::default(),
    };

    let no_flush = matches!(no_flush_ref.get(&args), Some(Ok(true)));
    let append = matches!(append_ref.get(&args), Some(Ok(true)));

    let mut builder = UnixPrintBuilder::new().auto_flush(!no_flush);
    if append {
        builder = builder.file_exists_policy(FileExistsPolicy::Append);
    }
    if let Some(Ok(name)) = encoding_ref.get(&args) {
        builder = builder.encoding(name);
    }

    let input_encoding = match input_encoding_ref.get(&args) {
        Some(Ok(name)) => Some(TextEncoding::for_label(&name)?),
        _ => None,
    };

    let target = output.target();
    let mut stream = builder.open_target(target.as_ref())?;

    for provider in input.providers() {
        let source = provider
            .open()
            .map_err(|e| format!("cannot read '{}': {e}", provider.id()))?;
        let reader = BufReader::new(source);
        match input_encoding {
            Some(encoding) => stream.relay_lines_from(reader, encoding)?,
            None => stream.relay_lines(reader)?,
        };
        if stream.check_error() {
            break;
        }
    }

    stream.close()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("unixprint error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
