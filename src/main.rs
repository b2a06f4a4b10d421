use clap::Parser;

use simstubgen::cli::Cli;

fn main() {
    // clap reports its own usage errors (bad flags, missing or extra
    // path) with exit status 2; the flag-combination check below keeps
    // the same status and never touches the schema file.
    let args = Cli::parse();
    if !args.header && !args.source {
        eprintln!("usage: simstubgen [-H|--header] [-c|--source] <xml-file>");
        std::process::exit(2);
    }

    if let Err(e) = simstubgen::run(&args) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
