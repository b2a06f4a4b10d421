use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Print the generated declarations module (stubs.h)
    #[arg(short = 'H', long = "header")]
    pub header: bool,

    /// Print the generated definitions module (stubs.cpp)
    #[arg(short = 'c', long = "source")]
    pub source: bool,

    /// Plugin description XML
    pub input: PathBuf,
}
