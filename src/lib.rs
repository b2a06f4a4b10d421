pub mod cli;
pub mod generator;
pub mod model;
pub mod parser;

use anyhow::Context;

/// Load the schema, run the generator, print the requested artifacts
/// to stdout. The caller has already validated the flag combination.
pub fn run(args: &cli::Cli) -> anyhow::Result<()> {
    // 1. ── Load ───────────────────────────────────────────────────────
    let xml = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let spec = parser::load(&xml).with_context(|| "Parsing plugin description")?;

    // 2. ── Generate ───────────────────────────────────────────────────
    let artifacts = generator::generate(&spec);

    // 3. ── Write outputs ──────────────────────────────────────────────
    if args.header {
        print!("{}", artifacts.header);
    }
    if args.source {
        print!("{}", artifacts.source);
    }

    Ok(())
}
