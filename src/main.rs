use folio::{Compiler, FolioError};
use std::env;
use std::fs;
use std::io;

/// Compiles an FO file and prints the document definition as JSON.
fn main() -> Result<(), FolioError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Compiles formatting-objects XML into a JSON document definition.");
        eprintln!();
        eprintln!("Usage: {} <path/to/input.fo> [path/to/rules.json]", args[0]);
        eprintln!();
        eprintln!("Set RUST_LOG=debug to see skipped elements and ignored attributes.");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let markup = fs::read_to_string(input_path).map_err(|e| {
        FolioError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read '{}': {}", input_path, e),
        ))
    })?;

    let mut builder = Compiler::builder();
    if let Some(rules_path) = args.get(2) {
        log::info!("Loading cascade rules from {}", rules_path);
        builder = builder.add_rules_file(rules_path)?;
    }
    let compiler = builder.build()?;

    let document = compiler.compile_str(&markup)?;
    println!("{}", document.to_json()?);
    Ok(())
}
