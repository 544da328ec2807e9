use embed_blots::{parse_script, render_script, EmbedError, PlainTypesetter};
use std::env;
use std::fs;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: embed-html <script.yaml>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  embed-html document.yaml");
        eprintln!("  RUST_LOG=debug embed-html *.yaml");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        match render_file(file_path) {
            Ok(html) => {
                println!("{}", html);
            }
            Err(e) => {
                eprintln!("✗ {} failed:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn render_file(path: &str) -> Result<String, EmbedError> {
    let content = fs::read_to_string(path)?;
    let script = parse_script(&content)?;
    render_script(&script, Some(Arc::new(PlainTypesetter)))
}

fn print_error(error: &EmbedError) {
    match error {
        EmbedError::YamlError(msg) => {
            eprintln!("  YAML error:");
            eprintln!("    {}", msg);
        }
        EmbedError::InvalidConfig(msg) => {
            eprintln!("  Invalid configuration:");
            eprintln!("    {}", msg);
        }
        EmbedError::UnknownFormat { name } => {
            eprintln!("  Unknown embed format '{}'", name);
            eprintln!("    Check that the format is enabled in the script config");
        }
        EmbedError::IndexOutOfBounds { index, length } => {
            eprintln!("  Index {} is past the end of the document", index);
            eprintln!("    Document length: {}", length);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
