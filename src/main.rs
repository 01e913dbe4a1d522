//! loomview CLI
//!
//! Usage:
//!   loomview [OPTIONS] [TEMPLATE_FILE]
//!
//! Options:
//!   -c, --content <KEY=VALUE>  Content assignment (repeatable)
//!       --content-file <FILE>  TOML file with a [content] table
//!       --config <FILE>        Interface config file (TOML)
//!   -s, --strict               Fail on placeholders with no content
//!       --show-regions         Print a region table to stderr
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use loomview::{InterfaceBuilder, InterfaceConfig, Partial, ScratchBuffer};

#[derive(Parser)]
#[command(name = "loomview")]
#[command(about = "Render templates with tracked, addressable regions")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Content assignment, KEY=VALUE (repeatable)
    #[arg(short = 'c', long = "content", value_name = "KEY=VALUE")]
    content: Vec<String>,

    /// TOML file with a [content] table of KEY = "VALUE" entries
    #[arg(long, value_name = "FILE")]
    content_file: Option<PathBuf>,

    /// Interface config file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fail on placeholders with no content instead of passing them through
    #[arg(short, long)]
    strict: bool,

    /// Print a region table to stderr after rendering
    #[arg(long)]
    show_regions: bool,
}

#[derive(Deserialize)]
struct ContentFile {
    #[serde(default)]
    content: toml::Table,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match InterfaceConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => InterfaceConfig::default(),
    };
    if cli.strict {
        config.strict = true;
    }

    // Read the template
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            if io::stdin().is_terminal() {
                eprintln!("No template given. Pass a file or pipe a template on stdin.");
                eprintln!("Try: echo 'hello {{name}}' | loomview -c name=world");
                std::process::exit(1);
            }
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    // Collect content: file entries first, then -c assignments override
    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(path) = &cli.content_file {
        let parsed: ContentFile = match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| toml::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("Error loading content file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
        for (key, value) in parsed.content {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            upsert(&mut pairs, key, value);
        }
    }
    for assignment in &cli.content {
        match assignment.split_once('=') {
            Some((key, value)) => upsert(&mut pairs, key.to_string(), value.to_string()),
            None => {
                eprintln!("Invalid content assignment '{}': expected KEY=VALUE", assignment);
                std::process::exit(1);
            }
        }
    }

    // Build an interface over an in-memory buffer so config preprocessing
    // (dedent, skip_first_line) and strict mode apply uniformly.
    let mut builder = InterfaceBuilder::new("cli", source).config(config);
    for (key, value) in pairs {
        builder = builder.partial(Partial::text(key, move || value.clone()));
    }
    let mut interface = builder.build(ScratchBuffer::new());

    if let Err(e) = interface.render(true) {
        eprintln!("{}", e.format(interface.template(), &filename));
        std::process::exit(1);
    }

    print!("{}", interface.binder().text());

    if cli.show_regions {
        for region in interface.regions() {
            eprintln!("{}\t[{}, {})", region.key, region.start, region.end);
        }
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some((_, existing)) => *existing = value,
        None => pairs.push((key, value)),
    }
}
