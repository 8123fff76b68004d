//! GeoReport XML command line tool.
//!
//! Encodes JSON payloads as GeoReport XML, or decodes XML back to JSON.

use anyhow::Context;
use clap::Parser;
use georeport_xml::config::{CliConfig, Command, init_logging};
use georeport_xml::{json, xml};
use std::io::Read;
use std::path::Path;
use tracing::debug;

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    match &config.command {
        Command::Encode(args) => {
            let input = read_input(args.input.as_deref())?;
            debug!(bytes = input.len(), "Encoding JSON input");
            let value = json::from_json_str(&input).context("Input is not valid JSON")?;
            let output = xml::encode(&value, &args.options()).context("Failed to encode XML")?;
            print!("{}", output);
        }
        Command::Decode(args) => {
            let input = read_input(args.input.as_deref())?;
            debug!(bytes = input.len(), "Decoding XML input");
            let value = xml::decode(&input, &args.options()).context("Failed to decode XML")?;
            println!("{}", json::to_json_string_pretty(&value)?);
        }
    }

    Ok(())
}
