//! Command line configuration for the `georeport-xml` tool.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GEOREPORT_XML_LOG_LEVEL` | warn | Log level |
//! | `GEOREPORT_XML_PRETTY` | false | Indent XML output |
//!
//! `RUST_LOG` takes precedence over the log level flag when set.

use crate::xml::{DecodeOptions, EncodeOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Transcodes GeoReport payloads between JSON and XML.
#[derive(Debug, Clone, Parser)]
#[command(name = "georeport-xml")]
#[command(about = "Encode JSON GeoReport payloads as XML, or decode XML back to JSON")]
pub struct CliConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "GEOREPORT_XML_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Transcoding direction.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Read JSON and write the XML encoding.
    Encode(EncodeArgs),
    /// Read XML and write the decoded value as JSON.
    Decode(DecodeArgs),
}

/// Arguments for `encode`.
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Input file; stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Indent the XML output.
    #[arg(long, env = "GEOREPORT_XML_PRETTY", default_value = "false")]
    pub pretty: bool,

    /// XML declaration version.
    #[arg(long, default_value = "1.0")]
    pub xml_version: String,

    /// XML declaration encoding.
    #[arg(long, default_value = "UTF-8")]
    pub xml_encoding: String,

    /// XML declaration standalone flag.
    #[arg(long)]
    pub standalone: Option<bool>,
}

/// Arguments for `decode`.
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Input file; stdin when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Keep single repeated children as one-item lists.
    #[arg(long, default_value = "false")]
    pub as_collection: bool,

    /// Leave digit-only attribute values as strings.
    #[arg(long, default_value = "false")]
    pub no_type_cast: bool,
}

impl EncodeArgs {
    /// Builds encoder options from the command line.
    pub fn options(&self) -> EncodeOptions {
        EncodeOptions {
            format_output: self.pretty,
            version: self.xml_version.clone(),
            encoding: self.xml_encoding.clone(),
            standalone: self.standalone,
            ..Default::default()
        }
    }
}

impl DecodeArgs {
    /// Builds decoder options from the command line.
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions {
            as_collection: self.as_collection,
            type_cast_attributes: !self.no_type_cast,
        }
    }
}

impl CliConfig {
    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Command::Encode(args) = &self.command {
            if args.xml_version.trim().is_empty() {
                errors.push("XML version cannot be empty".to_string());
            }
            if args.xml_encoding.trim().is_empty() {
                errors.push("XML encoding cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Initializes the tracing subscriber.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("georeport_xml={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_encode() {
        let config =
            CliConfig::try_parse_from(["georeport-xml", "encode", "--pretty", "in.json"]).unwrap();
        let Command::Encode(args) = &config.command else {
            panic!("expected encode");
        };
        assert_eq!(args.input, Some(PathBuf::from("in.json")));
        let options = args.options();
        assert!(options.format_output);
        assert_eq!(options.version, "1.0");
        assert_eq!(options.standalone, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_decode() {
        let config = CliConfig::try_parse_from([
            "georeport-xml",
            "--log-level",
            "debug",
            "decode",
            "--no-type-cast",
        ])
        .unwrap();
        assert_eq!(config.log_level, "debug");
        let Command::Decode(args) = &config.command else {
            panic!("expected decode");
        };
        assert_eq!(args.input, None);
        let options = args.options();
        assert!(!options.type_cast_attributes);
        assert!(!options.as_collection);
    }

    #[test]
    fn test_validate_empty_version() {
        let config =
            CliConfig::try_parse_from(["georeport-xml", "encode", "--xml-version", " "]).unwrap();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("version")));
    }
}
