//! Command-line arguments for `csv2fhir`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fhir_output::DEFAULT_MAX_RESOURCES;

#[derive(Parser)]
#[command(
    name = "csv2fhir",
    version,
    about = "Convert CSV rows into FHIR R4 resources",
    long_about = "Convert CSV rows into FHIR R4 resources.\n\n\
                  Each row becomes one resource, shaped by a YAML mapping of\n\
                  field paths to ${column} templates. Output is a collection\n\
                  Bundle or NDJSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow CSV cell values in log output.
    ///
    /// Off by default because source rows usually hold patient data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a CSV file using a mapping file.
    Convert(ConvertArgs),

    /// List supported resource types, or the fields of one type.
    Types(TypesArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Source CSV file.
    #[arg(short = 'i', long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// YAML mapping file.
    #[arg(short = 'm', long = "mapping", value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// Output file; stdout when omitted or `-`.
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value = "bundle")]
    pub format: OutputFormatArg,

    /// Field delimiter: a single ASCII character, or `tab`.
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIM",
        default_value = ",",
        value_parser = parse_delimiter
    )]
    pub delimiter: u8,

    /// Most resources a Bundle may hold (0 uses the default).
    #[arg(long = "max-resources", value_name = "N", default_value_t = DEFAULT_MAX_RESOURCES)]
    pub max_resources: usize,

    /// Worker threads building records.
    #[arg(long = "workers", value_name = "N", default_value_t = 4)]
    pub workers: usize,

    /// Validate each built resource.
    #[arg(long = "validate")]
    pub validate: bool,

    /// With `error`, resources failing validation are not written.
    #[arg(long = "validation-level", value_enum, default_value = "error")]
    pub validation_level: ValidationLevelArg,
}

#[derive(Parser)]
pub struct TypesArgs {
    /// Show the fields of this resource type.
    #[arg(value_name = "RESOURCE")]
    pub resource: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Bundle,
    Ndjson,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValidationLevelArg {
    Error,
    Warn,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!(
                "delimiter must be a single ASCII character or 'tab', got '{value}'"
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_defaults() {
        let cli = Cli::parse_from(["csv2fhir", "convert", "-i", "in.csv", "-m", "map.yaml"]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.delimiter, b',');
        assert_eq!(args.workers, 4);
        assert_eq!(args.max_resources, DEFAULT_MAX_RESOURCES);
        assert!(matches!(args.format, OutputFormatArg::Bundle));
        assert!(matches!(args.validation_level, ValidationLevelArg::Error));
        assert!(!args.validate);
    }

    #[test]
    fn delimiter_forms() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
