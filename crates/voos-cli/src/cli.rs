//! CLI argument definitions for the flight-log tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use voos_ingest::{DEFAULT_NORMALIZED_PATTERN, DEFAULT_OUTPUT_DIR, DEFAULT_RAW_PATTERN, TextEncoding};
use voos_model::{ALL_VALUE, FilterKey, FilterSpec};
use voos_transform::DEFAULT_TOP_DESTINATIONS;

use voos_cli::report::Grain;

#[derive(Parser)]
#[command(
    name = "voos",
    version,
    about = "Normalize and report official-flight logs",
    long_about = "Normalize yearly official-flight log exports and report on them.\n\n\
                  Raw exports are semicolon-separated Latin-1 files with varying headers;\n\
                  `normalize` rewrites them as comma-separated UTF-8 with canonical columns,\n\
                  and the report commands read the normalized files."
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

    /// Allow row-level values such as passenger names in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite raw exports as normalized UTF-8 CSV files.
    Normalize(NormalizeArgs),

    /// Detect the delimiter and encoding of a file or of every CSV in a folder.
    Sniff(SniffArgs),

    /// Print summary cards, destination ranking, hours per year and rows.
    Report(ReportArgs),

    /// Print one row per flight with its passenger total.
    Flights(FlightsArgs),

    /// List the values each filter accepts.
    Options(DataArgs),

    /// Write the filtered view as CSV.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Glob matching the raw exports.
    #[arg(long = "input", value_name = "GLOB", default_value = DEFAULT_RAW_PATTERN)]
    pub input: String,

    /// Directory the normalized files are written into.
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Field delimiter of the raw exports (`tab` for tab-separated).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ";", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Text encoding of the raw exports.
    #[arg(long = "encoding", value_enum, default_value = "latin1")]
    pub encoding: EncodingArg,
}

#[derive(Args)]
pub struct SniffArgs {
    /// A CSV file, or a folder whose CSV files are all inspected.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Args)]
pub struct DataArgs {
    /// Glob matching the normalized files.
    #[arg(long = "data", value_name = "GLOB", default_value = DEFAULT_NORMALIZED_PATTERN)]
    pub data: String,

    /// Field delimiter of the data files.
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Text encoding of the data files.
    #[arg(long = "encoding", value_enum, default_value = "utf8")]
    pub encoding: EncodingArg,
}

/// The seven filter controls. Each defaults to `all`.
#[derive(Args)]
pub struct FilterArgs {
    /// Year, e.g. 2022.
    #[arg(long = "ano", value_name = "ANO", default_value = ALL_VALUE)]
    pub ano: String,

    /// Month number, 1 to 12.
    #[arg(long = "mes", value_name = "MES", default_value = ALL_VALUE)]
    pub mes: String,

    /// Relative window: 7d, 30d, this_year or last_year.
    #[arg(long = "periodo", value_name = "PERIODO", default_value = ALL_VALUE)]
    pub periodo: String,

    /// Exact origin, e.g. "Pampulha (PLU)".
    #[arg(long = "origem", value_name = "ORIGEM", default_value = ALL_VALUE)]
    pub origem: String,

    /// Exact destination, e.g. "Confins (CNF)".
    #[arg(long = "destino", value_name = "DESTINO", default_value = ALL_VALUE)]
    pub destino: String,

    /// Exact requesting body.
    #[arg(long = "orgao", value_name = "ORGAO", default_value = ALL_VALUE)]
    pub orgao: String,

    /// Flight status, compared case-insensitively.
    #[arg(long = "situacao", value_name = "SITUACAO", default_value = ALL_VALUE)]
    pub situacao: String,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::all();
        for (key, value) in [
            (FilterKey::Ano, &self.ano),
            (FilterKey::Mes, &self.mes),
            (FilterKey::Periodo, &self.periodo),
            (FilterKey::Origem, &self.origem),
            (FilterKey::Destino, &self.destino),
            (FilterKey::Orgao, &self.orgao),
            (FilterKey::Situacao, &self.situacao),
        ] {
            spec.set(key, value);
        }
        spec
    }
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Ignore the filters and show every row.
    #[arg(long = "clear")]
    pub clear: bool,

    /// Row granularity.
    #[arg(long = "grain", value_enum, default_value = "passenger")]
    pub grain: GrainArg,

    /// Number of rows to print (0 for none).
    #[arg(long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,

    /// Number of destinations in the ranking.
    #[arg(long = "top", value_name = "N", default_value_t = DEFAULT_TOP_DESTINATIONS)]
    pub top: usize,
}

#[derive(Args)]
pub struct FlightsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Number of flights to print.
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Ignore the filters and export every row.
    #[arg(long = "clear")]
    pub clear: bool,

    /// Row granularity.
    #[arg(long = "grain", value_enum, default_value = "passenger")]
    pub grain: GrainArg,

    /// Destination CSV file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EncodingArg {
    Utf8,
    Latin1,
}

impl From<EncodingArg> for TextEncoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Utf8 => TextEncoding::Utf8,
            EncodingArg::Latin1 => TextEncoding::Latin1,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GrainArg {
    Passenger,
    Flight,
}

impl From<GrainArg> for Grain {
    fn from(value: GrainArg) -> Self {
        match value {
            GrainArg::Passenger => Grain::Passenger,
            GrainArg::Flight => Grain::Flight,
        }
    }
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

/// Accepts a single ASCII character, or `tab`.
fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() && c != '"' => Ok(c as u8),
                _ => Err(format!("delimiter must be one ASCII character, got {raw:?}")),
            }
        }
    }
}
