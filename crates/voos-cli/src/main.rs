//! Official-flight log CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;
use voos_cli::logging::{LogConfig, LogFormat, init_logging};
use voos_cli::summary::{
    normalize_table, options_table, print_report, rows_table, sniff_table,
};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_export, run_flights, run_normalize, run_options, run_report, run_sniff,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Normalize(args) => run_normalize(args).map(|report| {
            println!("{}", normalize_table(&report));
            println!(
                "{} file(s) written, {} skipped",
                report.written.len(),
                report.failed.len()
            );
        }),
        Command::Sniff(args) => run_sniff(args).map(|reports| {
            println!("{}", sniff_table(&reports));
        }),
        Command::Report(args) => run_report(args).map(|report| {
            print_report(&report, args.limit);
        }),
        Command::Flights(args) => run_flights(args).map(|report| {
            println!("{}", report.status);
            println!("{}", rows_table(&report.columns, &report.rows, args.limit));
        }),
        Command::Options(args) => run_options(args).map(|options| {
            println!("{}", options_table(&options));
        }),
        Command::Export(args) => run_export(args).map(|rows| {
            println!("{rows} row(s) written to {}", args.output.display());
        }),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
