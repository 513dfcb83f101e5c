use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span, warn};

use voos_ingest::{
    NormalizeReport, SniffReport, SourceFormat, list_csv_files, load_merged, normalize_sources,
    sniff_file,
};
use voos_transform::{
    DEFAULT_TOP_DESTINATIONS, Dataset, DatasetMeta, FilterOptions, FilterRequest,
};

use voos_cli::report::{Grain, ReportView, build_report, export_view};

use crate::cli::{
    DataArgs, ExportArgs, FilterArgs, FlightsArgs, NormalizeArgs, ReportArgs, SniffArgs,
};

pub fn run_normalize(args: &NormalizeArgs) -> Result<NormalizeReport> {
    let format = SourceFormat::new(args.delimiter, args.encoding.into());
    info!(format = %format, "normalizing raw exports");
    normalize_sources(&args.input, &args.output_dir, &format)
        .with_context(|| format!("normalize {}", args.input))
}

pub fn run_sniff(args: &SniffArgs) -> Result<Vec<SniffReport>> {
    let files = if args.path.is_dir() {
        list_csv_files(&args.path).context("list CSV files")?
    } else {
        vec![args.path.clone()]
    };
    files
        .iter()
        .map(|path| sniff_file(path).with_context(|| format!("sniff {}", path.display())))
        .collect()
}

pub fn run_report(args: &ReportArgs) -> Result<ReportView> {
    let dataset = load_dataset(&args.data)?;
    let request = filter_request(&args.filters, args.clear);
    let span = info_span!("report", rows = dataset.record_count());
    let _guard = span.enter();
    Ok(build_report(
        dataset.records(),
        &request,
        args.grain.into(),
        args.top,
        now(),
    ))
}

pub fn run_flights(args: &FlightsArgs) -> Result<ReportView> {
    let dataset = load_dataset(&args.data)?;
    let request = filter_request(&args.filters, false);
    Ok(build_report(
        dataset.records(),
        &request,
        Grain::Flight,
        DEFAULT_TOP_DESTINATIONS,
        now(),
    ))
}

pub fn run_options(args: &DataArgs) -> Result<FilterOptions> {
    let dataset = load_dataset(args)?;
    Ok(FilterOptions::from_records(dataset.records()))
}

pub fn run_export(args: &ExportArgs) -> Result<usize> {
    let dataset = load_dataset(&args.data)?;
    let request = filter_request(&args.filters, args.clear);
    let span = info_span!("export", output = %args.output.display());
    let _guard = span.enter();
    export_view(
        dataset.records(),
        &request,
        args.grain.into(),
        now(),
        &args.output,
    )
    .with_context(|| format!("export {}", args.output.display()))
}

/// Loads the normalized files into a dataset.
fn load_dataset(args: &DataArgs) -> Result<Dataset> {
    let format = SourceFormat::new(args.delimiter, args.encoding.into());
    let merged = load_merged(&args.data, &format)
        .with_context(|| format!("load flight logs from {}", args.data))?;
    if merged.report.has_failures() {
        warn!(
            failed = merged.report.failed.len(),
            loaded = merged.report.loaded.len(),
            "some source files were skipped"
        );
    }
    let meta = DatasetMeta {
        source_files: merged
            .report
            .loaded
            .iter()
            .map(|file| file.path.clone())
            .collect(),
        failed_files: merged
            .report
            .failed
            .iter()
            .map(|file| file.path.clone())
            .collect(),
    };
    Ok(Dataset::with_meta(merged.records, meta))
}

fn filter_request(filters: &FilterArgs, clear: bool) -> FilterRequest {
    let spec = filters.to_spec();
    if clear {
        if !spec.is_unconstrained() {
            warn!("--clear given; filter flags are ignored");
        }
        FilterRequest::Clear
    } else {
        FilterRequest::Apply(spec)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
