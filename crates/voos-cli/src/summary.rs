//! Terminal tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use voos_ingest::{NormalizeReport, SniffReport};
use voos_model::{ALL_VALUE, FilterKey, Month, Periodo, Situacao};
use voos_transform::{DestinationCount, FilterOptions, SummaryCards, YearHours};

use crate::report::ReportView;

pub fn print_report(report: &ReportView, limit: usize) {
    println!("{}", report.status);
    println!("{}", cards_table(&report.cards));
    if !report.ranking.is_empty() {
        println!();
        println!("Destinos mais frequentes:");
        println!("{}", ranking_table(&report.ranking));
    }
    if !report.hours.is_empty() {
        println!();
        println!("Horas voadas por ano:");
        println!("{}", hours_table(&report.hours));
    }
    if limit > 0 && !report.rows.is_empty() {
        println!();
        println!("{}", rows_table(&report.columns, &report.rows, limit));
        if report.rows.len() > limit {
            println!("... {} more rows", report.rows.len() - limit);
        }
    }
}

pub fn cards_table(cards: &SummaryCards) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Indicador"), header_cell("Valor")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Voos", cards.flights.to_string()),
        ("Horas voadas", format_hours(cards.total_hours)),
        ("Média de horas", format_hours(cards.mean_hours)),
        ("Passageiros", cards.passengers.to_string()),
        ("Anos", cards.distinct_years.to_string()),
        ("Destinos", cards.distinct_destinations.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

pub fn ranking_table(ranking: &[DestinationCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Destino"), header_cell("Registros")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in ranking {
        table.add_row(vec![text_cell(&entry.destino), Cell::new(entry.count)]);
    }
    table
}

pub fn hours_table(hours: &[YearHours]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Ano"), header_cell("Horas")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in hours {
        table.add_row(vec![text_cell(&entry.ano), Cell::new(format_hours(entry.hours))]);
    }
    table
}

/// The first `limit` rows of a view.
pub fn rows_table(columns: &[String], rows: &[Vec<String>], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(columns.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in rows.iter().take(limit) {
        table.add_row(row.iter().map(|value| text_cell(value)).collect::<Vec<_>>());
    }
    table
}

pub fn options_table(options: &FilterOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Filtro"), header_cell("Opções")]);
    apply_table_style(&mut table);
    for key in FilterKey::ALL {
        let choices = match options.choices(key) {
            Some(choices) => choices.join(", "),
            None => static_choices(key).join(", "),
        };
        table.add_row(vec![
            Cell::new(key.as_str()).add_attribute(Attribute::Bold),
            Cell::new(choices),
        ]);
    }
    table
}

/// Choices that do not depend on the data.
fn static_choices(key: FilterKey) -> Vec<String> {
    let values: Vec<String> = match key {
        FilterKey::Mes => (1..=12)
            .filter_map(Month::new)
            .map(|month| format!("{} ({})", month.number(), month.name()))
            .collect(),
        FilterKey::Periodo => Periodo::ALL
            .into_iter()
            .map(|periodo| format!("{} ({})", periodo.as_str(), periodo.label()))
            .collect(),
        FilterKey::Situacao => Situacao::ALL
            .into_iter()
            .map(|situacao| situacao.as_str().to_string())
            .collect(),
        FilterKey::Ano | FilterKey::Origem | FilterKey::Destino | FilterKey::Orgao => Vec::new(),
    };
    std::iter::once(ALL_VALUE.to_string()).chain(values).collect()
}

pub fn normalize_table(report: &NormalizeReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Rows"),
        header_cell("Dropped columns"),
        header_cell("Missing fields"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for output in &report.written {
        let missing: Vec<&str> = output
            .missing_fields
            .iter()
            .map(|field| field.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(output.source.display()),
            Cell::new(output.output.display()),
            Cell::new(output.rows),
            list_cell(&output.dropped_columns.join(", ")),
            list_cell(&missing.join(", ")),
        ]);
    }
    for failed in &report.failed {
        table.add_row(vec![
            Cell::new(failed.path.display()).fg(Color::Red),
            Cell::new(failed.error.to_string()).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    table
}

pub fn sniff_table(reports: &[SniffReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Delimiter"),
        header_cell("Encoding"),
        header_cell("Header"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for report in reports {
        let header = report.sample.lines().next().unwrap_or_default();
        table.add_row(vec![
            Cell::new(report.path.display()),
            Cell::new(report.delimiter_char().escape_default()),
            Cell::new(report.format.encoding),
            Cell::new(header),
        ]);
    }
    table
}

pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn list_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value).fg(Color::Yellow)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
