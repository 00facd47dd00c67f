use std::io::Write;

use stockp_core::Snapshot;

use crate::error::CliError;

pub fn render_json(out: &mut impl Write, snapshot: &Snapshot, pretty: bool) -> Result<(), CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(snapshot)?
    } else {
        serde_json::to_string(snapshot)?
    };
    writeln!(out, "{payload}")?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const SUMMARY_COLUMNS: [(&str, Align); 5] = [
    ("symbol", Align::Left),
    ("ticker", Align::Left),
    ("color", Align::Left),
    ("rows", Align::Right),
    ("forecast", Align::Right),
];

const HISTORY_COLUMNS: [(&str, Align); 7] = [
    ("date", Align::Left),
    ("open", Align::Right),
    ("high", Align::Right),
    ("low", Align::Right),
    ("close", Align::Right),
    ("adj", Align::Right),
    ("volume", Align::Right),
];

/// Summary table of every symbol, then the newest `rows` entries per symbol.
pub fn render_table(out: &mut impl Write, snapshot: &Snapshot, rows: usize) -> Result<(), CliError> {
    writeln!(out, "limit: {}", snapshot.limit())?;

    let summary: Vec<Vec<String>> = snapshot
        .slots()
        .iter()
        .map(|slot| {
            vec![
                slot.label.to_string(),
                slot.ticker.to_string(),
                slot.label.color().to_owned(),
                slot.stocks.len().to_string(),
                format!("{:.4}", slot.forecast),
            ]
        })
        .collect();
    write_grid(out, &SUMMARY_COLUMNS, &summary)?;

    for slot in snapshot.slots() {
        writeln!(out)?;
        writeln!(out, "{} ({})", slot.label, slot.ticker)?;
        let history: Vec<Vec<String>> = slot
            .stocks
            .iter()
            .take(rows)
            .map(|stock| {
                vec![
                    stock.date().to_string(),
                    format!("{:.2}", stock.open()),
                    format!("{:.2}", stock.high()),
                    format!("{:.2}", stock.low()),
                    format!("{:.2}", stock.close()),
                    format!("{:.2}", stock.adj()),
                    stock.volume().to_string(),
                ]
            })
            .collect();
        write_grid(out, &HISTORY_COLUMNS, &history)?;
    }

    Ok(())
}

fn write_grid(
    out: &mut impl Write,
    columns: &[(&str, Align)],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, (header, _))| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(String::len)
                .fold(header.len(), usize::max)
        })
        .collect();

    let border: String = widths
        .iter()
        .map(|width| format!("+{}", "-".repeat(width + 2)))
        .collect::<String>()
        + "+";

    writeln!(out, "{border}")?;
    let headers: Vec<String> = columns.iter().map(|(header, _)| (*header).to_owned()).collect();
    write_row(out, columns, &widths, &headers)?;
    writeln!(out, "{border}")?;
    for row in rows {
        write_row(out, columns, &widths, row)?;
    }
    writeln!(out, "{border}")?;
    Ok(())
}

fn write_row(
    out: &mut impl Write,
    columns: &[(&str, Align)],
    widths: &[usize],
    cells: &[String],
) -> Result<(), CliError> {
    for ((cell, width), (_, align)) in cells.iter().zip(widths.iter().copied()).zip(columns) {
        match align {
            Align::Left => write!(out, "| {cell:<width$} ")?,
            Align::Right => write!(out, "| {cell:>width$} ")?,
        }
    }
    writeln!(out, "|")?;
    Ok(())
}
