//! Reading composition rows from text.

use log::warn;

/// One composition to parse, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    /// 1-based line number in the input, or position on the command line.
    pub line: usize,
    pub composition: String,
    pub binder_vol_pct: Option<f64>,
}

impl InputRow {
    pub fn new(line: usize, composition: impl Into<String>) -> Self {
        Self {
            line,
            composition: composition.into(),
            binder_vol_pct: None,
        }
    }
}

/// Splits `source` into rows.
///
/// Each line is `<composition>` or `<composition>\t<binder vol%>`. Blank
/// lines and `#` comments are skipped. An unreadable volume is dropped with
/// a warning and the composition is still parsed.
pub fn read_rows(source: &str) -> Vec<InputRow> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| read_row(index + 1, line))
        .collect()
}

fn read_row(line_number: usize, line: &str) -> Option<InputRow> {
    let (composition, volume) = match line.split_once('\t') {
        Some((composition, volume)) => (composition, Some(volume.trim())),
        None => (line, None),
    };
    let composition = composition.trim();
    if composition.is_empty() || composition.starts_with('#') {
        return None;
    }

    let mut row = InputRow::new(line_number, composition);
    match volume {
        Some("") | None => {}
        Some(text) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => row.binder_vol_pct = Some(value),
            _ => warn!(line = line_number, volume = text; "Ignoring unreadable binder volume"),
        },
    }
    Some(row)
}
