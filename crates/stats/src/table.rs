use std::{fmt, io, iter};

use derive_more::{Display, Error};
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

#[derive(Debug, Display, Error)]
pub enum TableError {
    #[display("column {column:?} already exists")]
    ColumnCollision { column: String },
    #[display("no column {column:?}")]
    NoSuchColumn { column: String },
}

/// Rows keyed by benchmark name, columns keyed by counter label.
///
/// Row and column order is insertion order; that order is also what breaks
/// ties under [`Table::sort_by_column`]. A cell is either absent (nothing
/// matched, or an outer join filled nothing in) or a present `f64`, which
/// may be NaN for a derived value with an undefined input. The two render
/// differently: `-` versus `nan`.
///
/// Invariant: every key in `index` owns an entry in `rows`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<String>,
    rows: FxHashMap<String, FxHashMap<String, f64>>,
}

/// A read-only view of one row.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    cells: &'a FxHashMap<String, f64>,
}

impl Row<'_> {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.cells.get(column).copied()
    }

    /// Ratio of two cells. Undefined (NaN) when either side is absent or
    /// the denominator is zero.
    pub fn ratio(&self, numerator: &str, denominator: &str) -> f64 {
        match (self.get(numerator), self.get(denominator)) {
            (Some(num), Some(den)) if den != 0.0 => num / den,
            _ => f64::NAN,
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        self.rows.get(key)?.get(column).copied()
    }

    /// Inserts one row, replacing any previous row under the same key.
    /// Unseen columns are appended in first-emission order.
    pub fn insert_row<I>(&mut self, key: impl Into<String>, cells: I)
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let key = key.into();
        let mut row = FxHashMap::default();
        for (column, value) in cells {
            if !self.columns.contains(&column) {
                self.columns.push(column.clone());
            }
            row.insert(column, value);
        }
        if !self.rows.contains_key(&key) {
            self.index.push(key.clone());
        }
        self.rows.insert(key, row);
    }

    /// Outer join on row key. Column sets must be disjoint: a collision
    /// would silently overwrite one side's data, so it is an error here.
    /// Rows present on one side only keep their missing cells absent.
    pub fn join(mut self, other: Table) -> Result<Table, TableError> {
        if let Some(column) = other.columns.iter().find(|column| self.columns.contains(*column)) {
            return Err(TableError::ColumnCollision {
                column: column.clone(),
            });
        }
        let Table {
            index,
            columns,
            mut rows,
        } = other;
        self.columns.extend(columns);
        for key in index {
            let cells = rows.remove(&key).unwrap_or_default();
            match self.rows.get_mut(&key) {
                Some(row) => row.extend(cells),
                None => {
                    self.index.push(key.clone());
                    self.rows.insert(key, cells);
                }
            }
        }
        Ok(self)
    }

    /// Relabels one column, collision-checked like [`Table::join`].
    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> Result<(), TableError> {
        let new = new.into();
        if self.columns.contains(&new) {
            return Err(TableError::ColumnCollision { column: new });
        }
        let Some(slot) = self.columns.iter_mut().find(|column| column.as_str() == old) else {
            return Err(TableError::NoSuchColumn {
                column: old.to_owned(),
            });
        };
        *slot = new.clone();
        for row in self.rows.values_mut() {
            if let Some(value) = row.remove(old) {
                row.insert(new.clone(), value);
            }
        }
        Ok(())
    }

    /// Appends a column computed row-wise from the existing cells. Every row
    /// gets a present cell; expressions over absent inputs are expected to
    /// yield NaN (see [`Row::ratio`]) rather than fail.
    pub fn derive<F>(&mut self, column: impl Into<String>, f: F) -> Result<(), TableError>
    where
        F: Fn(Row<'_>) -> f64,
    {
        let column = column.into();
        if self.columns.contains(&column) {
            return Err(TableError::ColumnCollision { column });
        }
        for key in &self.index {
            let value = f(Row {
                cells: &self.rows[key],
            });
            if let Some(row) = self.rows.get_mut(key) {
                row.insert(column.clone(), value);
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Stable sort of the rows by one column's values. Absent and NaN cells
    /// order after every real value; ties keep their previous order.
    pub fn sort_by_column(&mut self, column: &str) -> Result<(), TableError> {
        if !self.columns.iter().any(|have| have == column) {
            return Err(TableError::NoSuchColumn {
                column: column.to_owned(),
            });
        }
        let mut index = std::mem::take(&mut self.index);
        index.sort_by_key(|key| OrderedFloat(self.get(key, column).unwrap_or(f64::NAN)));
        self.index = index;
        Ok(())
    }

    /// Keeps every `step`-th row, starting with the first.
    pub fn thinned(mut self, step: usize) -> Table {
        let index: Vec<String> = self.index.iter().step_by(step.max(1)).cloned().collect();
        self.rows.retain(|key, _| index.contains(key));
        Table {
            index,
            columns: self.columns,
            rows: self.rows,
        }
    }

    /// Rows in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Row<'_>)> {
        self.index.iter().map(|key| {
            (
                key.as_str(),
                Row {
                    cells: &self.rows[key],
                },
            )
        })
    }

    /// Echoes the table as CSV, absent cells as empty fields. Console
    /// inspection only; nothing machine-readable is persisted anywhere.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(
            iter::once("benchmark".to_owned()).chain(self.columns.iter().cloned()),
        )?;
        for key in &self.index {
            writer.write_record(iter::once(key.clone()).chain(self.columns.iter().map(
                |column| match self.get(key, column) {
                    Some(value) if value.is_nan() => "nan".to_owned(),
                    Some(value) => value.to_string(),
                    None => String::new(),
                },
            )))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn format_cell(value: Option<f64>) -> String {
    match value {
        None => "-".to_owned(),
        Some(value) if value.is_nan() => "nan".to_owned(),
        Some(value) => format!("{value}"),
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut key_width = "benchmark".len();
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        for key in &self.index {
            key_width = key_width.max(key.len());
            for (i, column) in self.columns.iter().enumerate() {
                widths[i] = widths[i].max(format_cell(self.get(key, column)).len());
            }
        }
        write!(f, "{:key_width$}", "benchmark")?;
        for (i, column) in self.columns.iter().enumerate() {
            write!(f, "  {column:>0$}", widths[i])?;
        }
        writeln!(f)?;
        for key in &self.index {
            write!(f, "{key:key_width$}")?;
            for (i, column) in self.columns.iter().enumerate() {
                write!(f, "  {:>1$}", format_cell(self.get(key, column)), widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, f64)]) -> Vec<(String, f64)> {
        cells
            .iter()
            .map(|(column, value)| (column.to_string(), *value))
            .collect()
    }

    fn two_sided() -> (Table, Table) {
        let mut left = Table::new();
        left.insert_row("bwaves_0", row(&[("ipc", 1.5)]));
        left.insert_row("mcf_0", row(&[("ipc", 0.7)]));
        let mut right = Table::new();
        right.insert_row("bwaves_0", row(&[("ideal_ipc", 2.9)]));
        right.insert_row("imagick_0", row(&[("ideal_ipc", 3.4)]));
        (left, right)
    }

    #[test]
    fn outer_join_unions_rows_and_leaves_holes() {
        let (left, right) = two_sided();
        let joined = left.join(right).unwrap();
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.columns(), ["ipc", "ideal_ipc"]);
        assert_eq!(joined.get("bwaves_0", "ipc"), Some(1.5));
        assert_eq!(joined.get("bwaves_0", "ideal_ipc"), Some(2.9));
        assert_eq!(joined.get("mcf_0", "ideal_ipc"), None);
        assert_eq!(joined.get("imagick_0", "ipc"), None);
    }

    #[test]
    fn join_rejects_column_collision() {
        let (left, _) = two_sided();
        let mut clashing = Table::new();
        clashing.insert_row("bwaves_0", row(&[("ipc", 2.0)]));
        let err = left.join(clashing).unwrap_err();
        assert!(matches!(err, TableError::ColumnCollision { column } if column == "ipc"));
    }

    #[test]
    fn derived_ratio_is_nan_on_zero_or_absent_denominator() {
        let mut table = Table::new();
        table.insert_row("a", row(&[("packets", 300.0), ("insts", 100.0)]));
        table.insert_row("b", row(&[("packets", 10.0), ("insts", 0.0)]));
        table.insert_row("c", row(&[("packets", 10.0)]));
        table
            .derive("ppi", |row| row.ratio("packets", "insts"))
            .unwrap();
        assert_eq!(table.get("a", "ppi"), Some(3.0));
        assert!(table.get("b", "ppi").unwrap().is_nan());
        assert!(table.get("c", "ppi").unwrap().is_nan());
    }

    #[test]
    fn derive_rejects_existing_column() {
        let mut table = Table::new();
        table.insert_row("a", row(&[("ipc", 1.0)]));
        let err = table.derive("ipc", |_| 0.0).unwrap_err();
        assert!(matches!(err, TableError::ColumnCollision { .. }));
    }

    #[test]
    fn rename_is_collision_checked() {
        let mut table = Table::new();
        table.insert_row("a", row(&[("ipc", 1.0), ("cpi", 1.0)]));
        assert!(matches!(
            table.rename_column("ipc", "cpi"),
            Err(TableError::ColumnCollision { .. })
        ));
        assert!(matches!(
            table.rename_column("missing", "x"),
            Err(TableError::NoSuchColumn { .. })
        ));
        table.rename_column("ipc", "ideal_ipc").unwrap();
        assert_eq!(table.columns(), ["ideal_ipc", "cpi"]);
        assert_eq!(table.get("a", "ideal_ipc"), Some(1.0));
        assert_eq!(table.get("a", "ipc"), None);
    }

    #[test]
    fn sort_orders_missing_and_nan_last_and_is_stable() {
        let mut table = Table::new();
        table.insert_row("slow", row(&[("ppi", 2.5)]));
        table.insert_row("undefined", row(&[("ppi", f64::NAN)]));
        table.insert_row("fast", row(&[("ppi", 1.2)]));
        table.insert_row("hole", row(&[]));
        table.insert_row("tied", row(&[("ppi", 1.2)]));
        table.sort_by_column("ppi").unwrap();
        assert_eq!(table.index(), ["fast", "tied", "slow", "undefined", "hole"]);
        assert!(matches!(
            table.sort_by_column("nope"),
            Err(TableError::NoSuchColumn { .. })
        ));
    }

    #[test]
    fn thinning_keeps_every_other_row() {
        let mut table = Table::new();
        for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            table.insert_row(*key, row(&[("v", i as f64)]));
        }
        let thinned = table.thinned(2);
        assert_eq!(thinned.index(), ["a", "c", "e"]);
        assert_eq!(thinned.get("b", "v"), None);
    }

    #[test]
    fn display_marks_absent_and_undefined_cells_differently() {
        let mut table = Table::new();
        table.insert_row("a", row(&[("ipc", 1.5)]));
        table.insert_row("b", row(&[("nanish", f64::NAN)]));
        let rendered = table.to_string();
        assert!(rendered.contains("benchmark"));
        assert!(rendered.contains('-'));
        assert!(rendered.contains("nan"));
    }

    #[test]
    fn csv_echo_round_trips_header_and_holes() {
        let (left, right) = two_sided();
        let joined = left.join(right).unwrap();
        let mut out = Vec::new();
        joined.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("benchmark,ipc,ideal_ipc"));
        assert_eq!(lines.next(), Some("bwaves_0,1.5,2.9"));
        assert_eq!(lines.next(), Some("mcf_0,0.7,"));
    }
}
