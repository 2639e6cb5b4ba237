use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn left(header: &'static str) -> Self {
        Self { header, align: Align::Left }
    }

    pub const fn right(header: &'static str) -> Self {
        Self { header, align: Align::Right }
    }
}

/// Plain text grid in the classic `+---+` style.
///
/// The header is drawn as an ordinary first row, and every row is boxed by
/// the same rule:
///
/// ```text
/// +---------+------+
/// | summary | temp |
/// +---------+------+
/// | Clear   | 20 C |
/// +---------+------+
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Rows shorter than the column list are padded with empty cells.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        debug_assert!(row.len() <= self.columns.len(), "row wider than table");
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn write_rule(f: &mut fmt::Formatter<'_>, widths: &[usize]) -> fmt::Result {
        f.write_str("+")?;
        for w in widths {
            write!(f, "{}+", "-".repeat(w + 2))?;
        }
        Ok(())
    }

    fn write_row<'a>(
        &self,
        f: &mut fmt::Formatter<'_>,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
    ) -> fmt::Result {
        f.write_str("|")?;
        for ((cell, col), &w) in cells.zip(&self.columns).zip(widths) {
            match col.align {
                Align::Left => write!(f, " {cell:<w$} |")?,
                Align::Right => write!(f, " {cell:>w$} |")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        Self::write_rule(f, &widths)?;
        writeln!(f)?;
        self.write_row(f, &widths, self.columns.iter().map(|c| c.header))?;

        for row in &self.rows {
            writeln!(f)?;
            Self::write_rule(f, &widths)?;
            writeln!(f)?;
            self.write_row(f, &widths, row.iter().map(String::as_str))?;
        }

        writeln!(f)?;
        Self::write_rule(f, &widths)
    }
}
