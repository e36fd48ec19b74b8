//! Delimited text tables with named string columns.
//!
//! Every cell is read as a whitespace-trimmed string; short rows are padded with empty
//! cells. Files ending in `.csv` (optionally `.csv.gz`) are comma separated, everything
//! else is read as tab separated. Compressed input is detected by `niffler`.

use crate::error::Error;
use crate::Result;
use log::debug;
use std::io;
use std::path::Path;

/// A header row plus string records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Delimiter implied by the file name of `path`
pub fn delimiter_for<P: AsRef<Path>>(path: P) -> u8 {
    let name = path
        .as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if name.trim_end_matches(".gz").ends_with(".csv") {
        b','
    } else {
        b'\t'
    }
}

/// Opens `path` for writing, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn io::Write>> {
    Ok(match path {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(io::BufWriter::new(io::stdout())),
    })
}

impl Table {
    /// Empty table with the given headers
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(headers: I) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Reads a (possibly compressed) delimited file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (rdr, format) = niffler::from_path(path)?;
        debug!("Reading table {} ({:?})", path.display(), format);
        Self::from_reader(rdr, delimiter_for(path))
    }

    /// Reads delimited text with a header line
    pub fn from_reader<R: io::Read>(rdr: R, delimiter: u8) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(rdr);

        let headers = rdr
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut table = Self {
            headers,
            rows: Vec::new(),
        };
        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Position of a column that must be present
    pub fn require(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Cell at `row` and column position `column`, empty when the row is short
    pub fn get(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    /// Cell at `row` in the named column
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        self.column_index(name).map(|column| self.get(row, column))
    }

    /// Appends a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Replaces the named column or appends it when absent. `values` holds one entry per
    /// row.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(column) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[column] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                let width = self.headers.len();
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.resize(width - 1, String::new());
                    row.push(value);
                }
            }
        }
    }

    /// Writes the table as tab separated text with a header line
    pub fn write_tsv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table to `path`, or stdout when no path is given
    pub fn write_to(&self, path: Option<&Path>) -> Result<()> {
        self.write_tsv(open_output(path)?)
    }
}
