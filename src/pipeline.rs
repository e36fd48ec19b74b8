//! Row-wise classification of whole tables.

use crate::codon::{set_codon_columns, CodonDifference, CodonResolver};
use crate::error::Error;
use crate::grammar::Grammar;
use crate::record::{
    ClassificationResult, VariantRecord, ALT_CODON_COLUMN, EFFECT_COLUMN, ERROR_COLUMN,
    GENOMIC_COLUMN, OUTPUT_COLUMNS, PROTEIN_COLUMN, REF_CODON_COLUMN,
};
use crate::table::Table;
use crate::{genomic, protein, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::str::FromStr;

/// What to do with a row that cannot be classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing row
    Abort,
    /// Keep going, leave the row's output empty and record the message in `error`
    Collect,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "collect" => Ok(ErrorPolicy::Collect),
            other => Err(format!(
                "unknown error policy `{}`, expected `abort` or `collect`",
                other
            )),
        }
    }
}

/// Row counts of a classified table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows in the table
    pub rows: usize,
    /// Rows left unclassified
    pub failed: usize,
}

/// Classifies the genomic and protein description of one row. Either both succeed or the
/// row fails.
pub fn classify_row(grammar: &Grammar, record: &VariantRecord<'_>) -> Result<ClassificationResult> {
    let genomic = genomic::classify(grammar, record.genomic)?;
    let protein = protein::classify(grammar, record)?;
    Ok(ClassificationResult::new(genomic, protein))
}

/// Classifies every row of `table` and appends the output columns.
///
/// `hg38_genomic` and `hg38 protein` must be present; effect and codon columns are read as
/// empty when absent. Row order is preserved.
pub fn classify_table(grammar: &Grammar, table: &mut Table, policy: ErrorPolicy) -> Result<BatchSummary> {
    let failures = (0..table.len()).map(|_| None).collect();
    classify_rows(grammar, table, policy, failures)
}

/// Derives `RefCodon`/`AltCodon` when a reference is given, then classifies the table.
///
/// A row whose codons cannot be derived fails like a row that cannot be classified.
pub fn annotate_table(
    grammar: &Grammar,
    table: &mut Table,
    reference: Option<&CodonResolver>,
    policy: ErrorPolicy,
) -> Result<BatchSummary> {
    let failures = match reference {
        Some(reference) => derive_codons(reference, table)?,
        None => (0..table.len()).map(|_| None).collect(),
    };
    classify_rows(grammar, table, policy, failures)
}

fn derive_codons(reference: &CodonResolver, table: &mut Table) -> Result<Vec<Option<Error>>> {
    let mut differences = Vec::with_capacity(table.len());
    let mut failures = Vec::with_capacity(table.len());
    for difference in reference.row_differences(table)? {
        match difference {
            Ok(difference) => {
                differences.push(difference);
                failures.push(None);
            }
            Err(e) => {
                differences.push(CodonDifference::default());
                failures.push(Some(e));
            }
        }
    }
    set_codon_columns(table, differences);
    Ok(failures)
}

/// Classifies the rows without a failure from an earlier step
fn classify_rows(
    grammar: &Grammar,
    table: &mut Table,
    policy: ErrorPolicy,
    failures: Vec<Option<Error>>,
) -> Result<BatchSummary> {
    let genomic = table.require(GENOMIC_COLUMN)?;
    let protein = table.require(PROTEIN_COLUMN)?;
    let effect = table.column_index(EFFECT_COLUMN);
    let ref_codon = table.column_index(REF_CODON_COLUMN);
    let alt_codon = table.column_index(ALT_CODON_COLUMN);

    let cell = |row: usize, column: Option<usize>| column.map_or("", |column| table.get(row, column));

    info!("Classifying {} rows", table.len());
    let results = failures
        .into_par_iter()
        .enumerate()
        .map(|(row, failure)| match failure {
            Some(e) => Err(e),
            None => {
                let record = VariantRecord::new(table.get(row, genomic), table.get(row, protein))
                    .with_effect(cell(row, effect))
                    .with_codons(cell(row, ref_codon), cell(row, alt_codon));
                classify_row(grammar, &record)
            }
        })
        .collect::<Vec<_>>();

    let mut columns = vec![Vec::with_capacity(results.len()); OUTPUT_COLUMNS.len()];
    let mut errors = Vec::with_capacity(results.len());
    let mut failed = 0;
    for (row, result) in results.into_iter().enumerate() {
        match result {
            Ok(result) => {
                for (column, value) in columns.iter_mut().zip(result.into_fields().iter()) {
                    column.push(value.clone());
                }
                errors.push(String::new());
            }
            Err(e) => match policy {
                ErrorPolicy::Abort => {
                    return Err(Error::Row {
                        row: row + 1,
                        source: Box::new(e),
                    })
                }
                ErrorPolicy::Collect => {
                    warn!("Skipping row {}: {}", row + 1, e);
                    for column in columns.iter_mut() {
                        column.push(String::new());
                    }
                    errors.push(e.to_string());
                    failed += 1;
                }
            },
        }
    }

    for (name, values) in OUTPUT_COLUMNS.iter().zip(columns) {
        table.set_column(name, values);
    }
    if policy == ErrorPolicy::Collect {
        table.set_column(ERROR_COLUMN, errors);
    }

    debug!("Classified {} rows, {} failed", table.len(), failed);
    Ok(BatchSummary {
        rows: table.len(),
        failed,
    })
}
