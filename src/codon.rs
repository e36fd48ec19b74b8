//! First differing codon between a reference exon and an observed sequence.
//!
//! The reference table holds, per exon id, the bases completing a truncated start codon,
//! the exon body and the bases completing a truncated end codon. Their concatenation is
//! the in-frame coding sequence of the exon. Observed sequences carry `flank` bases of
//! context on either side which are replaced by the reference codon remainders before
//! both sequences are split into codons.

use crate::error::Error;
use crate::record::{ALT_CODON_COLUMN, EXON_ID_COLUMN, REF_CODON_COLUMN, SEQUENCE_COLUMN};
use crate::table::Table;
use crate::Result;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Bases of flanking context on each side of an observed sequence
pub const DEFAULT_FLANK: usize = 25;
/// Column completing a truncated start codon
pub const LEADING_COLUMN: &str = "beginning_of_truncated_start_codon";
/// Column holding the exon body
pub const EXON_COLUMN: &str = "Exon";
/// Column completing a truncated end codon
pub const TRAILING_COLUMN: &str = "end_of_truncated_end_codon";

/// Reference and alternate codon, both empty when no difference was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodonDifference {
    /// Reference codon
    pub reference: String,
    /// Alternate codon
    pub alternate: String,
}

impl CodonDifference {
    /// True when no differing codon was found
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.alternate.is_empty()
    }
}

/// Wild-type coding sequence of one exon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonSequence {
    leading: String,
    trailing: String,
    coding: String,
}

impl ExonSequence {
    /// Concatenates the three parts, failing when the result is out of frame
    pub fn new(id: &str, leading: &str, body: &str, trailing: &str) -> Result<Self> {
        let coding = [leading, body, trailing].concat();
        if coding.len() % 3 != 0 {
            return Err(Error::MalformedReference {
                exon: id.to_string(),
                length: coding.len(),
            });
        }
        Ok(Self {
            leading: leading.to_string(),
            trailing: trailing.to_string(),
            coding,
        })
    }

    /// Full coding sequence
    pub fn coding(&self) -> &str {
        &self.coding
    }
}

/// Resolves the first codon difference against an immutable exon reference table
#[derive(Debug, Clone)]
pub struct CodonResolver {
    exons: HashMap<String, ExonSequence>,
    flank: usize,
}

impl CodonResolver {
    /// Loads the reference from a delimited file with columns `ID`,
    /// `beginning_of_truncated_start_codon`, `Exon` and `end_of_truncated_end_codon`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let resolver = Self::from_table(&Table::from_path(path)?)?;
        info!(
            "Loaded {} reference exons from {}",
            resolver.len(),
            path.display()
        );
        Ok(resolver)
    }

    /// Builds the reference from a table, empty cells count as empty sequence
    pub fn from_table(table: &Table) -> Result<Self> {
        let id = table.require(EXON_ID_COLUMN)?;
        let leading = table.require(LEADING_COLUMN)?;
        let body = table.require(EXON_COLUMN)?;
        let trailing = table.require(TRAILING_COLUMN)?;

        let mut exons = HashMap::with_capacity(table.len());
        for row in 0..table.len() {
            let exon_id = table.get(row, id);
            let exon = ExonSequence::new(
                exon_id,
                table.get(row, leading),
                table.get(row, body),
                table.get(row, trailing),
            )?;
            if exons.insert(exon_id.to_string(), exon).is_some() {
                warn!("Exon {} is listed more than once, keeping the last entry", exon_id);
            }
        }
        Ok(Self {
            exons,
            flank: DEFAULT_FLANK,
        })
    }

    /// Changes the number of flanking bases trimmed from observed sequences
    pub fn with_flank(mut self, flank: usize) -> Self {
        self.flank = flank;
        self
    }

    /// Flanking bases trimmed from each side of observed sequences
    pub fn flank(&self) -> usize {
        self.flank
    }

    /// Number of reference exons
    pub fn len(&self) -> usize {
        self.exons.len()
    }

    /// True when the reference holds no exons
    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }

    /// Reference entry of an exon
    pub fn exon(&self, exon_id: &str) -> Option<&ExonSequence> {
        self.exons.get(exon_id)
    }

    /// Compares the codons of the reference exon with the observed sequence, stripped of
    /// its flanks and completed with the reference codon remainders, and reports the
    /// first pair that differs.
    pub fn first_codon_difference(&self, exon_id: &str, observed: &str) -> Result<CodonDifference> {
        let exon = self
            .exons
            .get(exon_id)
            .ok_or_else(|| Error::UnknownExon(exon_id.to_string()))?;

        let observed = observed.as_bytes();
        let inner: &[u8] = if observed.len() > 2 * self.flank {
            &observed[self.flank..observed.len() - self.flank]
        } else {
            &[]
        };
        let sequence = [exon.leading.as_bytes(), inner, exon.trailing.as_bytes()].concat();

        let difference = exon
            .coding
            .as_bytes()
            .chunks_exact(3)
            .zip(sequence.chunks_exact(3))
            .find(|(reference, alternate)| reference != alternate);

        match difference {
            Some((reference, alternate)) => Ok(CodonDifference {
                reference: String::from_utf8(reference.to_vec())?,
                alternate: String::from_utf8(alternate.to_vec())?,
            }),
            None => Ok(CodonDifference::default()),
        }
    }

    /// Codon difference of every row of `table`, from its `ID` and `Sequence` columns.
    /// Rows that cannot be resolved keep their error.
    pub fn row_differences(&self, table: &Table) -> Result<Vec<Result<CodonDifference>>> {
        let id = table.require(EXON_ID_COLUMN)?;
        let sequence = table.require(SEQUENCE_COLUMN)?;

        Ok((0..table.len())
            .into_par_iter()
            .map(|row| self.first_codon_difference(table.get(row, id), table.get(row, sequence)))
            .collect())
    }

    /// Fills the `RefCodon` and `AltCodon` columns from each row's `ID` and `Sequence`,
    /// failing with the 1-based number of the first row that cannot be resolved
    pub fn add_codon_columns(&self, table: &mut Table) -> Result<()> {
        let differences = self
            .row_differences(table)?
            .into_iter()
            .enumerate()
            .map(|(row, difference)| {
                difference.map_err(|e| Error::Row {
                    row: row + 1,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        set_codon_columns(table, differences);
        Ok(())
    }
}

/// Writes one difference per row into the `RefCodon` and `AltCodon` columns
pub fn set_codon_columns(table: &mut Table, differences: Vec<CodonDifference>) {
    let (reference, alternate): (Vec<String>, Vec<String>) = differences
        .into_iter()
        .map(|difference| (difference.reference, difference.alternate))
        .unzip();
    table.set_column(REF_CODON_COLUMN, reference);
    table.set_column(ALT_CODON_COLUMN, alternate);
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLANK_5: &str = "TTTTTGGGGGTTTTTGGGGGTTTTT";
    const FLANK_3: &str = "CCCCCAAAAACCCCCAAAAACCCCC";

    fn reference() -> CodonResolver {
        let data = format!(
            "{}\t{}\t{}\t{}\n\
             Ex1\tG\tCTGAGTACGGAT\tCC\n\
             Ex2\t\tATGGCCAAA\t\n",
            EXON_ID_COLUMN, LEADING_COLUMN, EXON_COLUMN, TRAILING_COLUMN
        );
        CodonResolver::from_table(&Table::from_reader(data.as_bytes(), b'\t').unwrap()).unwrap()
    }

    fn observed(exon: &str) -> String {
        format!("{}{}{}", FLANK_5, exon, FLANK_3)
    }

    fn difference(reference: &str, alternate: &str) -> CodonDifference {
        CodonDifference {
            reference: reference.to_string(),
            alternate: alternate.to_string(),
        }
    }

    #[test]
    fn coding_sequence_is_concatenated() {
        let resolver = reference();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.exon("Ex1").unwrap().coding(), "GCTGAGTACGGATCC");
        assert_eq!(resolver.exon("Ex2").unwrap().coding(), "ATGGCCAAA");
    }

    #[test]
    fn first_difference_is_reported() {
        let resolver = reference();
        assert_eq!(
            resolver
                .first_codon_difference("Ex1", &observed("CTGAGAACGGAT"))
                .unwrap(),
            difference("TAC", "AAC")
        );
        assert_eq!(
            resolver
                .first_codon_difference("Ex1", &observed("GTGAGTACGGAA"))
                .unwrap(),
            difference("GCT", "GGT")
        );
        assert_eq!(
            resolver
                .first_codon_difference("Ex2", &observed("ATGGCAAAT"))
                .unwrap(),
            difference("GCC", "GCA")
        );
    }

    #[test]
    fn identical_sequence_has_no_difference() {
        let resolver = reference();
        let diff = resolver
            .first_codon_difference("Ex1", &observed("CTGAGTACGGAT"))
            .unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff, CodonDifference::default());
    }

    #[test]
    fn deletion_shifts_the_frame() {
        let resolver = reference();
        assert_eq!(
            resolver
                .first_codon_difference("Ex2", &observed("ATGCCAAA"))
                .unwrap(),
            difference("GCC", "CCA")
        );
        // A truncated observation compares only the codons both sequences have.
        assert!(resolver
            .first_codon_difference("Ex2", &observed("ATGGCC"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let resolver = reference();
        let seq = observed("CTGAGAACGGAT");
        assert_eq!(
            resolver.first_codon_difference("Ex1", &seq).unwrap(),
            resolver.first_codon_difference("Ex1", &seq).unwrap()
        );
    }

    #[test]
    fn flank_only_sequence_keeps_reference_remainders() {
        let resolver = reference();
        let seq = format!("{}{}", FLANK_5, FLANK_3);
        assert_eq!(seq.len(), 50);
        // Reconstructed sequence is just the remainders "G" + "CC".
        assert_eq!(
            resolver.first_codon_difference("Ex1", &seq).unwrap(),
            difference("GCT", "GCC")
        );
        assert!(resolver.first_codon_difference("Ex2", "ACGT").unwrap().is_empty());
        assert!(resolver.first_codon_difference("Ex2", "").unwrap().is_empty());
    }

    #[test]
    fn custom_flank() {
        let resolver = reference().with_flank(2);
        assert_eq!(resolver.flank(), 2);
        assert_eq!(
            resolver
                .first_codon_difference("Ex2", "NNATGGCCAATNN")
                .unwrap(),
            difference("AAA", "AAT")
        );
    }

    #[test]
    fn unknown_exon() {
        let result = reference().first_codon_difference("Ex9", &observed("ATG"));
        assert!(matches!(result, Err(Error::UnknownExon(id)) if id == "Ex9"));
    }

    #[test]
    fn out_of_frame_reference_is_rejected() {
        let data = format!(
            "{}\t{}\t{}\t{}\nEx1\tG\tCTGAGTACGGAT\tC\n",
            EXON_ID_COLUMN, LEADING_COLUMN, EXON_COLUMN, TRAILING_COLUMN
        );
        let table = Table::from_reader(data.as_bytes(), b'\t').unwrap();
        let result = CodonResolver::from_table(&table);
        assert!(matches!(
            result,
            Err(Error::MalformedReference { ref exon, length: 14 }) if exon == "Ex1"
        ));
    }

    #[test]
    fn missing_reference_column() {
        let table = Table::from_reader("ID\tExon\nEx1\tATG\n".as_bytes(), b'\t').unwrap();
        assert!(matches!(
            CodonResolver::from_table(&table),
            Err(Error::MissingColumn(column)) if column == LEADING_COLUMN
        ));
    }

    #[test]
    fn codon_columns_for_each_row() {
        let resolver = reference();
        let mut table = Table::new(vec![EXON_ID_COLUMN, SEQUENCE_COLUMN]);
        for (id, exon) in &[("Ex1", "CTGAGAACGGAT"), ("Ex2", "ATGGCCAAA"), ("Ex2", "ATGGCAAAA")] {
            table.push_row(vec![id.to_string(), observed(exon)]);
        }
        resolver.add_codon_columns(&mut table).unwrap();
        let column = |name: &str| {
            (0..table.len())
                .map(|row| table.value(row, name).unwrap().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(column(REF_CODON_COLUMN), vec!["TAC", "", "GCC"]);
        assert_eq!(column(ALT_CODON_COLUMN), vec!["AAC", "", "GCA"]);
    }

    #[test]
    fn unknown_exon_reports_its_row() {
        let resolver = reference();
        let mut table = Table::new(vec![EXON_ID_COLUMN, SEQUENCE_COLUMN]);
        for id in &["Ex1", "Ex9", "Ex2"] {
            table.push_row(vec![id.to_string(), observed("ATGGCCAAA")]);
        }
        let differences = resolver.row_differences(&table).unwrap();
        assert!(differences[0].is_ok());
        assert!(matches!(&differences[1], Err(Error::UnknownExon(id)) if id == "Ex9"));
        assert!(differences[2].as_ref().unwrap().is_empty());

        match resolver.add_codon_columns(&mut table) {
            Err(Error::Row { row, source }) => {
                assert_eq!(row, 2);
                assert!(matches!(*source, Error::UnknownExon(_)));
            }
            other => panic!("expected row error, got {:?}", other),
        }
        assert!(table.column_index(REF_CODON_COLUMN).is_none());
    }
}
