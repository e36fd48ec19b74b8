//! Crate-wide error type.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors raised while classifying mutation notation or reading the supporting tables
pub enum Error {
    #[error("Could not match genomic notation `{0}`")]
    /// Genomic description matched none of the genomic patterns
    UnmatchedGenomicNotation(String),
    #[error("Could not match protein notation `{protein}` with effect `{effect}`")]
    /// Protein description matched none of the protein patterns
    UnmatchedProteinNotation {
        /// Protein description of the row
        protein: String,
        /// Effect description of the row
        effect: String,
    },
    #[error("Protein notation `p.?` requires a substitution effect but got `{0}`")]
    /// Unresolved `p.?` notation whose effect is not a substitution
    UnresolvableProteinNotation(String),
    #[error("Could not resolve synonymous effect `{0}`")]
    /// Synonymous `p.(=)` notation with an effect matching no effect grammar
    UnresolvableSynonymousEffect(String),
    #[error("Protein deletion is not backed by a genomic deletion effect, got `{0}`")]
    /// Protein deletion whose effect is not a genomic deletion
    InconsistentEffect(String),
    #[error("Exon `{0}` is not present in the reference table")]
    /// Exon id missing from the reference
    UnknownExon(String),
    #[error("Coding sequence of exon `{exon}` has length {length} which is not a multiple of 3")]
    /// Reference coding sequence is out of frame
    MalformedReference {
        /// Exon id of the offending row
        exon: String,
        /// Length of the concatenated coding sequence
        length: usize,
    },
    #[error("Unknown amino acid code `{0}`")]
    /// Amino acid code missing from the code table
    UnknownCode(String),
    #[error("Column `{0}` is missing from the table")]
    /// Required column is absent
    MissingColumn(String),
    #[error("Row {row}: {source}")]
    /// Classification failure of a single row within a batch
    Row {
        /// 1-based data row number
        row: usize,
        /// Underlying classification failure
        #[source]
        source: Box<Error>,
    },
    #[error("Sequences of unequal length {0} and {1} cannot be compared")]
    /// Hamming distance on sequences of different length
    LengthMismatch(usize, usize),
    #[error("Could not read or write file")]
    /// I/O failure
    Io(#[from] std::io::Error),
    #[error("Could not convert bytes as they are invalid UTF-8")]
    /// Data is not in UTF-8 format
    NotUTF8(#[from] std::string::FromUtf8Error),
    #[error("Could not read/write delimited table")]
    /// Delimited text error
    Table(#[from] csv::Error),
    #[error("Could not open possibly compressed file")]
    /// Decompression error
    Compression(#[from] niffler::Error),
    #[error("Could not read FASTQ record")]
    /// FASTQ parsing error
    FastqRecord(#[from] bio::io::fastq::Error),
    #[error("Could not build notation pattern")]
    /// Invalid pattern built from user supplied accessions
    Pattern(#[from] regex::Error),
    #[error("Could not spawn threads")]
    /// Create thread pools error
    ThreadError,
}
