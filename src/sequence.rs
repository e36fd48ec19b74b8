//! Small helpers on nucleotide sequences.

use crate::error::Error;
use crate::Result;
use bio::alignment::distance;
use bio::alphabets::dna;

/// Reverse complement of a DNA or RNA sequence.
///
/// IUPAC ambiguity codes are complemented, case is preserved and `U` is treated as `T`, so
/// the result is always DNA. Characters outside the IUPAC alphabet are kept as they are.
pub fn reverse_complement(seq: &str) -> Result<String> {
    let dna = seq.bytes().map(|base| match base {
        b'U' => b'T',
        b'u' => b't',
        other => other,
    });
    Ok(String::from_utf8(dna::revcomp(dna.collect::<Vec<_>>()))?)
}

/// Number of positions at which two sequences of equal length differ
pub fn hamming(a: &str, b: &str) -> Result<usize> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch(a.len(), b.len()));
    }
    Ok(distance::hamming(a.as_bytes(), b.as_bytes()) as usize)
}
