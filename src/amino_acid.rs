//! Conversion between one-letter and three-letter amino acid codes.

use crate::error::Error;
use crate::Result;

/// Three-letter and one-letter codes of the standard amino acids, the ambiguity codes,
/// selenocysteine, pyrrolysine and the termination symbol.
pub const AMINO_ACIDS: [(&str, char); 27] = [
    ("Ala", 'A'),
    ("Arg", 'R'),
    ("Asn", 'N'),
    ("Asp", 'D'),
    ("Cys", 'C'),
    ("Gln", 'Q'),
    ("Glu", 'E'),
    ("Gly", 'G'),
    ("His", 'H'),
    ("Ile", 'I'),
    ("Leu", 'L'),
    ("Lys", 'K'),
    ("Met", 'M'),
    ("Phe", 'F'),
    ("Pro", 'P'),
    ("Ser", 'S'),
    ("Thr", 'T'),
    ("Trp", 'W'),
    ("Tyr", 'Y'),
    ("Val", 'V'),
    ("Asx", 'B'),
    ("Glx", 'Z'),
    ("Xaa", 'X'),
    ("Xle", 'J'),
    ("Sec", 'U'),
    ("Pyl", 'O'),
    ("Ter", '*'),
];

/// Number of standard amino acids at the head of [`AMINO_ACIDS`]
pub const STANDARD_COUNT: usize = 20;

/// Returns the one-letter code of a three-letter amino acid code such as `Tyr`
pub fn one_letter(three_letter: &str) -> Result<char> {
    AMINO_ACIDS
        .iter()
        .find(|(code, _)| *code == three_letter)
        .map(|(_, letter)| *letter)
        .ok_or_else(|| Error::UnknownCode(three_letter.to_string()))
}

/// Returns the three-letter code of a one-letter amino acid code such as `Y`
pub fn three_letter(one_letter: char) -> Result<&'static str> {
    AMINO_ACIDS
        .iter()
        .find(|(_, letter)| *letter == one_letter)
        .map(|(code, _)| *code)
        .ok_or_else(|| Error::UnknownCode(one_letter.to_string()))
}
