//! Secondary "effect" grammar used to disambiguate synonymous, unresolved and deleted
//! protein changes.
//!
//! Effects come in three shapes: `p.A129A` (substitution with one-letter codes),
//! `g.7675218ins1` (genomic insertion) and `g.7675239delCA` (genomic deletion of one to
//! four bases).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SUBSTITUTION: Regex =
        Regex::new(r"^p\.(?P<from>\D)(?P<codon>\d+)(?P<to>\D)$").unwrap();
    static ref DELETION: Regex =
        Regex::new(r"^g\.(?P<position>\d+)del(?P<bases>[ACTG]{1,4})$").unwrap();
    static ref INSERTION: Regex = Regex::new(r"^g\.(?P<position>\d+)ins\d$").unwrap();
}

/// A parsed effect description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Amino acid substitution, codes taken verbatim as single letters
    Substitution {
        /// Reference amino acid
        from: String,
        /// Codon number as written
        codon: String,
        /// Alternate amino acid
        to: String,
    },
    /// Genomic insertion at a position
    Insertion {
        /// Genomic position as written
        position: String,
    },
    /// Genomic deletion of a few reference bases
    Deletion {
        /// Genomic position as written
        position: String,
        /// Deleted reference bases
        bases: String,
    },
}

/// Matches `p.<From><Num><To>`
pub fn substitution(effect: &str) -> Option<Effect> {
    SUBSTITUTION.captures(effect).map(|caps| Effect::Substitution {
        from: caps["from"].to_string(),
        codon: caps["codon"].to_string(),
        to: caps["to"].to_string(),
    })
}

/// Matches `g.<pos>ins<digit>`
pub fn insertion(effect: &str) -> Option<Effect> {
    INSERTION.captures(effect).map(|caps| Effect::Insertion {
        position: caps["position"].to_string(),
    })
}

/// Matches `g.<pos>del<bases>`
pub fn deletion(effect: &str) -> Option<Effect> {
    DELETION.captures(effect).map(|caps| Effect::Deletion {
        position: caps["position"].to_string(),
        bases: caps["bases"].to_string(),
    })
}

/// Tries substitution, insertion and deletion in that order
pub fn resolve(effect: &str) -> Option<Effect> {
    substitution(effect)
        .or_else(|| insertion(effect))
        .or_else(|| deletion(effect))
}
