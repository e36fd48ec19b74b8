//! Classification of genomic notation into a mutation type and a finer subtype label.

use crate::error::Error;
use crate::grammar::{GenomicNotation, Grammar};
use crate::Result;
use log::debug;
use std::fmt;

/// Coarse genomic mutation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomicType {
    /// Substitution of one or more bases
    Sub,
    /// Deletion
    Del,
    /// Insertion
    Ins,
    /// Duplication
    Dup,
}

impl fmt::Display for GenomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenomicType::Sub => "sub",
            GenomicType::Del => "del",
            GenomicType::Ins => "ins",
            GenomicType::Dup => "dup",
        };
        f.write_str(name)
    }
}

/// Type and subtype label of a genomic description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicClass {
    /// Coarse type
    pub kind: GenomicType,
    /// Finer label such as `del3`, `sub2` or `insA`
    pub label: String,
}

impl GenomicNotation {
    /// Coarse type of the notation
    pub fn kind(&self) -> GenomicType {
        match self {
            GenomicNotation::SingleDeletion | GenomicNotation::RangeDeletion { .. } => {
                GenomicType::Del
            }
            GenomicNotation::Insertion { .. } => GenomicType::Ins,
            GenomicNotation::MultiSubstitution { .. } | GenomicNotation::Substitution => {
                GenomicType::Sub
            }
            GenomicNotation::Duplication => GenomicType::Dup,
        }
    }

    /// Subtype label of the notation. A duplication counts as a one base insertion.
    pub fn label(&self) -> String {
        match self {
            GenomicNotation::SingleDeletion => "del1".to_string(),
            GenomicNotation::RangeDeletion { start, stop } => format!("del{}", stop - start + 1),
            GenomicNotation::Insertion { inserted } => inserted.clone(),
            GenomicNotation::MultiSubstitution { count } => format!("sub{}", count),
            GenomicNotation::Substitution => "sub1".to_string(),
            GenomicNotation::Duplication => "ins1".to_string(),
        }
    }
}

/// Classifies a genomic description, failing when no genomic rule accepts it
pub fn classify(grammar: &Grammar, genomic: &str) -> Result<GenomicClass> {
    let (rule, notation) = grammar
        .match_genomic(genomic)
        .ok_or_else(|| Error::UnmatchedGenomicNotation(genomic.to_string()))?;
    debug!("Genomic notation {} matched {:?}", genomic, rule);
    Ok(GenomicClass {
        kind: notation.kind(),
        label: notation.label(),
    })
}
