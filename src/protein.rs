//! Classification of protein notation.
//!
//! The protein description decides the rule; the effect description of the row backs up
//! rules whose notation carries no amino acid change (`p.?`, `p.(=)`) and confirms
//! protein deletions. Reference and alternate codons are taken from the row for missense
//! and synonymous changes and left empty otherwise.

use crate::amino_acid::one_letter;
use crate::effect::{self, Effect};
use crate::error::Error;
use crate::grammar::{Grammar, ProteinNotation};
use crate::record::VariantRecord;
use crate::Result;
use log::debug;
use std::fmt;

/// Synonymous notation as reported
pub const SYNONYMOUS_NOTATION: &str = "p.(=)";
/// One-letter code reported for a premature stop
pub const STOP: &str = "X";

/// Protein mutation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProteinType {
    /// Missense
    Mis,
    /// Frameshift
    Fs,
    /// In-frame deletion
    Del,
    /// Deletion-insertion
    Delins,
    /// Nonsense
    Non,
    /// Synonymous
    Syn,
}

impl fmt::Display for ProteinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProteinType::Mis => "mis",
            ProteinType::Fs => "fs",
            ProteinType::Del => "del",
            ProteinType::Delins => "delins",
            ProteinType::Non => "non",
            ProteinType::Syn => "syn",
        };
        f.write_str(name)
    }
}

/// Protein half of a classification
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct ProteinClass {
    pub notation: String,
    pub kind: ProteinType,
    pub codon: String,
    pub ref_codon: String,
    pub alt_codon: String,
    pub ref_aa: String,
    pub alt_aa: String,
}

impl ProteinClass {
    fn new(notation: String, kind: ProteinType, codon: String) -> Self {
        Self {
            notation,
            kind,
            codon,
            ref_codon: String::new(),
            alt_codon: String::new(),
            ref_aa: String::new(),
            alt_aa: String::new(),
        }
    }

    fn amino_acids<R: Into<String>, A: Into<String>>(mut self, ref_aa: R, alt_aa: A) -> Self {
        self.ref_aa = ref_aa.into();
        self.alt_aa = alt_aa.into();
        self
    }

    fn codons(mut self, record: &VariantRecord<'_>) -> Self {
        self.ref_codon = record.ref_codon.to_string();
        self.alt_codon = record.alt_codon.to_string();
        self
    }

    /// Values in the order notation, type, codon, codon_ref, codon_alt, aa_ref, aa_alt
    pub fn fields(&self) -> [String; 7] {
        [
            self.notation.clone(),
            self.kind.to_string(),
            self.codon.clone(),
            self.ref_codon.clone(),
            self.alt_codon.clone(),
            self.ref_aa.clone(),
            self.alt_aa.clone(),
        ]
    }
}

/// Classifies the protein description of a row
pub fn classify(grammar: &Grammar, record: &VariantRecord<'_>) -> Result<ProteinClass> {
    let (rule, notation) = grammar.match_protein(record.protein).ok_or_else(|| {
        Error::UnmatchedProteinNotation {
            protein: record.protein.to_string(),
            effect: record.effect.to_string(),
        }
    })?;
    debug!("Protein notation {} matched {:?}", record.protein, rule);
    resolve(notation, record)
}

fn resolve(notation: ProteinNotation, record: &VariantRecord<'_>) -> Result<ProteinClass> {
    let class = match notation {
        ProteinNotation::Missense { from, codon, to } => {
            let (from, to) = (one_letter(&from)?, one_letter(&to)?);
            ProteinClass::new(format!("p.{}{}{}", from, codon, to), ProteinType::Mis, codon)
                .amino_acids(from, to)
                .codons(record)
        }
        ProteinNotation::Frameshift { from, codon, to } => {
            let (from, to) = (one_letter(&from)?, one_letter(&to)?);
            ProteinClass::new(format!("p.{}{}{}fs", from, codon, to), ProteinType::Fs, codon)
                .amino_acids(from, to)
        }
        ProteinNotation::Deletion { from, codon } => {
            let from = one_letter(&from)?;
            // Presence of a deletion effect is checked, its bases are not compared.
            if effect::deletion(record.effect).is_none() {
                return Err(Error::InconsistentEffect(record.effect.to_string()));
            }
            ProteinClass::new(format!("p.{}{}del", from, codon), ProteinType::Del, codon)
                .amino_acids(from, "")
        }
        ProteinNotation::Delins {
            from,
            codon,
            last,
            last_codon,
            to,
        } => {
            let (from, last, to) = (one_letter(&from)?, one_letter(&last)?, one_letter(&to)?);
            ProteinClass::new(
                format!("p.{}{}_{}{}delins{}", from, codon, last, last_codon, to),
                ProteinType::Delins,
                codon,
            )
            .amino_acids(from, to)
        }
        ProteinNotation::Nonsense { from, codon } => {
            let from = one_letter(&from)?;
            ProteinClass::new(format!("p.{}{}{}", from, codon, STOP), ProteinType::Non, codon)
                .amino_acids(from, STOP)
        }
        ProteinNotation::UnresolvedNonsense => match effect::substitution(record.effect) {
            Some(Effect::Substitution { from, codon, .. }) => ProteinClass::new(
                format!("p.{}{}{}", from, codon, STOP),
                ProteinType::Non,
                codon,
            )
            .amino_acids(from, STOP),
            _ => return Err(Error::UnresolvableProteinNotation(record.effect.to_string())),
        },
        ProteinNotation::Synonymous => synonymous(record)?,
    };
    Ok(class)
}

fn synonymous(record: &VariantRecord<'_>) -> Result<ProteinClass> {
    let class = ProteinClass::new(
        SYNONYMOUS_NOTATION.to_string(),
        ProteinType::Syn,
        String::new(),
    )
    .codons(record);
    if record.effect.is_empty() {
        return Ok(class);
    }
    match effect::resolve(record.effect) {
        Some(Effect::Substitution { from, codon, to }) => Ok(ProteinClass { codon, ..class }
            .amino_acids(from, to)),
        Some(Effect::Insertion { .. }) | Some(Effect::Deletion { .. }) => Ok(class),
        None => Err(Error::UnresolvableSynonymousEffect(
            record.effect.to_string(),
        )),
    }
}
