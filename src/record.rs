//! Row view handed to the classifiers and the merged classification result.

use crate::genomic::{GenomicClass, GenomicType};
use crate::protein::{ProteinClass, ProteinType};

/// Column holding the genomic description
pub const GENOMIC_COLUMN: &str = "hg38_genomic";
/// Column holding the protein description
pub const PROTEIN_COLUMN: &str = "hg38 protein";
/// Column holding the secondary effect description
pub const EFFECT_COLUMN: &str = "Effect New";
/// Column holding the exon id
pub const EXON_ID_COLUMN: &str = "ID";
/// Column holding the observed sequence with flanks
pub const SEQUENCE_COLUMN: &str = "Sequence";
/// Column holding the reference codon
pub const REF_CODON_COLUMN: &str = "RefCodon";
/// Column holding the alternate codon
pub const ALT_CODON_COLUMN: &str = "AltCodon";
/// Column receiving the failure message when errors are collected per row
pub const ERROR_COLUMN: &str = "error";

/// Columns appended to a classified table, in order
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "type_g",
    "type_g_fine",
    "effect",
    "type_p",
    "codon",
    "codon_ref",
    "codon_alt",
    "aa_ref",
    "aa_alt",
];

/// Borrowed fields of one input row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantRecord<'a> {
    /// Genomic description, e.g. `NC_000017.11:g.7675247del`
    pub genomic: &'a str,
    /// Protein description, e.g. `NC_000017.11(NP_000537.3):p.(=)`
    pub protein: &'a str,
    /// Effect description, may be empty
    pub effect: &'a str,
    /// Reference codon, empty when unknown
    pub ref_codon: &'a str,
    /// Alternate codon, empty when unknown
    pub alt_codon: &'a str,
}

impl<'a> VariantRecord<'a> {
    /// Row with a genomic and a protein description only
    pub fn new(genomic: &'a str, protein: &'a str) -> Self {
        Self {
            genomic,
            protein,
            ..Self::default()
        }
    }

    /// Sets the effect description
    pub fn with_effect(mut self, effect: &'a str) -> Self {
        self.effect = effect;
        self
    }

    /// Sets reference and alternate codon
    pub fn with_codons(mut self, ref_codon: &'a str, alt_codon: &'a str) -> Self {
        self.ref_codon = ref_codon;
        self.alt_codon = alt_codon;
        self
    }
}

/// Normalized classification of one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// One of `sub`, `del`, `ins`, `dup`
    pub genomic_type: GenomicType,
    /// Finer genomic label, e.g. `del3`
    pub genomic_subtype_label: String,
    /// Normalized protein notation, e.g. `p.Y126Sfs`
    pub protein_notation: String,
    /// One of `mis`, `fs`, `del`, `delins`, `non`, `syn`
    pub protein_type: ProteinType,
    /// Affected codon number, empty when not applicable
    pub codon: String,
    /// Reference codon bases
    pub reference_codon: String,
    /// Alternate codon bases
    pub alternate_codon: String,
    /// Reference amino acid (one letter)
    pub reference_amino_acid: String,
    /// Alternate amino acid (one letter)
    pub alternate_amino_acid: String,
}

impl ClassificationResult {
    /// Merges the genomic and protein halves
    pub fn new(genomic: GenomicClass, protein: ProteinClass) -> Self {
        Self {
            genomic_type: genomic.kind,
            genomic_subtype_label: genomic.label,
            protein_notation: protein.notation,
            protein_type: protein.kind,
            codon: protein.codon,
            reference_codon: protein.ref_codon,
            alternate_codon: protein.alt_codon,
            reference_amino_acid: protein.ref_aa,
            alternate_amino_acid: protein.alt_aa,
        }
    }

    /// Values in the order of [`OUTPUT_COLUMNS`]
    pub fn into_fields(self) -> [String; 9] {
        [
            self.genomic_type.to_string(),
            self.genomic_subtype_label,
            self.protein_notation,
            self.protein_type.to_string(),
            self.codon,
            self.reference_codon,
            self.alternate_codon,
            self.reference_amino_acid,
            self.alternate_amino_acid,
        ]
    }
}
