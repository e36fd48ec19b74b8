//! Ordered pattern tables for genomic and protein mutation notation.
//!
//! Each table is a list of `(rule, pattern)` pairs tried in order; the first pattern that
//! matches decides the rule and its captured fields. Patterns are anchored on the
//! reference contig (genomic) or the contig/protein pair (protein) of an [`Accessions`]
//! scope, e.g. `NC_000017.11:g.7675248_7675250del` and
//! `NC_000017.11(NP_000537.3):p.(Tyr126Serfs*44)`.

use crate::Result;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Default genomic contig accession (TP53 on GRCh38 chromosome 17)
pub const DEFAULT_CONTIG: &str = "NC_000017.11";
/// Default protein accession (TP53)
pub const DEFAULT_PROTEIN: &str = "NP_000537.3";
/// Three-letter code of a stop codon
const STOP_CODE: &str = "Ter";

lazy_static! {
    /// Grammar for the default accessions
    pub static ref DEFAULT_GRAMMAR: Grammar =
        Grammar::new(Accessions::default()).expect("default accessions form valid patterns");
}

/// Reference sequences that all notation is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessions {
    /// Genomic contig, e.g. `NC_000017.11`
    pub contig: String,
    /// Protein, e.g. `NP_000537.3`
    pub protein: String,
}

impl Default for Accessions {
    fn default() -> Self {
        Self {
            contig: DEFAULT_CONTIG.to_string(),
            protein: DEFAULT_PROTEIN.to_string(),
        }
    }
}

impl Accessions {
    /// Creates a scope from a contig and a protein accession
    pub fn new<C: Into<String>, P: Into<String>>(contig: C, protein: P) -> Self {
        Self {
            contig: contig.into(),
            protein: protein.into(),
        }
    }

    fn genomic_prefix(&self) -> String {
        format!(r"^{}:g\.", regex::escape(&self.contig))
    }

    fn protein_prefix(&self) -> String {
        format!(
            r"^{}\({}\):p\.",
            regex::escape(&self.contig),
            regex::escape(&self.protein)
        )
    }
}

/// Genomic rules in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomicRule {
    /// `g.<pos>del`
    SingleDeletion,
    /// `g.<start>_<stop>del`
    RangeDeletion,
    /// `g.<start>_<stop>ins<BASE>`
    Insertion,
    /// `g.[<pos><ref>><alt>;...]`
    MultiSubstitution,
    /// `g.<pos><ref>><alt>`
    Substitution,
    /// `g.<pos>dup`
    Duplication,
}

impl GenomicRule {
    /// All rules in the order they are tried
    pub const ORDER: [GenomicRule; 6] = [
        GenomicRule::SingleDeletion,
        GenomicRule::RangeDeletion,
        GenomicRule::Insertion,
        GenomicRule::MultiSubstitution,
        GenomicRule::Substitution,
        GenomicRule::Duplication,
    ];

    fn pattern(self) -> &'static str {
        match self {
            GenomicRule::SingleDeletion => r"(?P<start>\d+)del$",
            GenomicRule::RangeDeletion => r"(?P<start>\d+)_(?P<stop>\d+)del$",
            GenomicRule::Insertion => r"(?P<start>\d+)_(?P<stop>\d+)(?P<ins>ins[ATCG])$",
            GenomicRule::MultiSubstitution => r"\[(?P<sublist>(?:\d+[ATCG]>[ATCG];*)+)\]$",
            GenomicRule::Substitution => r"(?P<start>\d+)(?P<from>[ATCG])>(?P<to>[ATCG])$",
            GenomicRule::Duplication => r"\d+dup$",
        }
    }

    fn extract(self, caps: &Captures<'_>) -> Option<GenomicNotation> {
        match self {
            GenomicRule::SingleDeletion => Some(GenomicNotation::SingleDeletion),
            GenomicRule::RangeDeletion => {
                let start = caps["start"].parse::<u64>().ok()?;
                let stop = caps["stop"].parse::<u64>().ok()?;
                if stop < start {
                    return None;
                }
                Some(GenomicNotation::RangeDeletion { start, stop })
            }
            GenomicRule::Insertion => Some(GenomicNotation::Insertion {
                inserted: caps["ins"].to_string(),
            }),
            GenomicRule::MultiSubstitution => Some(GenomicNotation::MultiSubstitution {
                count: caps["sublist"].matches(';').count() + 1,
            }),
            GenomicRule::Substitution => Some(GenomicNotation::Substitution),
            GenomicRule::Duplication => Some(GenomicNotation::Duplication),
        }
    }
}

/// Fields captured by the genomic rule that fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomicNotation {
    /// Deletion of a single base
    SingleDeletion,
    /// Deletion of `stop - start + 1` bases
    RangeDeletion {
        /// First deleted position
        start: u64,
        /// Last deleted position
        stop: u64,
    },
    /// Insertion token such as `insA`
    Insertion {
        /// The literal `ins<BASE>` token
        inserted: String,
    },
    /// Several substitutions in one bracketed list
    MultiSubstitution {
        /// Number of entries in the list
        count: usize,
    },
    /// A single base substitution
    Substitution,
    /// A single base duplication
    Duplication,
}

/// Protein rules in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProteinRule {
    /// `p.(<From><Num><To>)`, `<To>` not `Ter`
    Missense,
    /// `p.(<From><Num><To>fs*<N>)`
    Frameshift,
    /// `p.(<From><Num>del)`
    Deletion,
    /// `p.(<From1><Num1>_<From2><Num2>delins<To>)`
    Delins,
    /// `p.(<From><Num>*)` or `p.(<From><Num>Ter)`
    Nonsense,
    /// `p.?`
    UnresolvedNonsense,
    /// `p.(=)`
    Synonymous,
}

impl ProteinRule {
    /// All rules in the order they are tried
    pub const ORDER: [ProteinRule; 7] = [
        ProteinRule::Missense,
        ProteinRule::Frameshift,
        ProteinRule::Deletion,
        ProteinRule::Delins,
        ProteinRule::Nonsense,
        ProteinRule::UnresolvedNonsense,
        ProteinRule::Synonymous,
    ];

    fn pattern(self) -> &'static str {
        match self {
            ProteinRule::Missense => r"\((?P<from>\D{3})(?P<codon>\d+)(?P<to>[A-Z]\D{2})\)$",
            ProteinRule::Frameshift => {
                r"\((?P<from>\D{3})(?P<codon>\d+)(?P<to>\D{3})fs\*\d+\)$"
            }
            ProteinRule::Deletion => r"\((?P<from>\D{3})(?P<codon>\d+)del\)",
            ProteinRule::Delins => {
                r"\((?P<from1>\D{3})(?P<codon1>\d+)_(?P<from2>\D{3})(?P<codon2>\d+)delins(?P<to>\D{3})\)"
            }
            ProteinRule::Nonsense => r"\((?P<from>\D{3})(?P<codon>\d+)(?:\*|Ter)\)$",
            ProteinRule::UnresolvedNonsense => r"\?",
            ProteinRule::Synonymous => r"\(=\)",
        }
    }

    /// Fields of a match. A missense change to `Ter` is left to the nonsense rule.
    fn extract(self, caps: &Captures<'_>) -> Option<ProteinNotation> {
        let field = |name: &str| caps[name].to_string();
        let notation = match self {
            ProteinRule::Missense if &caps["to"] == STOP_CODE => return None,
            ProteinRule::Missense => ProteinNotation::Missense {
                from: field("from"),
                codon: field("codon"),
                to: field("to"),
            },
            ProteinRule::Frameshift => ProteinNotation::Frameshift {
                from: field("from"),
                codon: field("codon"),
                to: field("to"),
            },
            ProteinRule::Deletion => ProteinNotation::Deletion {
                from: field("from"),
                codon: field("codon"),
            },
            ProteinRule::Delins => ProteinNotation::Delins {
                from: field("from1"),
                codon: field("codon1"),
                last: field("from2"),
                last_codon: field("codon2"),
                to: field("to"),
            },
            ProteinRule::Nonsense => ProteinNotation::Nonsense {
                from: field("from"),
                codon: field("codon"),
            },
            ProteinRule::UnresolvedNonsense => ProteinNotation::UnresolvedNonsense,
            ProteinRule::Synonymous => ProteinNotation::Synonymous,
        };
        Some(notation)
    }
}

/// Fields captured by the protein rule that fired. Amino acids are three-letter codes as
/// written in the notation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ProteinNotation {
    Missense {
        from: String,
        codon: String,
        to: String,
    },
    Frameshift {
        from: String,
        codon: String,
        to: String,
    },
    Deletion {
        from: String,
        codon: String,
    },
    Delins {
        from: String,
        codon: String,
        last: String,
        last_codon: String,
        to: String,
    },
    Nonsense {
        from: String,
        codon: String,
    },
    UnresolvedNonsense,
    Synonymous,
}

/// Compiled genomic and protein pattern tables for one [`Accessions`] scope
#[derive(Debug, Clone)]
pub struct Grammar {
    accessions: Accessions,
    genomic: Vec<(GenomicRule, Regex)>,
    protein: Vec<(ProteinRule, Regex)>,
}

impl Grammar {
    /// Compiles both pattern tables for the given scope
    pub fn new(accessions: Accessions) -> Result<Self> {
        let genomic_prefix = accessions.genomic_prefix();
        let genomic = GenomicRule::ORDER
            .iter()
            .map(|rule| Ok((*rule, Regex::new(&format!("{}{}", genomic_prefix, rule.pattern()))?)))
            .collect::<Result<Vec<_>>>()?;

        let protein_prefix = accessions.protein_prefix();
        let protein = ProteinRule::ORDER
            .iter()
            .map(|rule| Ok((*rule, Regex::new(&format!("{}{}", protein_prefix, rule.pattern()))?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            accessions,
            genomic,
            protein,
        })
    }

    /// Scope the patterns are anchored on
    pub fn accessions(&self) -> &Accessions {
        &self.accessions
    }

    /// First genomic rule accepting `genomic`, with its captured fields
    pub fn match_genomic(&self, genomic: &str) -> Option<(GenomicRule, GenomicNotation)> {
        self.genomic.iter().find_map(|(rule, pattern)| {
            pattern
                .captures(genomic)
                .and_then(|caps| rule.extract(&caps))
                .map(|notation| (*rule, notation))
        })
    }

    /// First protein rule accepting `protein`, with its captured fields
    pub fn match_protein(&self, protein: &str) -> Option<(ProteinRule, ProteinNotation)> {
        self.protein.iter().find_map(|(rule, pattern)| {
            pattern
                .captures(protein)
                .and_then(|caps| rule.extract(&caps))
                .map(|notation| (*rule, notation))
        })
    }

    /// Every genomic rule accepting `genomic`, in priority order
    pub fn genomic_rules(&self, genomic: &str) -> Vec<GenomicRule> {
        self.genomic
            .iter()
            .filter(|(rule, pattern)| {
                pattern
                    .captures(genomic)
                    .and_then(|caps| rule.extract(&caps))
                    .is_some()
            })
            .map(|(rule, _)| *rule)
            .collect()
    }

    /// Every protein rule accepting `protein`, in priority order
    pub fn protein_rules(&self, protein: &str) -> Vec<ProteinRule> {
        self.protein
            .iter()
            .filter(|(rule, pattern)| {
                pattern
                    .captures(protein)
                    .and_then(|caps| rule.extract(&caps))
                    .is_some()
            })
            .map(|(rule, _)| *rule)
            .collect()
    }
}
