#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Classification of HGVS-style genomic and protein mutation notation, first codon
//! differences against exon references, plus small FASTQ and sequence helpers.
//!
//! A table row holding a genomic description (`NC_000017.11:g.7675248_7675250del`), a
//! protein description (`NC_000017.11(NP_000537.3):p.(Tyr126Serfs*44)`) and an optional
//! effect description is turned into a normalized [`record::ClassificationResult`].
pub mod amino_acid;
pub mod codon;
pub mod effect;
pub mod error;
pub mod fastq;
pub mod genomic;
pub mod grammar;
pub mod pipeline;
pub mod protein;
pub mod record;
pub mod sequence;
pub mod table;

pub use error::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
