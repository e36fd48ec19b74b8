#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]

//! Command line front end of mutility.
mod cli;

use crate::cli::{Command, Mutility};
use log::{info, warn};
use mutility::codon::CodonResolver;
use mutility::grammar::{Grammar, DEFAULT_GRAMMAR};
use mutility::pipeline::{annotate_table, ErrorPolicy};
use mutility::table::Table;
use mutility::{fastq, sequence, Error, Result};
use std::path::Path;
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = Mutility::from_args();
    opt.set_logging();

    rayon::ThreadPoolBuilder::new()
        .num_threads(opt.threads)
        .build_global()
        .map_err(|_| Error::ThreadError)?;

    match opt.command {
        Command::Classify {
            input,
            reference,
            output,
            on_error,
            scope,
            flank,
        } => {
            let custom;
            let grammar: &Grammar = if scope.is_default() {
                &DEFAULT_GRAMMAR
            } else {
                custom = Grammar::new(scope.accessions())?;
                &custom
            };
            let reference = match reference {
                Some(path) => Some(CodonResolver::from_path(path)?.with_flank(flank)),
                None => None,
            };

            let mut table = Table::from_path(&input)?;
            let summary = annotate_table(grammar, &mut table, reference.as_ref(), on_error)?;
            if on_error == ErrorPolicy::Collect && summary.failed > 0 {
                warn!(
                    "{} of {} rows could not be classified",
                    summary.failed,
                    summary.rows
                );
            }
            write_table(&table, output.as_deref())
        }
        Command::Codons {
            input,
            reference,
            output,
            flank,
        } => {
            let reference = CodonResolver::from_path(reference)?.with_flank(flank);
            let mut table = Table::from_path(&input)?;
            reference.add_codon_columns(&mut table)?;
            write_table(&table, output.as_deref())
        }
        Command::Count {
            reads,
            output,
            max,
            prefix,
        } => {
            let counts =
                fastq::count_most_common_sequences(&reads[0], reads.get(1), max, prefix)?;
            fastq::write_counts_to(output.as_deref(), &counts, reads.len() > 1)
        }
        Command::Revcomp { sequences } => {
            for seq in &sequences {
                println!("{}", sequence::reverse_complement(seq)?);
            }
            Ok(())
        }
    }
}

fn write_table(table: &Table, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        info!("Writing {} rows to {}", table.len(), path.display());
    }
    table.write_to(output)
}
