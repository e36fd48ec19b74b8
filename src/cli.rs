use mutility::grammar::{Accessions, DEFAULT_CONTIG, DEFAULT_PROTEIN};
use mutility::pipeline::ErrorPolicy;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "mutility",
    about = "Classify HGVS mutation notation and count duplicate reads"
)]
pub(crate) struct Mutility {
    #[structopt(
        short,
        long,
        global = true,
        parse(from_occurrences),
        help = "Verbosity level, repeat for more output (-v info, -vv debug, -vvv trace)"
    )]
    pub(crate) verbose: u8,
    #[structopt(
        short,
        long,
        global = true,
        default_value = "0",
        help = "Number of threads, 0 uses all available cores"
    )]
    pub(crate) threads: usize,
    #[structopt(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, StructOpt)]
pub(crate) enum Command {
    /// Classify the genomic and protein notation of every row of a table
    Classify {
        #[structopt(
            help = "Table with `hg38_genomic`, `hg38 protein` and optionally `Effect New`, `RefCodon`, `AltCodon`",
            parse(from_os_str)
        )]
        input: PathBuf,
        #[structopt(
            short,
            long,
            help = "Exon reference table, derives RefCodon/AltCodon from `ID` and `Sequence` first",
            parse(from_os_str)
        )]
        reference: Option<PathBuf>,
        #[structopt(short, long, help = "Output table, stdout if absent", parse(from_os_str))]
        output: Option<PathBuf>,
        #[structopt(
            long,
            default_value = "abort",
            possible_values = &["abort", "collect"],
            help = "Stop at the first failing row or record failures in an `error` column"
        )]
        on_error: ErrorPolicy,
        #[structopt(flatten)]
        scope: Scope,
        #[structopt(long, default_value = "25", help = "Flanking bases on each side of observed sequences")]
        flank: usize,
    },
    /// Add the first differing reference and alternate codon of every row
    Codons {
        #[structopt(help = "Table with `ID` and `Sequence` columns", parse(from_os_str))]
        input: PathBuf,
        #[structopt(short, long, help = "Exon reference table", parse(from_os_str))]
        reference: PathBuf,
        #[structopt(short, long, help = "Output table, stdout if absent", parse(from_os_str))]
        output: Option<PathBuf>,
        #[structopt(long, default_value = "25", help = "Flanking bases on each side of observed sequences")]
        flank: usize,
    },
    /// Count the most common read sequences of single or paired FASTQ files
    Count {
        #[structopt(
            help = "FASTQ file, or both files of a pair",
            required = true,
            min_values = 1,
            max_values = 2,
            parse(from_os_str)
        )]
        reads: Vec<PathBuf>,
        #[structopt(short, long, help = "Output table, stdout if absent", parse(from_os_str))]
        output: Option<PathBuf>,
        #[structopt(long, default_value = "100000", help = "Number of reads (pairs) to inspect")]
        max: usize,
        #[structopt(long, help = "Only compare the first bases of each read")]
        prefix: Option<usize>,
    },
    /// Print the reverse complement of each sequence
    Revcomp {
        #[structopt(help = "DNA or RNA sequences", required = true)]
        sequences: Vec<String>,
    },
}

#[derive(Debug, StructOpt)]
pub(crate) struct Scope {
    #[structopt(long, default_value = DEFAULT_CONTIG, help = "Genomic reference accession")]
    contig: String,
    #[structopt(long, default_value = DEFAULT_PROTEIN, help = "Protein reference accession")]
    protein: String,
}

impl Scope {
    pub(crate) fn accessions(&self) -> Accessions {
        Accessions::new(self.contig.as_str(), self.protein.as_str())
    }

    pub(crate) fn is_default(&self) -> bool {
        self.contig == DEFAULT_CONTIG && self.protein == DEFAULT_PROTEIN
    }
}

impl Mutility {
    pub(crate) fn set_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
}
