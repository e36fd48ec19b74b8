use assert_cmd::prelude::*;
use lazy_static::lazy_static;
use predicates::str::{contains, is_match, starts_with, PredicateStrExt};
use regex::Regex;
use std::process::Command;
use tempfile::NamedTempFile;

lazy_static! {
    static ref CLASSIFIED_ROW: Regex =
        Regex::new(r"(?m)^(Ex\d)\t\S+\t\S+\t\S+\t(\S*)\t(\S*)\t(\S*)\t(.*)$").unwrap();
}

fn mutility() -> Command {
    Command::cargo_bin("mutility").unwrap()
}

#[test]
fn cli_no_args() {
    mutility().assert().failure();
}

#[test]
fn cli_no_such_file() {
    mutility()
        .args(&["classify", "tests/no_such_file.tsv"])
        .assert()
        .failure()
        .stderr(contains("NotFound"));
}

#[test]
fn cli_classify_with_reference() {
    let output = mutility()
        .args(&[
            "classify",
            "-r",
            "tests/input/exons.tsv",
            "tests/input/variants.tsv",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let mut lines = stdout.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID\tSequence\thg38_genomic\thg38 protein\tEffect New\tRefCodon\tAltCodon\t\
         type_g\ttype_g_fine\teffect\ttype_p\tcodon\tcodon_ref\tcodon_alt\taa_ref\taa_alt"
    );
    let rows = CLASSIFIED_ROW
        .captures_iter(&stdout)
        .map(|caps| {
            let mut fields = vec![caps[1].to_string(), caps[3].to_string(), caps[4].to_string()];
            fields.extend(caps[5].split('\t').map(str::to_string));
            fields
        })
        .collect::<Vec<_>>();
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[0],
        vec!["Ex1", "TAC", "AAC", "del", "del3", "p.Y126Sfs", "fs", "126", "", "", "Y", "S"]
    );
    assert_eq!(
        rows[1],
        vec!["Ex2", "GCC", "GCA", "sub", "sub2", "p.A2S", "mis", "2", "GCC", "GCA", "A", "S"]
    );
    assert_eq!(
        rows[2],
        vec!["Ex2", "GCC", "GCT", "sub", "sub1", "p.(=)", "syn", "2", "GCC", "GCT", "A", "A"]
    );
    assert_eq!(
        rows[3],
        vec!["Ex1", "", "", "dup", "ins1", "p.Q136X", "non", "136", "", "", "Q", "X"]
    );
}

#[test]
fn cli_classify_csv_to_file() {
    let out = NamedTempFile::new().unwrap();
    mutility()
        .args(&["-v", "classify", "tests/input/variants.csv", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stdout("");
    let content = std::fs::read_to_string(out.path()).unwrap();
    assert!(content.starts_with("hg38_genomic\thg38 protein\tEffect New\ttype_g\t"));
    assert!(content.contains("NC_000017.11:g.7675247del\tNC_000017.11(NP_000537.3):p.(Tyr126Serfs*44)\t\tdel\tdel1\tp.Y126Sfs\tfs\t126\t\t\tY\tS\n"));
}

#[test]
fn cli_classify_aborts_on_bad_row() {
    mutility()
        .args(&["classify", "tests/input/bad_variants.tsv"])
        .assert()
        .failure()
        .stderr(contains("row: 2"))
        .stderr(contains("UnresolvableProteinNotation"));
}

#[test]
fn cli_classify_collects_errors() {
    mutility()
        .args(&["classify", "--on-error", "collect", "tests/input/bad_variants.tsv"])
        .assert()
        .success()
        .stdout(contains("\terror\n"))
        .stdout(is_match(r"p\.\?\tg\.7675239delC(\t){10}Protein notation `p\.\?` requires").unwrap())
        .stdout(contains("dup\tins1\tp.Q136X\tnon\t136\t\t\tQ\tX\t\n"))
        .stderr(contains("Skipping row 2"));
}

#[test]
fn cli_classify_other_contig() {
    mutility()
        .args(&[
            "classify",
            "--contig",
            "NC_000013.11",
            "tests/input/variants.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("UnmatchedGenomicNotation"));
}

#[test]
fn cli_codons_only() {
    mutility()
        .args(&["codons", "-r", "tests/input/exons.tsv", "tests/input/variants.tsv"])
        .assert()
        .success()
        .stdout(starts_with("ID\tSequence\thg38_genomic\thg38 protein\tEffect New\tRefCodon\tAltCodon\n"))
        .stdout(contains("\tTAC\tAAC\n"))
        .stdout(contains("\tp.A2A\tGCC\tGCT\n"));
}

#[test]
fn cli_codons_malformed_reference() {
    mutility()
        .args(&[
            "codons",
            "-r",
            "tests/input/malformed_exons.tsv",
            "tests/input/variants.tsv",
        ])
        .assert()
        .failure()
        .stderr(contains("MalformedReference"))
        .stderr(contains("length: 14"));
}

#[test]
fn cli_count_paired() {
    mutility()
        .args(&[
            "count",
            "tests/input/reads_R1.fastq",
            "tests/input/reads_R2.fastq",
        ])
        .assert()
        .success()
        .stdout(starts_with(
            "Seq1\tSeq2\tCount\tExample\n\
             TTGGCCAATT\tCCCCAAAAGG\t2\tread2 1:N:0,read2 2:N:0\n",
        ))
        .stdout(contains("\t1\t").count(3));
}

#[test]
fn cli_count_gz_with_prefix() {
    mutility()
        .args(&["count", "--prefix", "8", "tests/input/reads_R1.fastq.gz"])
        .assert()
        .success()
        .stdout(
            "Seq\tCount\tExample\n\
             TTGGCCAA\t3\tread2 1:N:0\n\
             ACGTACGT\t2\tread1 1:N:0\n",
        );
}

#[test]
fn cli_count_max() {
    mutility()
        .args(&["count", "--max", "2", "tests/input/reads_R1.fastq"])
        .assert()
        .success()
        .stdout(contains("\t1\t").count(2));
}

#[test]
fn cli_revcomp() {
    mutility()
        .args(&["revcomp", "aCgU", "RYKM"])
        .assert()
        .success()
        .stdout(contains("AcGt\nKMRY").trim());
}
