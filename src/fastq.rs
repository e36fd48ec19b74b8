//! Counting of duplicate reads in single or paired FASTQ files.

use crate::table::open_output;
use crate::Result;
use bio::io::fastq;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Reads (or read pairs) inspected when no limit is given
pub const DEFAULT_MAX_READS: usize = 100_000;

type FastqRecords = fastq::Records<io::BufReader<Box<dyn io::Read>>>;

/// Opens a plain or compressed FASTQ file
pub fn open_fastq<P: AsRef<Path>>(path: P) -> Result<fastq::Reader<io::BufReader<Box<dyn io::Read>>>> {
    let path = path.as_ref();
    let (rdr, format) = niffler::from_path(path)?;
    debug!("Reading FASTQ {} ({:?})", path.display(), format);
    Ok(fastq::Reader::new(rdr))
}

/// A distinct read sequence, or pair of sequences, and how often it was seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceCount {
    /// One sequence per input file
    pub sequences: Vec<String>,
    /// Number of reads (pairs) with these sequences
    pub count: usize,
    /// Name(s) of the first read (pair) with these sequences
    pub example: Vec<String>,
}

fn read_name(record: &fastq::Record) -> String {
    match record.desc() {
        Some(desc) => format!("{} {}", record.id(), desc),
        None => record.id().to_string(),
    }
}

fn nth(values: &[String], i: usize) -> &str {
    values.get(i).map_or("", String::as_str)
}

fn read_sequence(record: &fastq::Record, prefix: Option<usize>) -> Result<String> {
    let seq = record.seq();
    let end = prefix.map_or(seq.len(), |prefix| prefix.min(seq.len()));
    Ok(String::from_utf8(seq[..end].to_vec())?)
}

/// Counts distinct sequence groups, one group per read (pair), over at most `max` groups.
/// With a `prefix` only the first `prefix` bases of every read are compared.
///
/// The result is ordered by count, most frequent first, ties in the order they were first
/// seen.
pub fn count_groups<I>(groups: I, max: usize, prefix: Option<usize>) -> Result<Vec<SequenceCount>>
where
    I: IntoIterator<Item = Result<Vec<fastq::Record>>>,
{
    let mut seen: HashMap<Vec<String>, usize> = HashMap::new();
    let mut counts: Vec<SequenceCount> = Vec::new();
    let mut total = 0;

    for group in groups.into_iter().take(max) {
        let group = group?;
        let sequences = group
            .iter()
            .map(|record| read_sequence(record, prefix))
            .collect::<Result<Vec<_>>>()?;
        total += 1;
        match seen.get(&sequences) {
            Some(&i) => counts[i].count += 1,
            None => {
                seen.insert(sequences.clone(), counts.len());
                counts.push(SequenceCount {
                    sequences,
                    count: 1,
                    example: group.iter().map(read_name).collect(),
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    info!("Counted {} distinct sequences in {} reads", counts.len(), total);
    Ok(counts)
}

/// Counts duplicate reads of `r1`, or of read pairs when `r2` is given
pub fn count_most_common_sequences<P: AsRef<Path>>(
    r1: P,
    r2: Option<P>,
    max: usize,
    prefix: Option<usize>,
) -> Result<Vec<SequenceCount>> {
    let first: FastqRecords = open_fastq(r1)?.records();
    match r2 {
        Some(r2) => {
            let second: FastqRecords = open_fastq(r2)?.records();
            let pairs = first
                .zip(second)
                .map(|(a, b)| -> Result<Vec<fastq::Record>> { Ok(vec![a?, b?]) });
            count_groups(pairs, max, prefix)
        }
        None => {
            let singles = first.map(|a| -> Result<Vec<fastq::Record>> { Ok(vec![a?]) });
            count_groups(singles, max, prefix)
        }
    }
}

#[derive(Debug, Serialize)]
struct SingleRow<'a> {
    #[serde(rename = "Seq")]
    seq: &'a str,
    #[serde(rename = "Count")]
    count: usize,
    #[serde(rename = "Example")]
    example: &'a str,
}

#[derive(Debug, Serialize)]
struct PairedRow<'a> {
    #[serde(rename = "Seq1")]
    seq1: &'a str,
    #[serde(rename = "Seq2")]
    seq2: &'a str,
    #[serde(rename = "Count")]
    count: usize,
    #[serde(rename = "Example")]
    example: String,
}

/// Writes counts as tab separated text. Paired counts get one column per mate and their
/// example names joined by a comma.
pub fn write_counts<W: io::Write>(writer: W, counts: &[SequenceCount], paired: bool) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    if paired {
        writer.write_record(&["Seq1", "Seq2", "Count", "Example"])?;
    } else {
        writer.write_record(&["Seq", "Count", "Example"])?;
    }

    for count in counts {
        if paired {
            writer.serialize(PairedRow {
                seq1: nth(&count.sequences, 0),
                seq2: nth(&count.sequences, 1),
                count: count.count,
                example: count.example.join(","),
            })?;
        } else {
            writer.serialize(SingleRow {
                seq: nth(&count.sequences, 0),
                count: count.count,
                example: nth(&count.example, 0),
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes counts to `path`, or stdout when no path is given
pub fn write_counts_to(path: Option<&Path>, counts: &[SequenceCount], paired: bool) -> Result<()> {
    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("Writing {} sequence counts to {}", counts.len(), path.display());
    }
    write_counts(open_output(path)?, counts, paired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(id: &str, desc: Option<&str>, seq: &str) -> fastq::Record {
        fastq::Record::with_attrs(id, desc, seq.as_bytes(), &vec![b'I'; seq.len()])
    }

    fn singles(records: Vec<fastq::Record>) -> Vec<Result<Vec<fastq::Record>>> {
        records.into_iter().map(|record| Ok(vec![record])).collect()
    }

    fn fastq_file(records: &[(&str, &str)]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for (name, seq) in records {
            writeln!(file, "@{}\n{}\n+\n{}", name, seq, "I".repeat(seq.len())).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn counts_sorted_with_first_example() {
        let reads = singles(vec![
            record("r1", None, "ACGT"),
            record("r2", None, "TTTT"),
            record("r3", Some("1:N:0"), "TTTT"),
            record("r4", None, "GGGG"),
            record("r5", None, "GGGG"),
            record("r6", None, "CCCC"),
        ]);
        let counts = count_groups(reads, DEFAULT_MAX_READS, None).unwrap();
        let summary = counts
            .iter()
            .map(|c| (c.sequences[0].as_str(), c.count, c.example[0].as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("TTTT", 2, "r2"),
                ("GGGG", 2, "r4"),
                ("ACGT", 1, "r1"),
                ("CCCC", 1, "r6"),
            ]
        );
    }

    #[test]
    fn max_and_prefix() {
        let reads = singles(vec![
            record("r1", None, "ACGTA"),
            record("r2", Some("extra"), "ACGTC"),
            record("r3", None, "AC"),
            record("r4", None, "ACGTT"),
        ]);
        let counts = count_groups(reads, 3, Some(4)).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].sequences, vec!["ACGT"]);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].sequences, vec!["AC"]);
    }

    #[test]
    fn paired_files() -> Result<()> {
        let r1 = fastq_file(&[("p1 1:N", "AAAA"), ("p2 1:N", "AAAA"), ("p3 1:N", "CCCC")]);
        let r2 = fastq_file(&[("p1 2:N", "GGGG"), ("p2 2:N", "GGGG"), ("p3 2:N", "TTTT")]);
        let counts =
            count_most_common_sequences(r1.path(), Some(r2.path()), DEFAULT_MAX_READS, None)?;
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].sequences, vec!["AAAA", "GGGG"]);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[0].example, vec!["p1 1:N", "p1 2:N"]);

        let mut out = Vec::new();
        write_counts(&mut out, &counts, true)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Seq1\tSeq2\tCount\tExample\n\
             AAAA\tGGGG\t2\tp1 1:N,p1 2:N\n\
             CCCC\tTTTT\t1\tp3 1:N,p3 2:N\n"
        );
        Ok(())
    }

    #[test]
    fn single_output_and_empty_input() -> Result<()> {
        let r1 = fastq_file(&[("a", "ACG"), ("b", "ACG")]);
        let counts = count_most_common_sequences(r1.path(), None, DEFAULT_MAX_READS, None)?;
        let out = NamedTempFile::new()?;
        write_counts_to(Some(out.path()), &counts, false)?;
        assert_eq!(
            std::fs::read_to_string(out.path())?,
            "Seq\tCount\tExample\nACG\t2\ta\n"
        );

        let mut empty = Vec::new();
        write_counts(&mut empty, &[], false)?;
        assert_eq!(String::from_utf8(empty)?, "Seq\tCount\tExample\n");
        Ok(())
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "@r1\nACGT\n+\nII\n@r2\nAC").unwrap();
        file.flush().unwrap();
        let result = count_most_common_sequences(file.path(), None, DEFAULT_MAX_READS, None);
        assert!(matches!(result, Err(Error::FastqRecord(_))));
    }
}
