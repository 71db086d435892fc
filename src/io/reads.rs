use super::peaks::{parse_peaks_reads, PeaksOptions};
use anyhow::{bail, Context, Result};
use bio::io::{fasta, fastq};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read file layouts understood by [`load_reads`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    /// Whitespace-separated tokens, `#` comment lines.
    Plain,
    Fasta,
    Fastq,
    /// PEAKS de novo peptide export (CSV).
    Peaks,
}

impl ReadFormat {
    /// Guess the format from the file name, looking through a `.gz` suffix.
    pub fn detect(path: &Path) -> Self {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();
        let filename = filename.strip_suffix(".gz").unwrap_or(&filename);

        if filename.ends_with(".fastq") || filename.ends_with(".fq") {
            ReadFormat::Fastq
        } else if [".fasta", ".fa", ".fna", ".faa"]
            .iter()
            .any(|ext| filename.ends_with(ext))
        {
            ReadFormat::Fasta
        } else if filename.ends_with(".csv") {
            ReadFormat::Peaks
        } else {
            ReadFormat::Plain
        }
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    if !path.exists() {
        bail!("The specified file does not exist: {}", path.display());
    }
    let file = File::open(path)
        .with_context(|| format!("Error opening file '{}'", path.display()))?;
    if is_gzipped(path) {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Load every read from `path`, in file order.
pub fn load_reads(path: &Path) -> Result<Vec<Vec<u8>>> {
    load_reads_with(path, &PeaksOptions::default())
}

/// As [`load_reads`], with the filters used when `path` is a PEAKS export.
pub fn load_reads_with(path: &Path, peaks: &PeaksOptions) -> Result<Vec<Vec<u8>>> {
    let format = ReadFormat::detect(path);
    log::debug!("Reading {} as {format:?}", path.display());
    let reader = open(path)?;

    let reads = match format {
        ReadFormat::Plain => parse_plain_reads(BufReader::new(reader)),
        ReadFormat::Fasta => parse_fasta_reads(reader),
        ReadFormat::Fastq => parse_fastq_reads(reader),
        ReadFormat::Peaks => parse_peaks_reads(reader, peaks),
    };
    reads.with_context(|| format!("Error reading reads from '{}'", path.display()))
}

/// Parse the plain read layout: any number of reads per line, separated by
/// whitespace. Lines starting with `#` are comments; blank lines are skipped.
pub fn parse_plain_reads<R: BufRead>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut reads = Vec::new();
    for line in reader.split(b'\n') {
        let line = line?;
        if line.first() == Some(&b'#') {
            continue;
        }
        reads.extend(
            line.split(u8::is_ascii_whitespace)
                .filter(|token| !token.is_empty())
                .map(<[u8]>::to_vec),
        );
    }
    Ok(reads)
}

pub fn parse_fasta_reads<R: Read>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut reads = Vec::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record?;
        push_record(&mut reads, record.id(), record.seq());
    }
    Ok(reads)
}

pub fn parse_fastq_reads<R: Read>(reader: R) -> Result<Vec<Vec<u8>>> {
    let mut reads = Vec::new();
    for record in fastq::Reader::new(reader).records() {
        let record = record?;
        push_record(&mut reads, record.id(), record.seq());
    }
    Ok(reads)
}

fn push_record(reads: &mut Vec<Vec<u8>>, id: &str, seq: &[u8]) {
    if seq.is_empty() {
        log::warn!("Skipping record '{id}' with an empty sequence");
    } else {
        reads.push(seq.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::env::temp_dir;
    use std::io::Write;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn write_temp(extension: &str, contents: &[u8]) -> PathBuf {
        let mut file_name = temp_dir();
        file_name.push(format!("{}.{extension}", Uuid::new_v4()));
        let mut file = File::create(&file_name).unwrap();
        file.write_all(contents).unwrap();
        file.sync_all().unwrap();
        file_name
    }

    fn strings(reads: &[Vec<u8>]) -> Vec<String> {
        reads
            .iter()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect()
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(ReadFormat::detect(Path::new("reads.txt")), ReadFormat::Plain);
        assert_eq!(ReadFormat::detect(Path::new("reads")), ReadFormat::Plain);
        assert_eq!(ReadFormat::detect(Path::new("a/b.FASTQ")), ReadFormat::Fastq);
        assert_eq!(ReadFormat::detect(Path::new("b.fq.gz")), ReadFormat::Fastq);
        assert_eq!(ReadFormat::detect(Path::new("b.fa")), ReadFormat::Fasta);
        assert_eq!(ReadFormat::detect(Path::new("b.faa.gz")), ReadFormat::Fasta);
        assert_eq!(ReadFormat::detect(Path::new("b.txt.gz")), ReadFormat::Plain);
        assert_eq!(ReadFormat::detect(Path::new("p.CSV")), ReadFormat::Peaks);
        assert_eq!(ReadFormat::detect(Path::new("p.csv.gz")), ReadFormat::Peaks);
    }

    #[test]
    fn test_plain_reads_skip_comments_and_blank_lines() {
        let text = "# sample reads\nABCDE FGHIK\n\n   \n\tLMNPQ\t RSTVW\n#AAAAA\nYYYYY";
        let reads = parse_plain_reads(text.as_bytes()).unwrap();
        assert_eq!(
            strings(&reads),
            vec!["ABCDE", "FGHIK", "LMNPQ", "RSTVW", "YYYYY"]
        );
    }

    #[test]
    fn test_plain_comment_only_when_first_character() {
        // a '#' further into the line is an ordinary symbol
        let reads = parse_plain_reads(" #ABC".as_bytes()).unwrap();
        assert_eq!(strings(&reads), vec!["#ABC"]);
    }

    #[test]
    fn test_plain_reads_keep_raw_bytes() {
        let bytes = b"AB\xffDE\r\nXYZ\xc3\n";
        let reads = parse_plain_reads(bytes.as_slice()).unwrap();
        assert_eq!(reads, vec![b"AB\xffDE".to_vec(), b"XYZ\xc3".to_vec()]);
    }

    #[test]
    fn test_load_plain_file() {
        let path = write_temp("txt", b"# header\nAAAAA\nABCDE EDCBA\n");
        let reads = load_reads(&path).unwrap();
        assert_eq!(strings(&reads), vec!["AAAAA", "ABCDE", "EDCBA"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_fasta_file() {
        let path = write_temp("fasta", b">r1 first\nABCDE\nFGH\n>r2\n\n>r3\nKLMNP\n");
        let reads = load_reads(&path).unwrap();
        assert_eq!(strings(&reads), vec!["ABCDEFGH", "KLMNP"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_fastq_file() {
        let path = write_temp("fastq", b"@id1\nACGTA\n+\nIIIII\n@id2\nTTTT\n+\nIIII\n");
        let reads = load_reads(&path).unwrap();
        assert_eq!(strings(&reads), vec!["ACGTA", "TTTT"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_gzipped_plain_file() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"# zipped\nABCDEF GHIKLM\n").unwrap();
        let path = write_temp("txt.gz", &encoder.finish().unwrap());
        let reads = load_reads(&path).unwrap();
        assert_eq!(strings(&reads), vec!["ABCDEF", "GHIKLM"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_peaks_file() {
        let export = b"Scan;Peptide;ALC (%);local confidence (%)\n\
            1;ABC(+57.02)DE;99;99 99 99 99 99\n\
            2;FGHIKL;40;95 95 95 95 12 95\n";
        let path = write_temp("csv", export);
        let options = PeaksOptions {
            separator: b';',
            ..PeaksOptions::default()
        };
        let reads = load_reads_with(&path, &options).unwrap();
        assert_eq!(strings(&reads), vec!["ABCDE", "FGHI"]);

        let options = PeaksOptions {
            min_length_patch: 5,
            ..options
        };
        let reads = load_reads_with(&path, &options).unwrap();
        assert_eq!(strings(&reads), vec!["ABCDE"]);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let mut path = temp_dir();
        path.push(format!("{}.txt", Uuid::new_v4()));
        let err = load_reads(&path).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
