use anyhow::{anyhow, bail, Result};
use csv::ByteRecord;
use std::collections::HashSet;
use std::io::Read;

/// Filters applied while reading a PEAKS de novo export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeaksOptions {
    pub separator: u8,
    /// Peptides with an ALC score at or above this are used whole.
    pub cutoff_score: u32,
    /// Residue score needed to be part of a patch in a low scoring peptide.
    pub local_cutoff_score: u32,
    pub min_length_patch: usize,
}

impl Default for PeaksOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            cutoff_score: 99,
            local_cutoff_score: 90,
            min_length_patch: 3,
        }
    }
}

struct Columns {
    peptide: usize,
    alc: usize,
    local_confidence: usize,
}

impl Columns {
    // old and new PEAKS exports order their columns differently, the names are stable
    fn from_headers(headers: &ByteRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| {
                    String::from_utf8_lossy(h)
                        .trim()
                        .to_lowercase()
                        .starts_with(name)
                })
                .ok_or_else(|| anyhow!("PEAKS file has no '{name}' column"))
        };
        Ok(Self {
            peptide: find("peptide")?,
            alc: find("alc")?,
            local_confidence: find("local confidence")?,
        })
    }
}

#[derive(Debug)]
struct ScoredPeptide {
    /// Residues only, modifications such as `(+15.99)` removed.
    sequence: Vec<u8>,
    score: u32,
    local: Vec<u32>,
}

fn field<'r>(record: &'r ByteRecord, index: usize) -> Result<&'r str> {
    let bytes = record
        .get(index)
        .ok_or_else(|| anyhow!("missing column {}", index + 1))?;
    Ok(std::str::from_utf8(bytes)?.trim())
}

impl ScoredPeptide {
    fn from_record(record: &ByteRecord, columns: &Columns) -> Result<Self> {
        let sequence: Vec<u8> = field(record, columns.peptide)?
            .bytes()
            .filter(u8::is_ascii_uppercase)
            .collect();
        let score = field(record, columns.alc)?.parse()?;
        let local = field(record, columns.local_confidence)?
            .split_ascii_whitespace()
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()?;

        if local.len() != sequence.len() {
            bail!(
                "{} local confidence scores for a peptide of {} residues",
                local.len(),
                sequence.len()
            );
        }
        Ok(Self {
            sequence,
            score,
            local,
        })
    }

    /// Runs of residues scoring at least `cutoff`, keeping those of `min_length` or more.
    fn patches(&self, cutoff: u32, min_length: usize) -> Vec<&[u8]> {
        let mut patches = Vec::new();
        let mut start = None;
        for i in 0..=self.local.len() {
            let confident = self.local.get(i).is_some_and(|&s| s >= cutoff);
            match (start, confident) {
                (None, true) => start = Some(i),
                (Some(from), false) => {
                    if i - from >= min_length {
                        patches.push(&self.sequence[from..i]);
                    }
                    start = None;
                }
                _ => {}
            }
        }
        patches
    }
}

/// Read peptides from a PEAKS de novo CSV export.
///
/// Peptides at or above the ALC cutoff are kept whole, once per distinct
/// sequence. From the others only the high confidence patches are kept.
/// Rows that cannot be parsed are logged and skipped.
pub fn parse_peaks_reads<R: Read>(reader: R, options: &PeaksOptions) -> Result<Vec<Vec<u8>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.separator)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::from_headers(rdr.byte_headers()?)?;

    let mut reads = Vec::new();
    let mut seen = HashSet::new();
    let (mut whole, mut patched, mut skipped) = (0, 0, 0);
    for (row, record) in rdr.byte_records().enumerate() {
        let record = record?;
        let peptide = match ScoredPeptide::from_record(&record, &columns) {
            Ok(peptide) if !peptide.sequence.is_empty() => peptide,
            Ok(_) => {
                log::warn!("Skipping PEAKS line {}: empty peptide", row + 2);
                skipped += 1;
                continue;
            }
            Err(e) => {
                log::warn!("Skipping PEAKS line {}: {e}", row + 2);
                skipped += 1;
                continue;
            }
        };

        if peptide.score >= options.cutoff_score {
            if seen.insert(peptide.sequence.clone()) {
                reads.push(peptide.sequence);
                whole += 1;
            }
        } else {
            let patches = peptide.patches(options.local_cutoff_score, options.min_length_patch);
            patched += patches.len();
            reads.extend(patches.into_iter().map(<[u8]>::to_vec));
        }
    }
    log::debug!("PEAKS reads: {whole} whole peptides, {patched} patches, {skipped} rows skipped");
    Ok(reads)
}
