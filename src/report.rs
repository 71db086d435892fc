use crate::assembly::traverse::Walk;
use crate::assembly::{Assembly, AssemblyStats};
use anyhow::{Context, Result};
use bio::io::fasta;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

/// How the assembled sequences are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceFormat {
    Lines,
    Csv,
    Fasta,
}

impl SequenceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("csv") => SequenceFormat::Csv,
            Some("fa") | Some("fasta") => SequenceFormat::Fasta,
            _ => SequenceFormat::Lines,
        }
    }
}

/// Keep the first walk for each distinct sequence.
pub fn unique_walks(walks: &[Walk]) -> Vec<&Walk> {
    let mut seen = HashSet::new();
    walks
        .iter()
        .filter(|&w| seen.insert(w.sequence.as_slice()))
        .collect()
}

/// The walks of one run that go into the output.
#[derive(Debug)]
pub struct RunOutput<'a> {
    pub assembly: &'a Assembly,
    pub walks: Vec<&'a Walk>,
}

impl<'a> RunOutput<'a> {
    pub fn new(assembly: &'a Assembly, unique: bool) -> Self {
        let walks = if unique {
            unique_walks(&assembly.walks)
        } else {
            assembly.walks.iter().collect()
        };
        Self { assembly, walks }
    }

    fn k(&self) -> usize {
        self.assembly.config.chunk_length
    }

    fn orientation(&self) -> &'static str {
        self.assembly.config.orientation.name()
    }
}

/// Write the walks of every run, in run order. Lines output carries only
/// the sequences; CSV and FASTA output tag each one with its run.
pub fn write_sequences<W: Write>(
    writer: W,
    runs: &[RunOutput],
    format: SequenceFormat,
) -> Result<()> {
    match format {
        SequenceFormat::Lines => write_lines(writer, runs),
        SequenceFormat::Csv => write_sequence_csv(writer, runs),
        SequenceFormat::Fasta => write_fasta(writer, runs),
    }
}

pub fn write_sequences_to_path(path: &Path, runs: &[RunOutput]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Error creating output file '{}'", path.display()))?;
    write_sequences(
        std::io::BufWriter::new(file),
        runs,
        SequenceFormat::from_path(path),
    )
}

fn write_lines<W: Write>(mut writer: W, runs: &[RunOutput]) -> Result<()> {
    for walk in runs.iter().flat_map(|run| &run.walks) {
        writer.write_all(&walk.sequence)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn write_sequence_csv<W: Write>(writer: W, runs: &[RunOutput]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "k",
        "orientation",
        "index",
        "start_key",
        "steps",
        "length",
        "sequence",
    ])?;
    let mut index = 0;
    for run in runs {
        let graph = &run.assembly.graph;
        for walk in &run.walks {
            let start_key = graph
                .vertex(walk.start)
                .map(|v| String::from_utf8_lossy(&v.key).into_owned())
                .unwrap_or_default();
            writer.write_record(&[
                run.k().to_string(),
                run.orientation().to_string(),
                index.to_string(),
                start_key,
                walk.steps.to_string(),
                walk.sequence.len().to_string(),
                String::from_utf8_lossy(&walk.sequence).into_owned(),
            ])?;
            index += 1;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_fasta<W: Write>(writer: W, runs: &[RunOutput]) -> Result<()> {
    let mut writer = fasta::Writer::new(writer);
    let mut index = 0;
    for run in runs {
        for walk in &run.walks {
            let desc = format!(
                "k={} orientation={} start={} steps={}",
                run.k(),
                run.orientation(),
                walk.start,
                walk.steps
            );
            let id = format!("seq_{index}");
            writer.write(&id, Some(desc.as_str()), &walk.sequence)?;
            index += 1;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Dump every vertex of every run with its multiplicity and the keys its
/// edges point at. Vertex indices restart with each run.
pub fn write_graph_csv<W: Write>(writer: W, assemblies: &[Assembly]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "k",
        "orientation",
        "index",
        "key",
        "multiplicity",
        "out_degree",
        "targets",
    ])?;
    for assembly in assemblies {
        let graph = &assembly.graph;
        for (i, vertex) in graph.vertices().iter().enumerate() {
            let targets = vertex
                .edges
                .iter()
                .filter_map(|&t| graph.vertex(t))
                .map(|t| String::from_utf8_lossy(&t.key).into_owned())
                .collect::<Vec<_>>()
                .join(";");
            writer.write_record(&[
                assembly.config.chunk_length.to_string(),
                assembly.config.orientation.name().to_string(),
                i.to_string(),
                String::from_utf8_lossy(&vertex.key).into_owned(),
                vertex.multiplicity.to_string(),
                vertex.edges.len().to_string(),
                targets,
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_graph_to_path(path: &Path, assemblies: &[Assembly]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Error creating output file '{}'", path.display()))?;
    write_graph_csv(file, assemblies)
}

pub fn log_summary(stats: &AssemblyStats) {
    log::info!("Number of reads: {} ({} too short)", stats.reads, stats.short_reads);
    log::info!(
        "Number of chunks: {} ({} with reversals)",
        stats.chunks,
        stats.expanded_chunks
    );
    log::info!(
        "Number of overlaps: {} raw, {} distinct",
        stats.raw_keys,
        stats.vertices
    );
    log::info!(
        "Built graph with {} edges in {:.2?}",
        stats.edges,
        stats.graph_time
    );
    log::info!(
        "Found {} sequences in {:.2?}",
        stats.sequences,
        stats.traversal_time
    );
}
