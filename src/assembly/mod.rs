pub mod chunker;
pub mod graph;
pub mod orientation;
pub mod traverse;

use crate::error::AssemblyError;
use chunker::{chunk_reads, WindowPolicy};
use graph::OverlapGraph;
use orientation::{expand, Orientation};
use std::time::{Duration, Instant};
use traverse::{ExhaustedStart, Traverser, Walk};

pub const DEFAULT_CHUNK_LENGTH: usize = 5;

/// Parameters of one assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub chunk_length: usize,
    pub window: WindowPolicy,
    pub orientation: Orientation,
    pub exhausted_start: ExhaustedStart,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            chunk_length: DEFAULT_CHUNK_LENGTH,
            window: WindowPolicy::default(),
            orientation: Orientation::default(),
            exhausted_start: ExhaustedStart::default(),
        }
    }
}

impl AssemblyConfig {
    pub fn with_chunk_length(chunk_length: usize) -> Self {
        Self {
            chunk_length,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AssemblyError> {
        if self.chunk_length < 2 {
            return Err(AssemblyError::ChunkLengthTooShort {
                chunk_length: self.chunk_length,
            });
        }
        Ok(())
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    pub reads: usize,
    pub short_reads: usize,
    pub chunks: usize,
    pub expanded_chunks: usize,
    /// Prefix and suffix occurrences before deduplication, two per chunk.
    pub raw_keys: usize,
    pub vertices: usize,
    pub edges: usize,
    pub sequences: usize,
    pub graph_time: Duration,
    pub traversal_time: Duration,
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub config: AssemblyConfig,
    pub graph: OverlapGraph,
    pub walks: Vec<Walk>,
    pub stats: AssemblyStats,
}

impl Assembly {
    pub fn sequences(&self) -> impl Iterator<Item = &[u8]> {
        self.walks.iter().map(|w| w.sequence.as_slice())
    }

    pub fn into_sequences(self) -> Vec<Vec<u8>> {
        self.walks.into_iter().map(|w| w.sequence).collect()
    }
}

/// Chunk, orient, build the overlap graph and walk it.
///
/// Every read must be non-empty. An empty read list is fine and gives an
/// empty graph and no sequences.
pub fn assemble<R: AsRef<[u8]>>(
    reads: &[R],
    config: &AssemblyConfig,
) -> Result<Assembly, AssemblyError> {
    config.validate()?;
    if let Some(index) = reads.iter().position(|r| r.as_ref().is_empty()) {
        return Err(AssemblyError::EmptyRead { index });
    }

    let timer = Instant::now();
    let chunked = chunk_reads(reads, config.chunk_length, config.window);
    let chunks = expand(&chunked.chunks, config.orientation);
    let graph = OverlapGraph::build(&chunks, config.chunk_length);
    let graph_time = timer.elapsed();

    let timer = Instant::now();
    let walks = Traverser::new(&graph, config.exhausted_start).run();
    let traversal_time = timer.elapsed();

    let stats = AssemblyStats {
        reads: reads.len(),
        short_reads: chunked.short_reads.len(),
        chunks: chunked.chunks.len(),
        expanded_chunks: chunks.len(),
        raw_keys: chunks.len() * 2,
        vertices: graph.len(),
        edges: graph.edge_count(),
        sequences: walks.len(),
        graph_time,
        traversal_time,
    };

    Ok(Assembly {
        config: *config,
        graph,
        walks,
        stats,
    })
}

/// Reads in, sequences out, with every other setting at its default.
pub fn reconstruct<R: AsRef<[u8]>>(
    reads: &[R],
    chunk_length: usize,
) -> Result<Vec<Vec<u8>>, AssemblyError> {
    assemble(reads, &AssemblyConfig::with_chunk_length(chunk_length))
        .map(Assembly::into_sequences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssemblyConfig::default();
        assert_eq!(config.chunk_length, 5);
        assert_eq!(config.window, WindowPolicy::SkipFinal);
        assert_eq!(config.orientation, Orientation::Both);
        assert_eq!(config.exhausted_start, ExhaustedStart::Stop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_chunk_length() {
        for k in [0, 1] {
            let err = reconstruct(&["ABCDE"], k).unwrap_err();
            assert_eq!(err, AssemblyError::ChunkLengthTooShort { chunk_length: k });
        }
    }

    #[test]
    fn test_rejects_empty_read() {
        let err = reconstruct(&["ABCDE", "", "FGHIK"], 5).unwrap_err();
        assert_eq!(err, AssemblyError::EmptyRead { index: 1 });
    }

    #[test]
    fn test_empty_reads_give_empty_output() {
        let reads: Vec<String> = Vec::new();
        let assembly = assemble(&reads, &AssemblyConfig::default()).unwrap();
        assert!(assembly.graph.is_empty());
        assert!(assembly.walks.is_empty());
        assert_eq!(
            assembly.stats,
            AssemblyStats {
                graph_time: assembly.stats.graph_time,
                traversal_time: assembly.stats.traversal_time,
                ..AssemblyStats::default()
            }
        );
    }

    #[test]
    fn test_stats() {
        let reads = ["ABCDEFG", "AB", "KLMNP"];
        let assembly = assemble(&reads, &AssemblyConfig::default()).unwrap();
        let stats = &assembly.stats;
        assert_eq!(stats.reads, 3);
        assert_eq!(stats.short_reads, 1);
        assert_eq!(stats.chunks, 3);
        assert_eq!(stats.expanded_chunks, 6);
        assert_eq!(stats.raw_keys, 12);
        assert_eq!(stats.edges, 6);
        assert_eq!(stats.vertices, assembly.graph.len());
        assert_eq!(stats.sequences, assembly.walks.len());
    }

    #[test]
    fn test_assembly_keeps_its_config() {
        let config = AssemblyConfig {
            orientation: Orientation::ForwardOnly,
            ..AssemblyConfig::with_chunk_length(4)
        };
        let assembly = assemble(&["ABCDEFG"], &config).unwrap();
        assert_eq!(assembly.config, config);
    }

    #[test]
    fn test_sequences_view_matches_walks() {
        let assembly = assemble(&["AAAAA"], &AssemblyConfig::default()).unwrap();
        let seqs: Vec<&[u8]> = assembly.sequences().collect();
        assert_eq!(seqs, vec![b"AAAAAA".as_slice()]);
    }
}
