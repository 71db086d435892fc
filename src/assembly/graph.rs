use std::collections::HashMap;

/// A distinct `(k - 1)`-symbol key in the overlap graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphVertex {
    pub key: Vec<u8>,
    /// Number of chunks whose prefix or suffix is this key, counted once per chunk.
    pub multiplicity: usize,
    /// Target vertex indices, one entry per chunk from this prefix; parallel edges and self-loops kept.
    pub edges: Vec<usize>,
}

impl GraphVertex {
    fn new(key: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            multiplicity: 0,
            edges: Vec::new(),
        }
    }

    pub fn last_symbol(&self) -> Option<u8> {
        self.key.last().copied()
    }
}

/// Overlap graph over chunk prefixes and suffixes.
///
/// Vertices are stored in the order their key was first seen (chunk by chunk,
/// prefix before suffix), which fixes the order the traverser tries starts in.
/// The structure is not changed after [`OverlapGraph::build`].
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    vertices: Vec<GraphVertex>,
    index: HashMap<Vec<u8>, usize>,
    chunk_length: usize,
}

impl OverlapGraph {
    /// Build the graph from orientation-expanded chunks of length `chunk_length`.
    ///
    /// Chunks of any other length are a caller bug and are skipped with a warning.
    pub fn build<C: AsRef<[u8]>>(chunks: &[C], chunk_length: usize) -> Self {
        let mut graph = Self {
            vertices: Vec::new(),
            index: HashMap::new(),
            chunk_length,
        };

        for chunk in chunks {
            let chunk = chunk.as_ref();
            if chunk.len() != chunk_length || chunk_length < 2 {
                log::warn!(
                    "Skipping chunk of length {} (expected {chunk_length}): {}",
                    chunk.len(),
                    String::from_utf8_lossy(chunk)
                );
                continue;
            }
            let prefix = graph.vertex_for(&chunk[..chunk_length - 1]);
            let suffix = graph.vertex_for(&chunk[1..]);

            graph.vertices[prefix].multiplicity += 1;
            if suffix != prefix {
                graph.vertices[suffix].multiplicity += 1;
            }
            graph.vertices[prefix].edges.push(suffix);
        }

        graph
    }

    /// Index of the vertex for `key`, creating it at the end if unseen.
    fn vertex_for(&mut self, key: &[u8]) -> usize {
        if let Some(&i) = self.index.get(key) {
            return i;
        }
        let i = self.vertices.len();
        self.vertices.push(GraphVertex::new(key));
        self.index.insert(key.to_vec(), i);
        i
    }

    pub fn chunk_length(&self) -> usize {
        self.chunk_length
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<&GraphVertex> {
        self.vertices.get(index)
    }

    pub fn vertices(&self) -> &[GraphVertex] {
        &self.vertices
    }

    pub fn index_of(&self, key: &[u8]) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// One edge per chunk that went into the graph.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum()
    }

    pub fn total_multiplicity(&self) -> usize {
        self.vertices.iter().map(|v| v.multiplicity).sum()
    }
}
