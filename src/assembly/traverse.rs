use super::graph::OverlapGraph;

/// What the outer loop does on reaching a start vertex with nothing left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustedStart {
    /// Abandon all remaining start vertices.
    #[default]
    Stop,
    /// Move on to the next start vertex.
    Skip,
}

/// One greedy walk and the sequence it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub start: usize,
    /// Multiplicity units consumed, equal to the symbols appended after the seed.
    pub steps: usize,
    pub sequence: Vec<u8>,
}

/// A single traversal pass over an [`OverlapGraph`].
///
/// The pass owns its own copy of the vertex multiplicities and only ever
/// decreases them, so the graph itself stays untouched and can be walked
/// again by a fresh `Traverser`.
#[derive(Debug)]
pub struct Traverser<'g> {
    graph: &'g OverlapGraph,
    remaining: Vec<usize>,
    on_exhausted: ExhaustedStart,
}

impl<'g> Traverser<'g> {
    pub fn new(graph: &'g OverlapGraph, on_exhausted: ExhaustedStart) -> Self {
        Self {
            graph,
            remaining: graph.vertices().iter().map(|v| v.multiplicity).collect(),
            on_exhausted,
        }
    }

    pub fn remaining(&self, vertex: usize) -> Option<usize> {
        self.remaining.get(vertex).copied()
    }

    /// Try every vertex as a start in construction order.
    pub fn run(mut self) -> Vec<Walk> {
        let mut walks = Vec::new();
        for start in 0..self.graph.len() {
            if self.remaining[start] == 0 {
                match self.on_exhausted {
                    ExhaustedStart::Stop => break,
                    ExhaustedStart::Skip => continue,
                }
            }
            walks.push(self.walk_from(start));
        }
        walks
    }

    /// Seed with the start key, then append the current vertex's last symbol
    /// and follow its first edge until multiplicity or edges run out.
    fn walk_from(&mut self, start: usize) -> Walk {
        let vertices = self.graph.vertices();
        let mut sequence = vertices[start].key.clone();
        let mut steps = 0;
        let mut current = start;

        while self.remaining[current] > 0 {
            let vertex = &vertices[current];
            sequence.extend(vertex.last_symbol());
            self.remaining[current] -= 1;
            steps += 1;
            match vertex.edges.first() {
                Some(&next) => current = next,
                None => break,
            }
        }

        Walk {
            start,
            steps,
            sequence,
        }
    }
}
