// The read direction cannot be recovered from the data, so both are tried.
// This is a plain reversal, not a complement.

/// Whether reversed chunks are added next to the forward ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Both,
    ForwardOnly,
}

impl Orientation {
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Both => "both",
            Orientation::ForwardOnly => "forward",
        }
    }
}

pub fn reversed(chunk: &[u8]) -> Vec<u8> {
    chunk.iter().rev().copied().collect()
}

/// Each chunk followed by its reversal, forward first.
pub fn expand<C: AsRef<[u8]>>(chunks: &[C], orientation: Orientation) -> Vec<Vec<u8>> {
    let per_chunk = match orientation {
        Orientation::Both => 2,
        Orientation::ForwardOnly => 1,
    };
    let mut expanded = Vec::with_capacity(chunks.len() * per_chunk);
    for chunk in chunks {
        let chunk = chunk.as_ref();
        expanded.push(chunk.to_vec());
        if orientation == Orientation::Both {
            expanded.push(reversed(chunk));
        }
    }
    expanded
}
