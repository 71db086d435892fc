/// Which window starts are emitted for a read longer than the chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowPolicy {
    /// Starts `0..len - k`, leaving out the window ending on the last symbol.
    #[default]
    SkipFinal,
    /// Every start in `0..=len - k`.
    IncludeFinal,
}

/// Chunks produced from a batch of reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunks<'a> {
    pub chunks: Vec<&'a [u8]>,
    /// Indices of reads that were shorter than the chunk length.
    pub short_reads: Vec<usize>,
}

/// Slide a `chunk_length` window over one read.
///
/// A read exactly `chunk_length` long is its own single chunk; a shorter read
/// yields nothing.
pub fn chunk_read(read: &[u8], chunk_length: usize, policy: WindowPolicy) -> Vec<&[u8]> {
    use std::cmp::Ordering;

    match read.len().cmp(&chunk_length) {
        Ordering::Less => Vec::new(),
        Ordering::Equal => vec![read],
        Ordering::Greater => {
            let starts = match policy {
                WindowPolicy::SkipFinal => read.len() - chunk_length,
                WindowPolicy::IncludeFinal => read.len() - chunk_length + 1,
            };
            (0..starts).map(|i| &read[i..i + chunk_length]).collect()
        }
    }
}

/// Chunk every read in order, remembering which ones were too short.
pub fn chunk_reads<'a, R: AsRef<[u8]>>(
    reads: &'a [R],
    chunk_length: usize,
    policy: WindowPolicy,
) -> Chunks<'a> {
    let mut out = Chunks::default();
    for (index, read) in reads.iter().enumerate() {
        let read = read.as_ref();
        if read.len() < chunk_length {
            log::debug!(
                "Read #{index} is not long enough ({} < {chunk_length}): {}",
                read.len(),
                String::from_utf8_lossy(read)
            );
            out.short_reads.push(index);
            continue;
        }
        out.chunks.extend(chunk_read(read, chunk_length, policy));
    }
    out
}
