//! Rebuilds sequences from short overlapping reads.
//!
//! Reads are cut into fixed-length chunks, each chunk is also taken reversed,
//! and the chunks are wired into an overlap graph keyed on their
//! `(chunk_length - 1)`-symbol prefixes and suffixes. A greedy walk over that
//! graph, spending vertex multiplicity as it goes, produces the sequences.
//!
//! ```
//! let sequences = seqstitch::reconstruct(&["AAAAA"], 5).unwrap();
//! assert_eq!(sequences, vec![b"AAAAAA".to_vec()]);
//! ```

pub mod assembly;
pub mod cli;
pub mod error;
pub mod io;
pub mod report;


pub use assembly::{assemble, reconstruct, Assembly, AssemblyConfig, AssemblyStats};
pub use error::AssemblyError;
