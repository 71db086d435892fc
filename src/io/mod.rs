pub mod peaks;
pub mod reads;

pub use peaks::PeaksOptions;
pub use reads::{load_reads, load_reads_with, ReadFormat};
