use thiserror::Error;

/// Caller-input contract violations rejected by [`crate::assembly::assemble`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("read #{index} is empty")]
    EmptyRead { index: usize },

    // keys are chunk_length - 1 symbols long and the walk appends their last symbol
    #[error("chunk length must be at least 2, got {chunk_length}")]
    ChunkLengthTooShort { chunk_length: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AssemblyError::EmptyRead { index: 3 }.to_string(),
            "read #3 is empty"
        );
        assert_eq!(
            AssemblyError::ChunkLengthTooShort { chunk_length: 1 }.to_string(),
            "chunk length must be at least 2, got 1"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            crate::assembly::reconstruct(&[""], 5)?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert_eq!(
            err.downcast_ref::<AssemblyError>(),
            Some(&AssemblyError::EmptyRead { index: 0 })
        );
    }
}
