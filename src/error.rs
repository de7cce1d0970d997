use std::collections::TryReserveError;

/// Failure that aborts a whole preparation call.
///
/// Lookup failures never end up here; they are logged and replaced by
/// fallback data.
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error("Failed to grow {stage} scratch storage: {source}")]
    ScratchAllocation {
        stage: &'static str,
        #[source]
        source: TryReserveError,
    },
}

impl PrepareError {
    pub(crate) fn scratch(stage: &'static str, source: TryReserveError) -> Self {
        Self::ScratchAllocation { stage, source }
    }
}
