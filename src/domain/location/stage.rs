use serde::Serialize;

use crate::domain::error::{AppError, Result};

/// Pipeline stage as observed by the driver.
///
/// `Idle -> Decoding -> Validated -> Loading -> Completed`, or
/// `Decoding -> Failed`. There is no retry edge; a new run starts at `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ImportStage {
    Idle,
    Decoding,
    Validated { accepted: usize, rejected: usize },
    Loading,
    Completed,
    Failed { reason: String },
}

impl ImportStage {
    pub fn name(&self) -> &'static str {
        match self {
            ImportStage::Idle => "idle",
            ImportStage::Decoding => "decoding",
            ImportStage::Validated { .. } => "validated",
            ImportStage::Loading => "loading",
            ImportStage::Completed => "completed",
            ImportStage::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStage::Completed | ImportStage::Failed { .. })
    }

    pub fn advance(self, next: ImportStage) -> Result<ImportStage> {
        use ImportStage::*;

        let allowed = matches!(
            (&self, &next),
            (Idle, Decoding)
                | (Decoding, Validated { .. })
                | (Decoding, Failed { .. })
                | (Validated { .. }, Loading)
                | (Loading, Completed)
        );

        if allowed {
            Ok(next)
        } else {
            Err(AppError::Internal(format!(
                "Illegal import stage transition: {} -> {}",
                self.name(),
                next.name()
            )))
        }
    }
}
