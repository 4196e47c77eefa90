//! Tour failure kinds.

use compact_str::CompactString;
use thiserror::Error;

/// Why a tour produced no itinerary.
#[derive(Debug, Error)]
pub enum TourError {
    /// The execution reached `failed`; carries the platform's error text.
    #[error("{0}")]
    Failed(String),

    /// The execution did not reach a terminal status within the poll budget.
    #[error("execution {id} did not finish after {attempts} status checks")]
    Timeout { id: CompactString, attempts: u32 },

    /// The execution succeeded but produced no itinerary text.
    #[error("execution {0} succeeded without any output")]
    EmptyOutput(CompactString),

    /// The execution succeeded with output of an unexpected shape.
    #[error("execution {id} returned unexpected output: {output}")]
    MalformedOutput { id: CompactString, output: String },

    /// Submitting or polling the execution failed.
    #[error("{0:#}")]
    Transport(#[from] anyhow::Error),
}
