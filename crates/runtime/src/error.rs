//! Typed failure taxonomy.
//!
//! Only [`ClassifyError`] and [`ExecuteError`] reach the workflow's
//! fallback boundary. Tool failures are data (structured tool outputs),
//! and audit failures are swallowed by the sink.

use thiserror::Error;

/// The classifier produced no usable category.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The underlying completion call failed.
    #[error("classification call failed: {0}")]
    Model(#[from] anyhow::Error),

    /// The completion call exceeded its time budget.
    #[error("classification call timed out")]
    Timeout,

    /// The reply carried no parseable classification payload.
    #[error("classifier returned no parseable category: {raw}")]
    Unparseable { raw: String },
}

/// The specialist run failed to produce a reply.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A generation call failed.
    #[error("generation call failed: {0}")]
    Model(#[from] anyhow::Error),

    /// A generation call exceeded its time budget.
    #[error("generation call timed out")]
    Timeout,

    /// The model kept requesting tools past the round cap.
    #[error("tool-call rounds exceeded cap of {cap}")]
    TooManyRounds { cap: usize },

    /// The model returned a final answer with no text.
    #[error("generation returned an empty reply")]
    EmptyReply,
}

/// A failure that escapes to the workflow's fallback boundary.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("agent execution failed: {0}")]
    Execute(#[from] ExecuteError),
}
