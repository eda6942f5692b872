//! Generation parameters for a completion call.

use serde::{Deserialize, Serialize};

/// Sampling and budget parameters applied to one completion call.
///
/// Each agent profile carries its own copy; the classifier pins a
/// low-variance configuration so the same message classifies the same way.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    pub top_p: f32,

    /// Maximum tokens the model may produce.
    pub max_tokens: u32,

    /// Whether the provider may run requested tool calls in parallel.
    ///
    /// Always `false` here: several tools mutate the same contact row, so
    /// each result must be visible before the next call is decided.
    pub parallel_tool_calls: bool,
}

impl GenerationParams {
    /// Deterministic settings for classification-style calls.
    pub fn deterministic(max_tokens: u32) -> Self {
        Self {
            temperature: 0.3,
            top_p: 1.0,
            max_tokens,
            parallel_tool_calls: false,
        }
    }

    /// Conversational settings with the given temperature and budget.
    pub fn conversational(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            top_p: 1.0,
            max_tokens,
            parallel_tool_calls: false,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::conversational(0.7, 300)
    }
}
