//! SMS inquiry routing core.
//!
//! One inbound message flows through classification, profile routing, a
//! bounded tool-execution loop, and a best-effort audit write:
//!
//! ```text
//! SmsRequest -> classify -> route -> execute (tool rounds) -> reply
//!                                                  \-> audit row (best effort)
//! ```
//!
//! Only classification and execution failures escape to the caller, and
//! even those are translated into a fixed, reassuring fallback reply by
//! [`Workflow::handle`]. Tool failures degrade in place as structured
//! tool outputs; audit failures are logged and dropped.

mod business;
mod classify;
mod error;
mod executor;
mod intent;
mod profile;
mod sink;
mod tools;
mod transcript;
mod workflow;

pub use business::Business;
pub use classify::classify;
pub use error::{ClassifyError, ExecuteError, WorkflowError};
pub use executor::MAX_TOOL_ROUNDS;
pub use intent::{Classification, Intent};
pub use profile::{AgentProfile, Profiles};
pub use tools::{ToolKind, Tools};
pub use transcript::Transcript;
pub use workflow::{SmsRequest, SmsResponse, Workflow};
