//! The tool registry: five named operations with typed contracts.
//!
//! Dispatch is a `match` over [`ToolKind`] so `allowed_tools` checks stay
//! exhaustive; an input that fails validation becomes a structured error
//! output, never an `Err`, which is what lets the executor keep the
//! transcript consistent and continue.

mod availability;
mod follow_up;
mod lead;
mod pricing;
mod service_link;

use crate::Business;
use llm::Tool;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use store::{LinkIssuer, Store};

/// The closed set of tool identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    CheckAvailability,
    GetPricingInfo,
    GenerateServiceLink,
    UpdateLeadInformation,
    CreateFollowUpTask,
}

impl ToolKind {
    /// All tools, in registry order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::CheckAvailability,
        ToolKind::GetPricingInfo,
        ToolKind::GenerateServiceLink,
        ToolKind::UpdateLeadInformation,
        ToolKind::CreateFollowUpTask,
    ];

    /// The wire name the model calls this tool by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckAvailability => "check_availability",
            Self::GetPricingInfo => "get_pricing_info",
            Self::GenerateServiceLink => "generate_service_link",
            Self::UpdateLeadInformation => "update_lead_information",
            Self::CreateFollowUpTask => "create_follow_up_task",
        }
    }

    /// Resolve a wire name back to a tool kind.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn description(&self) -> &'static str {
        match self {
            Self::CheckAvailability => {
                "Check if a specific date is available for booking. Returns availability \
                 status and suggests alternative dates if needed."
            }
            Self::GetPricingInfo => {
                "Get pricing information and package details for different event types."
            }
            Self::GenerateServiceLink => {
                "Generate a personalized service selection link for a customer to view \
                 packages and book. Use when the customer is ready to see pricing or book."
            }
            Self::UpdateLeadInformation => {
                "Update customer contact information with details learned during the \
                 conversation."
            }
            Self::CreateFollowUpTask => {
                "Create a follow-up task when the customer needs personal attention from staff."
            }
        }
    }

    /// The tool schema offered to the model.
    pub fn spec(&self) -> Tool {
        let parameters = match self {
            Self::CheckAvailability => schemars::schema_for!(availability::Input),
            Self::GetPricingInfo => schemars::schema_for!(pricing::Input),
            Self::GenerateServiceLink => schemars::schema_for!(service_link::Input),
            Self::UpdateLeadInformation => schemars::schema_for!(lead::Input),
            Self::CreateFollowUpTask => schemars::schema_for!(follow_up::Input),
        };
        Tool {
            name: self.name().into(),
            description: self.description().into(),
            parameters,
            strict: false,
        }
    }
}

/// The tool registry bound to its external collaborators.
#[derive(Clone)]
pub struct Tools {
    store: Arc<dyn Store>,
    links: Arc<dyn LinkIssuer>,
    business: Business,
}

impl Tools {
    /// Bind the registry to a store, a link issuer, and the business.
    pub fn new(store: Arc<dyn Store>, links: Arc<dyn LinkIssuer>, business: Business) -> Self {
        Self {
            store,
            links,
            business,
        }
    }

    /// Schemas for the given subset of tools, in the given order.
    pub fn specs(&self, kinds: &[ToolKind]) -> Vec<Tool> {
        kinds.iter().map(ToolKind::spec).collect()
    }

    /// Execute one tool call.
    ///
    /// Always returns a JSON value: validation and I/O failures come back
    /// as structured error payloads for the transcript.
    pub async fn dispatch(&self, kind: ToolKind, arguments: &str) -> Value {
        match kind {
            ToolKind::CheckAvailability => match parse(kind, arguments) {
                Ok(input) => {
                    availability::run(self.store.as_ref(), &self.business, input).await
                }
                Err(error) => error,
            },
            ToolKind::GetPricingInfo => match parse(kind, arguments) {
                Ok(input) => pricing::run(input),
                Err(error) => error,
            },
            ToolKind::GenerateServiceLink => match parse(kind, arguments) {
                Ok(input) => {
                    service_link::run(
                        self.store.as_ref(),
                        self.links.as_ref(),
                        &self.business,
                        input,
                    )
                    .await
                }
                Err(error) => error,
            },
            ToolKind::UpdateLeadInformation => match parse(kind, arguments) {
                Ok(input) => lead::run(self.store.as_ref(), input).await,
                Err(error) => error,
            },
            ToolKind::CreateFollowUpTask => match parse(kind, arguments) {
                Ok(input) => follow_up::run(self.store.as_ref(), input).await,
                Err(error) => error,
            },
        }
    }
}

/// Bind raw call arguments against a tool's input type.
fn parse<T: DeserializeOwned>(kind: ToolKind, arguments: &str) -> Result<T, Value> {
    // Models occasionally send no arguments for all-optional inputs.
    let raw = if arguments.trim().is_empty() {
        "{}"
    } else {
        arguments
    };
    serde_json::from_str(raw).map_err(|err| {
        tracing::warn!(tool = kind.name(), error = %err, "tool input failed validation");
        json!({
            "success": false,
            "error": format!("invalid input for {}: {err}", kind.name()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{InMemoryStore, StaticLinkIssuer};

    fn tools() -> Tools {
        Tools::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(StaticLinkIssuer::new("https://encoredj.example")),
            Business::default(),
        )
    }

    #[test]
    fn wire_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("delete_everything"), None);
    }

    #[test]
    fn specs_preserve_subset_and_order() {
        let tools = tools();
        let specs = tools.specs(&[ToolKind::GetPricingInfo, ToolKind::CheckAvailability]);
        let names: Vec<_> = specs.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["get_pricing_info", "check_availability"]);
    }

    #[tokio::test]
    async fn malformed_arguments_become_structured_errors() {
        let output = tools()
            .dispatch(ToolKind::CheckAvailability, "this is not json")
            .await;
        assert_eq!(output["success"], false);
        assert!(
            output["error"]
                .as_str()
                .unwrap()
                .contains("check_availability")
        );
    }

    #[tokio::test]
    async fn malformed_date_becomes_structured_error() {
        let output = tools()
            .dispatch(
                ToolKind::CheckAvailability,
                r#"{"event_date":"June 15th","event_type":"wedding"}"#,
            )
            .await;
        assert_eq!(output["success"], false);
    }

    #[tokio::test]
    async fn empty_arguments_parse_as_empty_object() {
        // get_pricing_info requires event_type, so this still fails
        // validation, but as a structured error rather than a crash.
        let output = tools().dispatch(ToolKind::GetPricingInfo, "  ").await;
        assert_eq!(output["success"], false);
    }
}
