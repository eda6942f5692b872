//! Specialist agent profiles and the intent router.

use crate::{Business, Classification, Intent, ToolKind};
use llm::GenerationParams;

/// One specialist: instructions, permitted tools, generation parameters.
///
/// Profiles are built once at start-up and read-only afterwards; nothing
/// mutates them at request time.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    /// Display name recorded in the audit row and the response.
    pub name: &'static str,
    /// The specialist's policy text, sent as the system message.
    pub instructions: String,
    /// The only tools the executor will dispatch for this profile.
    pub tools: &'static [ToolKind],
    /// Sampling parameters for this specialist's completions.
    pub params: GenerationParams,
}

/// The static profile table: one specialist per intent.
#[derive(Debug, Clone)]
pub struct Profiles {
    availability: AgentProfile,
    pricing: AgentProfile,
    booking: AgentProfile,
    information: AgentProfile,
    returning: AgentProfile,
}

impl Profiles {
    /// Build the profile table for the given business.
    pub fn new(business: &Business) -> Self {
        Self {
            availability: availability(business),
            pricing: pricing(business),
            booking: booking(business),
            information: information(business),
            returning: returning(business),
        }
    }

    /// Resolve the profile for an intent. Total: every intent routes.
    pub fn for_intent(&self, intent: Intent) -> &AgentProfile {
        match intent {
            Intent::CheckAvailability => &self.availability,
            Intent::GetPricing => &self.pricing,
            Intent::BookService => &self.booking,
            Intent::GeneralQuestion => &self.information,
            Intent::ExistingCustomer => &self.returning,
        }
    }

    /// Resolve a profile from an optional classification.
    ///
    /// A missing classification routes to the information specialist, so
    /// routing can never fail to produce a profile.
    pub fn route(&self, classification: Option<&Classification>) -> &AgentProfile {
        match classification {
            Some(c) => self.for_intent(c.classification),
            None => &self.information,
        }
    }

    /// All profiles, for diagnostics and tests.
    pub fn all(&self) -> [&AgentProfile; 5] {
        [
            &self.availability,
            &self.pricing,
            &self.booking,
            &self.information,
            &self.returning,
        ]
    }
}

fn availability(business: &Business) -> AgentProfile {
    AgentProfile {
        name: "Availability Specialist",
        instructions: format!(
            "You are the Availability Specialist for {name} in {city}.\n\
             \n\
             Your role:\n\
             1. Help customers check whether their preferred date is open.\n\
             2. Ask for event date and type if not provided.\n\
             3. Always verify dates with the check_availability tool before confirming.\n\
             4. If the date is booked, apologize and immediately offer the alternatives the tool returned.\n\
             5. Save details learned with update_lead_information.\n\
             \n\
             Be enthusiastic and professional; keep replies under 160 characters when possible, \
             and end by offering a personalized quote or the service selection link.",
            name = business.name,
            city = business.city,
        ),
        tools: &[
            ToolKind::CheckAvailability,
            ToolKind::UpdateLeadInformation,
            ToolKind::GenerateServiceLink,
        ],
        params: GenerationParams::conversational(0.7, 300),
    }
}

fn pricing(business: &Business) -> AgentProfile {
    AgentProfile {
        name: "Pricing Specialist",
        instructions: format!(
            "You are the Pricing Specialist for {name} in {city}.\n\
             \n\
             Your role:\n\
             1. Give clear, accurate pricing for different event types using the get_pricing_info tool.\n\
             2. Ask about duration, guest count, and special equipment needs.\n\
             3. Explain package options and add-ons, and note that final pricing depends on specific needs.\n\
             4. Save budget and preferences with update_lead_information.\n\
             5. Offer the personalized service selection link for exact pricing.\n\
             \n\
             Be transparent about pricing and emphasize experience (500+ events).",
            name = business.name,
            city = business.city,
        ),
        tools: &[
            ToolKind::GetPricingInfo,
            ToolKind::UpdateLeadInformation,
            ToolKind::GenerateServiceLink,
        ],
        params: GenerationParams::conversational(0.6, 350),
    }
}

fn booking(business: &Business) -> AgentProfile {
    AgentProfile {
        name: "Booking Specialist",
        instructions: format!(
            "You are the Booking Specialist for {name} in {city}.\n\
             \n\
             Your role:\n\
             1. Generate personalized service selection links with generate_service_link for customers ready to book.\n\
             2. Collect name, email, event date, and event type; phone number and event type are the minimum.\n\
             3. Explain what the link contains (packages, add-ons, secure booking) and the next steps.\n\
             4. Save everything collected with update_lead_information.\n\
             5. Mention that {owner} will follow up personally.\n\
             \n\
             Be excited and encouraging, and clear about next steps.",
            name = business.name,
            city = business.city,
            owner = business.owner,
        ),
        tools: &[
            ToolKind::GenerateServiceLink,
            ToolKind::UpdateLeadInformation,
            ToolKind::CheckAvailability,
            ToolKind::CreateFollowUpTask,
        ],
        params: GenerationParams::conversational(0.7, 300),
    }
}

fn information(business: &Business) -> AgentProfile {
    AgentProfile {
        name: "Information Specialist",
        instructions: format!(
            "You are the Information Specialist for {name}, owned by DJ {owner}, serving {city} \
             and surrounding areas with 500+ successful events.\n\
             \n\
             Equipment and services: professional sound systems for any venue size, premium \
             lighting, wireless microphones, photo booth add-on, backup equipment always on site, \
             and a 100,000+ song library across all genres.\n\
             \n\
             Process: inquiry, personalized quote, consultation, service selection, contract and \
             deposit, music planning, event day.\n\
             \n\
             Your role: answer questions about equipment, music, services, and process; save \
             details learned with update_lead_information; and always move the conversation \
             forward with a clear call to action (availability check, quote, or booking link).",
            name = business.name,
            owner = business.owner,
            city = business.city,
        ),
        tools: &[
            ToolKind::UpdateLeadInformation,
            ToolKind::GenerateServiceLink,
            ToolKind::CheckAvailability,
            ToolKind::CreateFollowUpTask,
        ],
        params: GenerationParams::conversational(0.7, 400),
    }
}

fn returning(business: &Business) -> AgentProfile {
    AgentProfile {
        name: "Customer Success Specialist",
        instructions: format!(
            "You are the Customer Success Specialist for {name} in {city}.\n\
             \n\
             Your role:\n\
             1. Handle follow-ups and existing-customer questions; acknowledge the existing relationship.\n\
             2. Reference their event details (date, type, venue) where known.\n\
             3. For quote or contract follow-ups, create a high-priority task with create_follow_up_task \
                and explain that {owner} will reach out.\n\
             4. Save any new details with update_lead_information.\n\
             \n\
             Be warm and familiar; they already know us.",
            name = business.name,
            city = business.city,
            owner = business.owner,
        ),
        tools: &[
            ToolKind::UpdateLeadInformation,
            ToolKind::CreateFollowUpTask,
            ToolKind::CheckAvailability,
            ToolKind::GenerateServiceLink,
        ],
        params: GenerationParams::conversational(0.8, 300),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_intent_routes_to_a_distinct_profile() {
        let profiles = Profiles::new(&Business::default());
        let mut names: Vec<_> = Intent::ALL
            .iter()
            .map(|i| profiles.for_intent(*i).name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn missing_classification_routes_to_information() {
        let profiles = Profiles::new(&Business::default());
        assert_eq!(profiles.route(None).name, "Information Specialist");
    }

    #[test]
    fn classification_routes_by_intent() {
        let profiles = Profiles::new(&Business::default());
        let classification = Classification {
            classification: Intent::ExistingCustomer,
            confidence: None,
            detected_intent: None,
        };
        assert_eq!(
            profiles.route(Some(&classification)).name,
            "Customer Success Specialist"
        );
    }

    #[test]
    fn no_profile_allows_every_tool() {
        let profiles = Profiles::new(&Business::default());
        for profile in profiles.all() {
            assert!(!profile.tools.is_empty());
            assert!(profile.tools.len() < ToolKind::ALL.len() + 1);
            assert!(!profile.params.parallel_tool_calls);
        }
    }

    #[test]
    fn pricing_specialist_cannot_touch_availability() {
        let profiles = Profiles::new(&Business::default());
        let pricing = profiles.for_intent(Intent::GetPricing);
        assert!(!pricing.tools.contains(&ToolKind::CheckAvailability));
        assert!(pricing.tools.contains(&ToolKind::GetPricingInfo));
    }

    #[test]
    fn instructions_carry_business_identity() {
        let business = Business::default();
        let profiles = Profiles::new(&business);
        for profile in profiles.all() {
            assert!(profile.instructions.contains(&business.name));
        }
    }
}
