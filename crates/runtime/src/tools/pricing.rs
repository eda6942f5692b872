//! Static pricing lookup.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use store::EventType;

#[derive(Debug, Deserialize, JsonSchema)]
pub(super) struct Input {
    /// Type of event.
    pub event_type: EventType,
    /// Expected duration in hours.
    #[serde(default)]
    pub duration_hours: Option<f32>,
    /// Number of guests.
    #[serde(default)]
    pub guest_count: Option<u32>,
    /// Whether special equipment is needed (uplighting, photo booth, etc.).
    #[serde(default)]
    pub special_equipment: Option<bool>,
}

struct Tier {
    base_price: u32,
    max_price: u32,
    description: &'static str,
    packages: &'static [(&'static str, u8, u32)],
}

const WEDDING: Tier = Tier {
    base_price: 1200,
    max_price: 2500,
    description: "Wedding packages include ceremony sound, reception DJ services, \
                  professional lighting, and unlimited music requests",
    packages: &[("Classic", 4, 1200), ("Premium", 6, 1800), ("Ultimate", 8, 2500)],
};

const CORPORATE: Tier = Tier {
    base_price: 800,
    max_price: 2000,
    description: "Corporate event packages include professional sound system, background \
                  music, and optional MC services",
    packages: &[("Basic", 3, 800), ("Standard", 5, 1200), ("Full Service", 8, 2000)],
};

const PRIVATE_PARTY: Tier = Tier {
    base_price: 600,
    max_price: 1500,
    description: "Private party packages include DJ services, sound system, and dance \
                  floor lighting",
    packages: &[("Party Starter", 3, 600), ("Party Pro", 4, 900), ("All Night", 6, 1500)],
};

const SCHOOL: Tier = Tier {
    base_price: 500,
    max_price: 1200,
    description: "School event packages designed for proms, homecoming, and school dances",
    packages: &[("School Dance", 4, 800), ("Prom Package", 5, 1200)],
};

const OTHER: Tier = Tier {
    base_price: 600,
    max_price: 2000,
    description: "Custom packages available for all event types",
    packages: &[],
};

const ADDONS: &str = "Popular Add-ons:\n\
                      - Uplighting: $300-500\n\
                      - Photo Booth: $400-600\n\
                      - Extra Speakers: $200\n\
                      - Wireless Mic: $100";

fn tier(event_type: EventType) -> &'static Tier {
    match event_type {
        EventType::Wedding => &WEDDING,
        EventType::Corporate => &CORPORATE,
        EventType::PrivateParty => &PRIVATE_PARTY,
        EventType::School => &SCHOOL,
        EventType::Other => &OTHER,
    }
}

/// Pure table lookup; optional fields only shape the add-ons text.
pub(super) fn run(input: Input) -> Value {
    let tier = tier(input.event_type);
    let packages: Vec<Value> = tier
        .packages
        .iter()
        .map(|(name, hours, price)| json!({"name": name, "hours": hours, "price": price}))
        .collect();

    let special_equipment = input.special_equipment.unwrap_or(false);
    json!({
        "event_type": input.event_type,
        "price_range": format!("${} - ${}", tier.base_price, tier.max_price),
        "description": tier.description,
        "packages": packages,
        "addons": if special_equipment { json!(ADDONS) } else { Value::Null },
        "note": "Final pricing depends on specific requirements. Request a personalized \
                 quote for exact pricing.",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(event_type: EventType) -> Input {
        Input {
            event_type,
            duration_hours: None,
            guest_count: None,
            special_equipment: None,
        }
    }

    #[test]
    fn wedding_range_matches_table() {
        let output = run(bare(EventType::Wedding));
        assert_eq!(output["price_range"], "$1200 - $2500");
        assert_eq!(output["packages"].as_array().unwrap().len(), 3);
        assert!(output["addons"].is_null());
    }

    #[test]
    fn optional_fields_do_not_change_the_range() {
        let output = run(Input {
            event_type: EventType::Wedding,
            duration_hours: Some(6.0),
            guest_count: Some(200),
            special_equipment: None,
        });
        assert_eq!(output["price_range"], "$1200 - $2500");
    }

    #[test]
    fn special_equipment_adds_addons_text() {
        let output = run(Input {
            special_equipment: Some(true),
            ..bare(EventType::PrivateParty)
        });
        assert!(output["addons"].as_str().unwrap().contains("Photo Booth"));
    }

    #[test]
    fn every_event_type_has_a_tier() {
        for event_type in [
            EventType::Wedding,
            EventType::Corporate,
            EventType::PrivateParty,
            EventType::School,
            EventType::Other,
        ] {
            let output = run(bare(event_type));
            assert!(output["price_range"].as_str().unwrap().starts_with('$'));
        }
    }

    #[test]
    fn other_tier_has_no_fixed_packages() {
        let output = run(bare(EventType::Other));
        assert_eq!(output["packages"].as_array().unwrap().len(), 0);
        assert_eq!(output["price_range"], "$600 - $2000");
    }
}
