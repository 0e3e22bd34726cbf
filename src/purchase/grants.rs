//! CPF housing grant pointers and ownership restrictions by residency

use crate::buyer::{Citizenship, PropertyType};
use serde::{Deserialize, Serialize};

const NON_CITIZEN: &str = "Grants are generally not applicable for non-citizens.";

/// Grant schemes a citizen may look into for each property type
fn grant_rules(property_type: PropertyType) -> &'static [&'static str] {
    match property_type {
        PropertyType::Hdb => &[
            "Enhanced Housing Grant (EHG): May be available for first-timer families with a monthly household income up to S$9,000.",
            "Family Grant: May be available for first-timer families buying a resale flat.",
            "Proximity Housing Grant (PHG): May be available when buying a resale flat to live with or near parents/children.",
        ],
        PropertyType::Ec => &[
            "For New ECs: You may be eligible for the Family Grant and Proximity Housing Grant (PHG) if you meet the criteria.",
            "For Resale ECs (after 5-year MOP): CPF housing grants are not available.",
        ],
        PropertyType::Condo | PropertyType::Landed => {
            &["Not Applicable. CPF housing grants are not available for private properties."]
        }
    }
}

/// Ordered, human-readable grant pointers; non-citizens get a single notice
pub fn grant_eligibility(citizenship: Citizenship, property_type: PropertyType) -> Vec<String> {
    if citizenship != Citizenship::Citizen {
        return vec![NON_CITIZEN.to_string()];
    }
    grant_rules(property_type).iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// What a buyer of a given residency is allowed to buy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipNotice {
    pub level: NoticeLevel,
    pub message: String,
}

pub fn ownership_notice(citizenship: Citizenship) -> OwnershipNotice {
    let (level, message) = match citizenship {
        Citizenship::Citizen => (
            NoticeLevel::Info,
            "As a Singapore Citizen, you can purchase all property types with no restrictions.",
        ),
        Citizenship::Pr => (
            NoticeLevel::Info,
            "As a Permanent Resident: You can buy private condos and ECs immediately. HDB resale flats available after 3 years of PR status. New HDB flats are not available.",
        ),
        Citizenship::Foreigner => (
            NoticeLevel::Warning,
            "As a Foreigner: Only private condos are available. HDB flats are restricted. Landed properties require LDAU approval.",
        ),
    };
    OwnershipNotice {
        level,
        message: message.to_string(),
    }
}
