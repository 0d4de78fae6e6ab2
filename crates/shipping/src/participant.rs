use serde::{Deserialize, Serialize};

use cargotrack_core::{DomainError, DomainResult, Entity, Identifier, Record};

/// Accepted participant name length, in characters.
pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 100;

/// Common participant data: identity and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Identifier,
    pub name: String,
}

/// Validated registration details shared by all participant kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetails {
    name: String,
    address: String,
}

impl ParticipantDetails {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        let len = name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
            return Err(DomainError::validation(format!(
                "invalid name argument: must be {NAME_MIN_CHARS} to {NAME_MAX_CHARS} characters long"
            )));
        }
        Ok(Self {
            name,
            address: address.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// A private individual sending or receiving cargo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualParticipant {
    #[serde(flatten)]
    pub participant: Participant,
    /// Simplified one-line postal address.
    pub address: String,
}

impl IndividualParticipant {
    pub fn new(id: Identifier, details: ParticipantDetails) -> Self {
        Self {
            participant: Participant {
                id,
                name: details.name,
            },
            address: details.address,
        }
    }

    pub fn name(&self) -> &str {
        &self.participant.name
    }
}

/// A shipping company carrying cargo between individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentCo {
    #[serde(flatten)]
    pub participant: Participant,
    pub address: String,
}

impl ShipmentCo {
    pub fn new(id: Identifier, details: ParticipantDetails) -> Self {
        Self {
            participant: Participant {
                id,
                name: details.name,
            },
            address: details.address,
        }
    }

    pub fn name(&self) -> &str {
        &self.participant.name
    }
}

/// A participant kind that can be registered from validated details.
pub trait ParticipantRecord: Record + Entity {
    fn from_details(id: Identifier, details: ParticipantDetails) -> Self;
}

impl ParticipantRecord for IndividualParticipant {
    fn from_details(id: Identifier, details: ParticipantDetails) -> Self {
        Self::new(id, details)
    }
}

impl ParticipantRecord for ShipmentCo {
    fn from_details(id: Identifier, details: ParticipantDetails) -> Self {
        Self::new(id, details)
    }
}

impl Entity for Participant {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl Entity for IndividualParticipant {
    fn id(&self) -> &Identifier {
        &self.participant.id
    }
}

impl Entity for ShipmentCo {
    fn id(&self) -> &Identifier {
        &self.participant.id
    }
}

impl Record for IndividualParticipant {
    const TYPE_NAME: &'static str = "IndividualParticipant";
}

impl Record for ShipmentCo {
    const TYPE_NAME: &'static str = "ShipmentCo";
}
