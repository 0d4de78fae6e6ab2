use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cargotrack_core::{DomainError, DomainResult, Entity, Identifier, Record};

/// Identity shared by every trackable physical item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Identifier,
}

/// Shipment status lifecycle.
///
/// Transitions only move forward: `submitted -> intransit -> delivered`, or
/// straight from `submitted` to `delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentStatus {
    Submitted,
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    pub fn can_advance_to(self, next: ShipmentStatus) -> bool {
        next > self
    }
}

/// A consignment handed to a shipping company, moving between two individuals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(flatten)]
    pub asset: Asset,
    pub shipper_id: Identifier,
    pub from_id: Identifier,
    pub to_id: Identifier,
    pub status: ShipmentStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Shipment {
    /// A freshly submitted shipment.
    pub fn submitted(
        id: Identifier,
        shipper_id: Identifier,
        from_id: Identifier,
        to_id: Identifier,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            asset: Asset { id },
            shipper_id,
            from_id,
            to_id,
            status: ShipmentStatus::Submitted,
            submitted_at,
            delivered_at: None,
        }
    }

    pub fn mark_in_transit(&mut self) -> DomainResult<()> {
        self.advance(ShipmentStatus::InTransit)
    }

    pub fn mark_delivered(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if at < self.submitted_at {
            return Err(DomainError::invariant("delivery cannot precede submission"));
        }
        self.advance(ShipmentStatus::Delivered)?;
        self.delivered_at = Some(at);
        Ok(())
    }

    fn advance(&mut self, next: ShipmentStatus) -> DomainResult<()> {
        if !self.status.can_advance_to(next) {
            return Err(DomainError::invariant(format!(
                "shipment status cannot move from {:?} to {:?}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }
}

impl Entity for Shipment {
    fn id(&self) -> &Identifier {
        &self.asset.id
    }
}

impl Record for Shipment {
    const TYPE_NAME: &'static str = "Shipment";
}
