use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cargotrack_core::{DomainError, DomainResult, Identifier, Record};

/// Base type name of tracking records; each shipment scopes its own sequence.
pub const TRACKING_TYPE_NAME: &str = "trackingDataPoint";

/// Sensor reading taken for a shipment (validated, not yet bound to one).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingReading {
    pub at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
}

impl TrackingReading {
    pub fn new(
        at: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        temperature: f32,
        humidity: f32,
    ) -> DomainResult<Self> {
        if !(0.0..=100.0).contains(&humidity) {
            return Err(DomainError::validation(
                "invalid hum argument: must be in [0..100] [%]",
            ));
        }
        Ok(Self {
            at,
            latitude,
            longitude,
            temperature,
            humidity,
        })
    }
}

/// Location and environment of a shipment at a point in time.
///
/// Data points are append-only; a shipment's points are stored under
/// [`TrackingDataPoint::type_name_for`] so every shipment has its own counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingDataPoint {
    #[serde(rename = "shipmentId")]
    pub shipment_id: Identifier,
    pub at: DateTime<Utc>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "temp")]
    pub temperature: f32,
    #[serde(rename = "hum")]
    pub humidity: f32,
}

impl TrackingDataPoint {
    pub fn new(shipment_id: Identifier, reading: TrackingReading) -> Self {
        Self {
            shipment_id,
            at: reading.at,
            latitude: reading.latitude,
            longitude: reading.longitude,
            temperature: reading.temperature,
            humidity: reading.humidity,
        }
    }

    /// Registry type name of the tracking sequence of one shipment.
    pub fn type_name_for(shipment_id: &Identifier) -> String {
        format!("{TRACKING_TYPE_NAME}[{shipment_id}]")
    }
}

impl Record for TrackingDataPoint {
    const TYPE_NAME: &'static str = TRACKING_TYPE_NAME;
}
