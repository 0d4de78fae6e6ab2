use serde::{Deserialize, Serialize};

use cargotrack_core::Identifier;
use cargotrack_shipping::{Shipment, TrackingDataPoint};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterParticipantRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitShipmentRequest {
    pub by: String,
    pub from: String,
    pub to: String,
    pub submitted_at: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackShipmentRequest {
    pub id: String,
    pub at: String,
    pub lat: f64,
    pub lng: f64,
    pub temp: f32,
    pub hum: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDataPointRequest {
    pub shipment_id: String,
    pub id: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: Identifier,
}

#[derive(Debug, Serialize)]
pub struct ParticipantResponse<P> {
    pub participant: P,
}

#[derive(Debug, Serialize)]
pub struct ShipmentResponse {
    pub shipment: Shipment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDataPointResponse {
    pub tracking_data_point: TrackingDataPoint,
}

/// Serializes as `{}`.
#[derive(Debug, Serialize)]
pub struct Ack {}
