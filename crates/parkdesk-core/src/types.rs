// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entities exchanged with the parking backend and the client-side entry draft.
//!
//! Field names follow the backend's camelCase JSON. Joined snapshots on a
//! parking record arrive under `__vehicle__` and `__parkingSlot__`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::error::ParkdeskError;

/// Size classification shared by vehicles and parking slots.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VehicleType {
    Small,
    Medium,
    Large,
}

/// A registered vehicle. The plate number is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub plate_number: String,
    pub vehicle_type: VehicleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A named physical entry location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A sized parking slot. Allocation is owned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    pub id: u64,
    pub name: String,
    pub parking_type: VehicleType,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One parking session. `time_out == None` means the vehicle is still parked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: u64,
    pub parking_slot_id: u64,
    pub vehicle_id: u64,
    pub time_in: DateTime<Utc>,
    #[serde(default)]
    pub time_out: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_fee")]
    pub fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "__vehicle__")]
    pub vehicle: Vehicle,
    #[serde(rename = "__parkingSlot__")]
    pub parking_slot: ParkingSlot,
}

impl Parking {
    /// Whether the session is still open.
    pub fn is_parked(&self) -> bool {
        self.time_out.is_none()
    }

    pub fn plate_number(&self) -> &str {
        &self.vehicle.plate_number
    }
}

/// Decimal columns come back from some backends as strings.
fn deserialize_fee<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFee {
        Number(f64),
        Text(String),
    }

    match Option::<RawFee>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFee::Number(n)) => Ok(Some(n)),
        Some(RawFee::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Lifecycle action submitted to `POST /parkings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParkingAction {
    TimeIn,
    TimeOut,
}

/// Body of `POST /vehicles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicle {
    pub plate_number: String,
    pub vehicle_type: VehicleType,
}

/// Body of `POST /parkings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParking {
    pub entry_point_id: u64,
    pub vehicle_id: u64,
    pub action: ParkingAction,
}

/// Outcome of looking a vehicle up by plate number.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleLookup {
    Found(Vehicle),
    /// The backend has no vehicle with this plate number.
    NotFound,
    /// The lookup failed for any other reason (transport, 5xx, bad body).
    LookupFailed(String),
}

/// `message` field of a non-2xx response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiMessage {
    /// Normalizes to a list: a single string becomes a one-element list.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            ApiMessage::One(message) => vec![message],
            ApiMessage::Many(messages) => messages,
        }
    }
}

/// Error body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<ApiMessage>,
}

/// Draft fields an operator fills in one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum DraftField {
    PlateNumber,
    VehicleType,
    EntryPointId,
}

/// Client-side draft for a time-in, accumulated field by field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateVehicleParkingInput {
    pub plate_number: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub entry_point_id: Option<u64>,
}

impl CreateVehicleParkingInput {
    /// Sets one field from raw operator input. An empty value clears the field.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), ParkdeskError> {
        let value = value.trim();
        match field {
            DraftField::PlateNumber => {
                self.plate_number = (!value.is_empty()).then(|| value.to_string());
            }
            DraftField::VehicleType => {
                self.vehicle_type = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| ParkdeskError::InvalidField {
                        field: "vehicle type",
                        value: value.to_string(),
                    })?)
                };
            }
            DraftField::EntryPointId => {
                self.entry_point_id = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| ParkdeskError::InvalidField {
                        field: "entry point",
                        value: value.to_string(),
                    })?)
                };
            }
        }
        Ok(())
    }

    /// Whether every required field is present.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks required fields in form order and returns the submit-ready values.
    pub fn validate(&self) -> Result<ValidatedEntry, ParkdeskError> {
        let plate_number = self
            .plate_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or(ParkdeskError::MissingField {
                field: "plate number",
            })?;
        let vehicle_type = self.vehicle_type.ok_or(ParkdeskError::MissingField {
            field: "vehicle type",
        })?;
        let entry_point_id = self.entry_point_id.ok_or(ParkdeskError::MissingField {
            field: "entry point",
        })?;

        Ok(ValidatedEntry {
            plate_number: plate_number.to_string(),
            vehicle_type,
            entry_point_id,
        })
    }
}

/// A draft with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEntry {
    pub plate_number: String,
    pub vehicle_type: VehicleType,
    pub entry_point_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parking_json(time_out: serde_json::Value, fee: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "parkingSlotId": 3,
            "vehicleId": 11,
            "timeIn": "2024-03-01T08:00:00.000Z",
            "timeOut": time_out,
            "createdAt": "2024-03-01T08:00:00.000Z",
            "updatedAt": "2024-03-01T08:00:00.000Z",
            "fee": fee,
            "__vehicle__": {
                "id": 11,
                "plateNumber": "ABC123",
                "vehicleType": "medium"
            },
            "__parkingSlot__": {
                "id": 3,
                "name": "M-1",
                "parkingType": "medium",
                "status": "occupied"
            }
        })
    }

    #[test]
    fn open_parking_deserializes_with_null_time_out() {
        let parking: Parking =
            serde_json::from_value(parking_json(serde_json::Value::Null, serde_json::Value::Null))
                .unwrap();
        assert!(parking.is_parked());
        assert_eq!(parking.fee, None);
        assert_eq!(parking.plate_number(), "ABC123");
        assert_eq!(parking.parking_slot.parking_type, VehicleType::Medium);
    }

    #[test]
    fn closed_parking_accepts_string_fee() {
        let parking: Parking = serde_json::from_value(parking_json(
            serde_json::json!("2024-03-01T12:30:00.000Z"),
            serde_json::json!("100.50"),
        ))
        .unwrap();
        assert!(!parking.is_parked());
        assert_eq!(parking.fee, Some(100.5));
    }

    #[test]
    fn parking_without_fee_key_deserializes() {
        let mut value = parking_json(serde_json::Value::Null, serde_json::Value::Null);
        value.as_object_mut().unwrap().remove("fee");
        let parking: Parking = serde_json::from_value(value).unwrap();
        assert_eq!(parking.fee, None);
    }

    #[test]
    fn create_parking_serializes_camel_case_action() {
        let body = CreateParking {
            entry_point_id: 0,
            vehicle_id: 11,
            action: ParkingAction::TimeOut,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"entryPointId": 0, "vehicleId": 11, "action": "timeOut"})
        );
        assert_eq!(ParkingAction::TimeIn.to_string(), "timeIn");
    }

    #[test]
    fn single_message_normalizes_to_one_element() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"X"}"#).unwrap();
        assert_eq!(body.message.unwrap().into_messages(), vec!["X"]);
    }

    #[test]
    fn message_array_is_kept_as_is() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":["A","B"]}"#).unwrap();
        assert_eq!(body.message.unwrap().into_messages(), vec!["A", "B"]);
    }

    #[test]
    fn vehicle_type_parses_case_insensitively() {
        assert_eq!("Small".parse::<VehicleType>().unwrap(), VehicleType::Small);
        assert_eq!(VehicleType::Large.to_string(), "large");
        assert!("huge".parse::<VehicleType>().is_err());
    }

    #[test]
    fn draft_reports_missing_fields_in_form_order() {
        let mut draft = CreateVehicleParkingInput::default();
        assert!(matches!(
            draft.validate(),
            Err(ParkdeskError::MissingField { field: "plate number" })
        ));

        draft.set_field(DraftField::PlateNumber, "  ABC123 ").unwrap();
        assert!(matches!(
            draft.validate(),
            Err(ParkdeskError::MissingField { field: "vehicle type" })
        ));

        draft.set_field(DraftField::VehicleType, "small").unwrap();
        assert!(!draft.is_complete());

        draft.set_field(DraftField::EntryPointId, "2").unwrap();
        let ready = draft.validate().unwrap();
        assert_eq!(ready.plate_number, "ABC123");
        assert_eq!(ready.vehicle_type, VehicleType::Small);
        assert_eq!(ready.entry_point_id, 2);
    }

    #[test]
    fn blank_plate_number_is_missing() {
        let draft = CreateVehicleParkingInput {
            plate_number: Some("   ".into()),
            vehicle_type: Some(VehicleType::Large),
            entry_point_id: Some(1),
        };
        assert!(!draft.is_complete());
    }

    #[test]
    fn empty_value_clears_field() {
        let mut draft = CreateVehicleParkingInput::default();
        draft.set_field(DraftField::EntryPointId, "4").unwrap();
        draft.set_field(DraftField::EntryPointId, "").unwrap();
        assert_eq!(draft.entry_point_id, None);
    }

    #[test]
    fn non_numeric_entry_point_is_rejected() {
        let mut draft = CreateVehicleParkingInput::default();
        let err = draft
            .set_field(DraftField::EntryPointId, "north")
            .unwrap_err();
        assert!(matches!(err, ParkdeskError::InvalidField { field: "entry point", .. }));
        assert_eq!(draft.entry_point_id, None);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_non_blank_plate_validates_trimmed(plate in "[A-Z0-9]{1,10}", pad in " {0,3}") {
                let mut draft = CreateVehicleParkingInput::default();
                draft.set_field(DraftField::PlateNumber, &format!("{pad}{plate}{pad}")).unwrap();
                draft.set_field(DraftField::VehicleType, "medium").unwrap();
                draft.set_field(DraftField::EntryPointId, "1").unwrap();
                prop_assert_eq!(draft.validate().unwrap().plate_number, plate);
            }
        }
    }
}
