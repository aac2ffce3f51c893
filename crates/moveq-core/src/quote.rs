//! Quote inputs and outputs.
//!
//! [`QuoteRequest::from_form`] accepts the loosely-typed JSON a web form
//! produces: numbers may arrive as strings, checkboxes as `"1"`/`"on"`, and
//! any field may be missing. Nothing here rejects a request; unusable values
//! fall back to their defaults.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

/// Shipment weight assumed when the form omits it or sends something unusable.
pub const DEFAULT_SHIPMENT_WEIGHT_LBS: i64 = 4000;

/// Heaviest shipment accepted; anything above is treated as unusable input.
pub const MAX_SHIPMENT_WEIGHT_LBS: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceType {
    LocalResidentialMove,
    LongDistanceMove,
    OnDemandDelivery,
    /// Anything else, kept verbatim so it can be echoed back.
    Other(String),
}

impl ServiceType {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "local_residential_move" => Self::LocalResidentialMove,
            "long_distance_move" => Self::LongDistanceMove,
            "on_demand_delivery" => Self::OnDemandDelivery,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::LocalResidentialMove => "local_residential_move",
            Self::LongDistanceMove => "long_distance_move",
            Self::OnDemandDelivery => "on_demand_delivery",
            Self::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Residential move size as selected on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSize {
    Studio,
    OneBedroom,
    TwoBedroom,
    ThreeBedroom,
    FourBedroomPlus,
}

impl MoveSize {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "studio" => Some(Self::Studio),
            "1_br" => Some(Self::OneBedroom),
            "2_br" => Some(Self::TwoBedroom),
            "3_br" => Some(Self::ThreeBedroom),
            "4_br_plus" => Some(Self::FourBedroomPlus),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::OneBedroom => "1_br",
            Self::TwoBedroom => "2_br",
            Self::ThreeBedroom => "3_br",
            Self::FourBedroomPlus => "4_br_plus",
        }
    }
}

/// Items that carry a flat handling fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialtyItem {
    Piano,
    GunSafe,
    FineArt,
    GymEquipment,
}

impl SpecialtyItem {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "piano" => Some(Self::Piano),
            "gun_safe" => Some(Self::GunSafe),
            "fine_art" => Some(Self::FineArt),
            "gym_equipment" => Some(Self::GymEquipment),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Piano => "piano",
            Self::GunSafe => "gun_safe",
            Self::FineArt => "fine_art",
            Self::GymEquipment => "gym_equipment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub service_type: ServiceType,
    pub origin_address: String,
    pub destination_address: String,
    pub shipment_weight_lbs: Decimal,
    pub move_size_residential: Option<MoveSize>,
    pub origin_stairs_flights: u32,
    pub destination_stairs_flights: u32,
    pub elevator: bool,
    pub long_carry: bool,
    pub additional_movers: u32,
    pub specialty_items: Vec<SpecialtyItem>,
}

impl QuoteRequest {
    /// A request with only the required fields set and every option at its default.
    #[must_use]
    pub fn new(service_type: ServiceType, origin: &str, destination: &str) -> Self {
        Self {
            service_type,
            origin_address: origin.to_string(),
            destination_address: destination.to_string(),
            shipment_weight_lbs: Decimal::from(DEFAULT_SHIPMENT_WEIGHT_LBS),
            move_size_residential: None,
            origin_stairs_flights: 0,
            destination_stairs_flights: 0,
            elevator: false,
            long_carry: false,
            additional_movers: 0,
            specialty_items: Vec::new(),
        }
    }

    /// Set the shipment weight if it lies in `(0, MAX_SHIPMENT_WEIGHT_LBS]`.
    ///
    /// Returns `false` and keeps the current weight otherwise.
    pub fn set_shipment_weight(&mut self, weight: Decimal) -> bool {
        let usable = weight > Decimal::ZERO && weight <= Decimal::from(MAX_SHIPMENT_WEIGHT_LBS);
        if usable {
            self.shipment_weight_lbs = weight;
        }
        usable
    }

    /// Build a request from submitted form fields.
    ///
    /// Addresses are passed through untouched; the distance cache keys on the
    /// literal text.
    #[must_use]
    pub fn from_form(form: &Map<String, Value>) -> Self {
        let text = |key: &str| -> String {
            match form.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            }
        };

        let service_type = ServiceType::parse(&text("service_type"));
        let mut request = Self::new(
            service_type,
            &text("origin_address"),
            &text("destination_address"),
        );

        if let Some(weight) = form.get("shipment_weight").and_then(decimal_field) {
            request.set_shipment_weight(weight);
        }

        request.move_size_residential = MoveSize::parse(&text("move_size_residential"));
        request.origin_stairs_flights = form
            .get("origin_stairs_flights")
            .and_then(count_field)
            .unwrap_or(0);
        request.destination_stairs_flights = form
            .get("destination_stairs_flights")
            .and_then(count_field)
            .unwrap_or(0);
        request.elevator = form.get("elevator").is_some_and(flag_field);
        request.long_carry = form.get("long_carry").is_some_and(flag_field);
        request.additional_movers = form
            .get("additional_movers")
            .and_then(count_field)
            .unwrap_or(0);
        request.specialty_items = form
            .get("specialty_items")
            .map(specialty_items_field)
            .unwrap_or_default();

        request
    }
}

fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

fn count_field(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

fn flag_field(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().is_some_and(|v| v > 0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        _ => false,
    }
}

/// Accepts either a JSON array of names or a comma-separated string.
/// Unknown names are dropped.
fn specialty_items_field(value: &Value) -> Vec<SpecialtyItem> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(SpecialtyItem::parse)
            .collect(),
        Value::String(s) => s.split(',').filter_map(SpecialtyItem::parse).collect(),
        _ => Vec::new(),
    }
}

/// One labelled component of a quote total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub label: String,
    pub amount: Decimal,
}

/// Computed price estimate. Both numeric fields carry exactly two decimal
/// places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub service_type: String,
    pub distance_mi: Decimal,
    pub estimated_cost: Decimal,
    pub breakdown: Vec<LineItem>,
}
