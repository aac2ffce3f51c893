//! `quote` command handler.

use moveq_core::{MoveSize, QuoteRequest, ServiceType, SpecialtyItem};
use moveq_quote::QuoteCalculator;
use rust_decimal::Decimal;

/// Flags of the `quote` subcommand.
#[derive(Debug, Clone)]
pub(crate) struct QuoteArgs {
    pub service_type: String,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub move_size: Option<String>,
    pub origin_stairs: u32,
    pub destination_stairs: u32,
    pub elevator: bool,
    pub long_carry: bool,
    pub additional_movers: u32,
    pub specialty: Vec<String>,
}

impl QuoteArgs {
    pub(crate) fn into_request(self) -> QuoteRequest {
        let mut request = QuoteRequest::new(
            ServiceType::parse(&self.service_type),
            &self.origin,
            &self.destination,
        );
        if let Some(weight) = self.weight {
            if !request.set_shipment_weight(weight) {
                tracing::warn!(%weight, "ignoring out-of-range weight; using default");
            }
        }
        request.move_size_residential = self.move_size.as_deref().and_then(MoveSize::parse);
        request.origin_stairs_flights = self.origin_stairs;
        request.destination_stairs_flights = self.destination_stairs;
        request.elevator = self.elevator;
        request.long_carry = self.long_carry;
        request.additional_movers = self.additional_movers;
        request.specialty_items = self
            .specialty
            .iter()
            .filter_map(|name| {
                let item = SpecialtyItem::parse(name);
                if item.is_none() {
                    tracing::warn!(item = %name, "ignoring unknown specialty item");
                }
                item
            })
            .collect();
        request
    }
}

/// Price the request and print the quote as JSON.
///
/// # Errors
///
/// Returns an error only if the quote cannot be serialized.
pub(crate) async fn run_quote(
    calculator: &QuoteCalculator,
    request: &QuoteRequest,
) -> anyhow::Result<()> {
    let quote = calculator.calculate_quote(request).await;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}
