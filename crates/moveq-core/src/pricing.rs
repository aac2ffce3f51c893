//! The pricing schedule.
//!
//! [`PricingPolicy::default`] is the one schedule quotes are priced with:
//!
//! | service type | total before surcharges |
//! |---|---|
//! | `local_residential_move` | `500 + miles × 2.5` |
//! | `long_distance_move` | `500 + weight_lbs × miles × 0.00065` |
//! | `on_demand_delivery` | `75 + miles × 1.0` |
//! | anything else | `150` |
//!
//! Surcharges (stairs, elevator, long carry, extra movers, specialty items)
//! are added on top for every service type and are zero unless the request
//! asks for them.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::quote::{LineItem, Quote, QuoteRequest, ServiceType, SpecialtyItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    pub local_base: Decimal,
    pub local_per_mile: Decimal,
    pub long_distance_base: Decimal,
    /// Applied to `weight_lbs × miles`.
    pub long_distance_per_lb_mile: Decimal,
    pub on_demand_base: Decimal,
    pub on_demand_per_mile: Decimal,
    pub fallback_base: Decimal,
    pub stairs_per_flight: Decimal,
    pub elevator: Decimal,
    pub long_carry: Decimal,
    pub additional_mover: Decimal,
    pub piano: Decimal,
    pub gun_safe: Decimal,
    pub fine_art: Decimal,
    pub gym_equipment: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            local_base: Decimal::new(500, 0),
            local_per_mile: Decimal::new(25, 1),
            long_distance_base: Decimal::new(500, 0),
            long_distance_per_lb_mile: Decimal::new(65, 5),
            on_demand_base: Decimal::new(75, 0),
            on_demand_per_mile: Decimal::new(1, 0),
            fallback_base: Decimal::new(150, 0),
            stairs_per_flight: Decimal::new(50, 0),
            elevator: Decimal::new(35, 0),
            long_carry: Decimal::new(75, 0),
            additional_mover: Decimal::new(45, 0),
            piano: Decimal::new(425, 0),
            gun_safe: Decimal::new(275, 0),
            fine_art: Decimal::new(350, 0),
            gym_equipment: Decimal::new(225, 0),
        }
    }
}

impl PricingPolicy {
    /// Price `request` for a trip of `distance_miles`.
    ///
    /// Pure and infallible: the caller resolves the distance (using zero when
    /// it could not). If the distance is too large to price, the quote is
    /// priced as zero miles instead; see [`PricingPolicy::try_price`].
    #[must_use]
    pub fn price(&self, request: &QuoteRequest, distance_miles: Decimal) -> Quote {
        self.try_price(request, distance_miles)
            .or_else(|| self.try_price(request, Decimal::ZERO))
            .unwrap_or_else(|| self.base_only(request))
    }

    /// Price `request`, or `None` if any amount overflows `Decimal`.
    #[must_use]
    pub fn try_price(&self, request: &QuoteRequest, distance_miles: Decimal) -> Option<Quote> {
        let mut items: Vec<(String, Decimal)> = Vec::new();

        match &request.service_type {
            ServiceType::LocalResidentialMove => {
                items.push(("base_fee".to_string(), self.local_base));
                items.push((
                    "distance_fee".to_string(),
                    distance_miles.checked_mul(self.local_per_mile)?,
                ));
            }
            ServiceType::LongDistanceMove => {
                items.push(("base_fee".to_string(), self.long_distance_base));
                items.push((
                    "distance_fee".to_string(),
                    request
                        .shipment_weight_lbs
                        .checked_mul(distance_miles)?
                        .checked_mul(self.long_distance_per_lb_mile)?,
                ));
            }
            ServiceType::OnDemandDelivery => {
                items.push(("base_fee".to_string(), self.on_demand_base));
                items.push((
                    "distance_fee".to_string(),
                    distance_miles.checked_mul(self.on_demand_per_mile)?,
                ));
            }
            ServiceType::Other(_) => {
                items.push(("base_fee".to_string(), self.fallback_base));
            }
        }

        self.push_surcharges(request, &mut items)?;

        let total = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, amount)| acc.checked_add(*amount))?;

        Some(Quote {
            service_type: request.service_type.as_str().to_string(),
            distance_mi: round_money(distance_miles),
            estimated_cost: round_money(total),
            breakdown: items
                .into_iter()
                .map(|(label, amount)| LineItem {
                    label,
                    amount: round_money(amount),
                })
                .collect(),
        })
    }

    /// The service's base fee alone. Last resort when even a zero-mile
    /// quote overflows, which takes billions of surcharge lines.
    fn base_only(&self, request: &QuoteRequest) -> Quote {
        let base = match &request.service_type {
            ServiceType::LocalResidentialMove => self.local_base,
            ServiceType::LongDistanceMove => self.long_distance_base,
            ServiceType::OnDemandDelivery => self.on_demand_base,
            ServiceType::Other(_) => self.fallback_base,
        };
        Quote {
            service_type: request.service_type.as_str().to_string(),
            distance_mi: round_money(Decimal::ZERO),
            estimated_cost: round_money(base),
            breakdown: vec![LineItem {
                label: "base_fee".to_string(),
                amount: round_money(base),
            }],
        }
    }

    fn push_surcharges(
        &self,
        request: &QuoteRequest,
        items: &mut Vec<(String, Decimal)>,
    ) -> Option<()> {
        if request.origin_stairs_flights > 0 {
            items.push((
                "origin_stairs".to_string(),
                self.stairs_per_flight
                    .checked_mul(Decimal::from(request.origin_stairs_flights))?,
            ));
        }
        if request.destination_stairs_flights > 0 {
            items.push((
                "destination_stairs".to_string(),
                self.stairs_per_flight
                    .checked_mul(Decimal::from(request.destination_stairs_flights))?,
            ));
        }
        if request.elevator {
            items.push(("elevator".to_string(), self.elevator));
        }
        if request.long_carry {
            items.push(("long_carry".to_string(), self.long_carry));
        }
        if request.additional_movers > 0 {
            items.push((
                "additional_movers".to_string(),
                self.additional_mover
                    .checked_mul(Decimal::from(request.additional_movers))?,
            ));
        }
        for item in &request.specialty_items {
            items.push((
                format!("specialty:{}", item.as_str()),
                self.specialty_fee(*item),
            ));
        }
        Some(())
    }

    #[must_use]
    pub fn specialty_fee(&self, item: SpecialtyItem) -> Decimal {
        match item {
            SpecialtyItem::Piano => self.piano,
            SpecialtyItem::GunSafe => self.gun_safe,
            SpecialtyItem::FineArt => self.fine_art,
            SpecialtyItem::GymEquipment => self.gym_equipment,
        }
    }
}

/// Round half away from zero to exactly two decimal places.
///
/// The scale is forced to 2 so `525` serializes as `"525.00"`.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(service: &str) -> QuoteRequest {
        QuoteRequest::new(ServiceType::parse(service), "A", "B")
    }

    #[test]
    fn local_move_is_base_plus_per_mile() {
        let quote = PricingPolicy::default().price(&request("local_residential_move"), dec("10"));
        assert_eq!(quote.estimated_cost.to_string(), "525.00");
        assert_eq!(quote.distance_mi.to_string(), "10.00");
    }

    #[test]
    fn on_demand_delivery_is_base_plus_per_mile() {
        let quote = PricingPolicy::default().price(&request("on_demand_delivery"), dec("4"));
        assert_eq!(quote.estimated_cost.to_string(), "79.00");
    }

    #[test]
    fn long_distance_uses_weight_and_distance() {
        let mut req = request("long_distance_move");
        req.shipment_weight_lbs = dec("5000");
        // 500 + 5000 × 300 × 0.00065 = 1475
        let quote = PricingPolicy::default().price(&req, dec("300"));
        assert_eq!(quote.estimated_cost.to_string(), "1475.00");
    }

    #[test]
    fn long_distance_default_weight() {
        // 500 + 4000 × 100 × 0.00065 = 760
        let quote = PricingPolicy::default().price(&request("long_distance_move"), dec("100"));
        assert_eq!(quote.estimated_cost.to_string(), "760.00");
    }

    #[test]
    fn unknown_service_ignores_distance() {
        let policy = PricingPolicy::default();
        for miles in ["0", "12.5", "9000"] {
            let quote = policy.price(&request("unknown_type"), dec(miles));
            assert_eq!(quote.estimated_cost.to_string(), "150.00");
            assert_eq!(quote.service_type, "unknown_type");
        }
    }

    #[test]
    fn zero_distance_yields_base_only() {
        let quote = PricingPolicy::default().price(&request("local_residential_move"), Decimal::ZERO);
        assert_eq!(quote.estimated_cost.to_string(), "500.00");
        assert_eq!(quote.distance_mi.to_string(), "0.00");
    }

    #[test]
    fn surcharges_apply_to_every_service_type() {
        let mut req = request("something_else");
        req.origin_stairs_flights = 2;
        req.destination_stairs_flights = 1;
        req.elevator = true;
        req.long_carry = true;
        req.additional_movers = 2;
        req.specialty_items = vec![SpecialtyItem::Piano, SpecialtyItem::GunSafe];
        // 150 + 100 + 50 + 35 + 75 + 90 + 425 + 275 = 1200
        let quote = PricingPolicy::default().price(&req, dec("40"));
        assert_eq!(quote.estimated_cost.to_string(), "1200.00");
        let labels: Vec<&str> = quote.breakdown.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "base_fee",
                "origin_stairs",
                "destination_stairs",
                "elevator",
                "long_carry",
                "additional_movers",
                "specialty:piano",
                "specialty:gun_safe",
            ]
        );
    }

    #[test]
    fn breakdown_lists_base_and_distance_fee() {
        let quote = PricingPolicy::default().price(&request("local_residential_move"), dec("3.333"));
        assert_eq!(quote.breakdown.len(), 2);
        assert_eq!(quote.breakdown[0].amount.to_string(), "500.00");
        // 3.333 × 2.5 = 8.3325 → 8.33
        assert_eq!(quote.breakdown[1].amount.to_string(), "8.33");
        assert_eq!(quote.estimated_cost.to_string(), "508.33");
        assert_eq!(quote.distance_mi.to_string(), "3.33");
    }

    #[test]
    fn oversized_weight_and_distance_fall_back_to_zero_miles() {
        let mut req = request("long_distance_move");
        req.shipment_weight_lbs = dec("1000000000000000000000000");

        let policy = PricingPolicy::default();
        assert!(policy.try_price(&req, dec("100000")).is_none());

        let quote = policy.price(&req, dec("100000"));
        assert_eq!(quote.distance_mi.to_string(), "0.00");
        assert_eq!(quote.estimated_cost.to_string(), "500.00");
    }

    #[test]
    fn maximum_distance_does_not_overflow_local_pricing() {
        let policy = PricingPolicy::default();
        let huge = Decimal::MAX;
        assert!(policy.try_price(&request("local_residential_move"), huge).is_none());

        let quote = policy.price(&request("local_residential_move"), huge);
        assert_eq!(quote.estimated_cost.to_string(), "500.00");
        assert_eq!(quote.distance_mi.to_string(), "0.00");
    }

    #[test]
    fn bounded_inputs_always_price() {
        let mut req = request("long_distance_move");
        req.shipment_weight_lbs = Decimal::from(crate::MAX_SHIPMENT_WEIGHT_LBS);
        req.origin_stairs_flights = u32::MAX;
        req.additional_movers = u32::MAX;
        let miles = Decimal::from(crate::MAX_DISTANCE_MILES);

        // 100000 × 25000 × 0.00065 = 1625000
        let quote = PricingPolicy::default()
            .try_price(&req, miles)
            .expect("bounded inputs must not overflow");
        assert_eq!(quote.breakdown[1].amount.to_string(), "1625000.00");
    }

    #[test]
    fn round_money_goes_half_away_from_zero() {
        assert_eq!(round_money(dec("2.345")).to_string(), "2.35");
        assert_eq!(round_money(dec("2.344")).to_string(), "2.34");
        assert_eq!(round_money(dec("-2.345")).to_string(), "-2.35");
        assert_eq!(round_money(dec("7")).to_string(), "7.00");
        assert_eq!(round_money(dec("0.1")).to_string(), "0.10");
    }

    #[test]
    fn quote_serializes_with_two_decimals() {
        let quote = PricingPolicy::default().price(&request("on_demand_delivery"), dec("4"));
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["estimated_cost"], "79.00");
        assert_eq!(json["distance_mi"], "4.00");
        assert_eq!(json["service_type"], "on_demand_delivery");
    }
}
