use moveq_core::{PricingPolicy, Quote, QuoteRequest};
use rust_decimal::Decimal;

use crate::resolver::DistanceResolver;

/// Prices quote requests against resolved driving distance.
#[derive(Clone)]
pub struct QuoteCalculator {
    resolver: DistanceResolver,
    policy: PricingPolicy,
}

impl QuoteCalculator {
    #[must_use]
    pub fn new(resolver: DistanceResolver, policy: PricingPolicy) -> Self {
        Self { resolver, policy }
    }

    #[must_use]
    pub fn resolver(&self) -> &DistanceResolver {
        &self.resolver
    }

    #[must_use]
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Compute a quote for `request`.
    ///
    /// Distance resolution failures are logged and priced as zero miles, as
    /// is a distance too large to price, so this always produces a quote.
    pub async fn calculate_quote(&self, request: &QuoteRequest) -> Quote {
        let distance = match self
            .resolver
            .get_distance(&request.origin_address, &request.destination_address)
            .await
        {
            Ok(miles) => miles,
            Err(e) => {
                tracing::warn!(
                    service_type = %request.service_type,
                    error = %e,
                    "distance unavailable; pricing with zero miles"
                );
                Decimal::ZERO
            }
        };

        let quote = self.policy.try_price(request, distance).unwrap_or_else(|| {
            tracing::warn!(
                service_type = %request.service_type,
                distance_mi = %distance,
                weight_lbs = %request.shipment_weight_lbs,
                "quote amount overflowed; pricing with zero miles"
            );
            self.policy.price(request, Decimal::ZERO)
        });
        tracing::info!(
            service_type = %quote.service_type,
            distance_mi = %quote.distance_mi,
            estimated_cost = %quote.estimated_cost,
            "quote calculated"
        );
        quote
    }
}
