//! Distance resolution and quote pricing.
//!
//! [`DistanceResolver`] turns an address pair into miles, reading through the
//! record store and calling the provider at most once per uncached pair.
//! [`QuoteCalculator`] prices a [`moveq_core::QuoteRequest`] on top of it and
//! never fails: an unresolvable distance prices as zero miles.

pub mod adapters;
pub mod calculator;
pub mod error;
pub mod ports;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fakes;

pub use adapters::PgRecordStore;
pub use calculator::QuoteCalculator;
pub use error::{DistanceError, ProviderError, StoreError};
pub use ports::{DistanceProvider, RecordStore};
pub use resolver::{DistanceResolver, DistanceSource, ResolvedDistance};
