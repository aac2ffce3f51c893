//! Client for the driving-distance provider (Distance Matrix JSON API).

pub mod client;
pub mod error;
pub mod types;

pub use client::{DistanceMatrixClient, ProviderConfig, Units};
pub use error::MapsError;
pub use types::{DistanceMatrixResponse, DistanceText, MatrixElement, MatrixRow, ProviderDistance};
