//! Distance Matrix response types.
//!
//! One origin and one destination are sent per request, so the interesting
//! value lives at `rows[0].elements[0]`.

use serde::Deserialize;

/// Top-level response envelope.
///
/// `status` is `"OK"` when the request itself was valid; each element then
/// carries its own status for the specific origin/destination pair. Fields
/// the resolver never reads (resolved addresses, durations) are skipped.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

impl DistanceMatrixResponse {
    /// The element for the first origin and first destination, if present.
    #[must_use]
    pub fn first_element(&self) -> Option<&MatrixElement> {
        self.rows.first().and_then(|row| row.elements.first())
    }
}

#[derive(Debug, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<DistanceText>,
}

/// The display half of the provider's `{text, value}` distance pair.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceText {
    pub text: String,
}

/// A successful lookup for one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDistance {
    /// Display text, e.g. `"12.3 mi"`. This is what gets cached.
    pub text: String,
}
