//! Analytics lookup wire types
//!
//! This crate defines the records served by the lookup mock and the JSON
//! envelopes exchanged on the `get_by_ids` endpoint. It has no knowledge of
//! HTTP or of where records come from.

pub mod errors;
pub mod messages;
pub mod records;

pub use errors::ProtocolError;
pub use messages::{GetByIdsRequest, GetByIdsResponse};
pub use records::{AnalyticsRecord, ErrorFlow, Impact, Trend};

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Path of the single lookup route.
pub const GET_BY_IDS_PATH: &str = "/analytics/get_by_ids";
