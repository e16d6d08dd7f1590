//! External CRM platform types
//!
//! Wire shapes for the platform's REST data API: the array-wrapped
//! record format, the field codec, and the response envelopes.

pub mod envelope;
pub mod record;

// Re-exports
pub use envelope::*;
pub use record::*;
