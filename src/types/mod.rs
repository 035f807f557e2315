//! Typed records and derived values for NSE end-of-day data.
//!
//! ## Organization
//!
//! - [`enums`] — Instrument kinds, option types, segments, index universes
//! - [`bhavcopy`] — Cash and F&O bhavcopy rows plus their CSV parsers
//! - [`option_chain`] — Strike rows, option chains, expiry sets, max pain
//! - [`series`] — Date ranges, per-day rows, assembled daily series
//! - [`buildup`] — Futures build-up classification
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod bhavcopy;
pub mod buildup;
pub mod enums;
pub mod option_chain;
pub mod series;

pub use enums::*;
