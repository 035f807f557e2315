//! Shared enum types that map to bhavcopy codes and archive files.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BhavError;

// ---------------------------------------------------------------------------
// Instrument Kind
// ---------------------------------------------------------------------------

/// Derivative instrument kind as found in the `INSTRUMENT` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Stock future (`FUTSTK`).
    FutureStock,
    /// Index future (`FUTIDX`).
    FutureIndex,
    /// Stock option (`OPTSTK`).
    OptionStock,
    /// Index option (`OPTIDX`).
    OptionIndex,
}

impl InstrumentKind {
    /// Bhavcopy code for this instrument.
    pub fn code(self) -> &'static str {
        match self {
            Self::FutureStock => "FUTSTK",
            Self::FutureIndex => "FUTIDX",
            Self::OptionStock => "OPTSTK",
            Self::OptionIndex => "OPTIDX",
        }
    }

    /// `true` for `FUTSTK` and `FUTIDX`.
    pub fn is_future(self) -> bool {
        matches!(self, Self::FutureStock | Self::FutureIndex)
    }

    /// `true` for `OPTSTK` and `OPTIDX`.
    pub fn is_option(self) -> bool {
        matches!(self, Self::OptionStock | Self::OptionIndex)
    }
}

impl FromStr for InstrumentKind {
    type Err = BhavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FUTSTK" => Ok(Self::FutureStock),
            "FUTIDX" => Ok(Self::FutureIndex),
            "OPTSTK" => Ok(Self::OptionStock),
            "OPTIDX" => Ok(Self::OptionIndex),
            other => Err(BhavError::Parse {
                field: "INSTRUMENT",
                value: other.to_owned(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Option Type
// ---------------------------------------------------------------------------

/// Option leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// `CE`
    Call,
    /// `PE`
    Put,
}

impl OptionType {
    /// Parse an `OPTION_TYP` cell. Futures carry `XX` (or blank) and yield
    /// `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "CE" => Some(Self::Call),
            "PE" => Some(Self::Put),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// Exchange segment of a bhavcopy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Cash market.
    Cash,
    /// Futures & options.
    FnO,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => f.write_str("Cash"),
            Self::FnO => f.write_str("FnO"),
        }
    }
}

impl FromStr for Segment {
    type Err = BhavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" | "cm" | "eq" => Ok(Self::Cash),
            "fno" | "fo" | "f&o" => Ok(Self::FnO),
            _ => Err(BhavError::InvalidArgument(format!("unknown segment: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Index Name
// ---------------------------------------------------------------------------

/// Symbol universes resolvable through
/// [`MarketDataSource::symbols_for_index`](crate::source::MarketDataSource::symbols_for_index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexName {
    Nifty50,
    NiftyNext50,
    Nifty100,
    Nifty200,
    Nifty500,
    NiftyBank,
    /// Every derivatives-traded underlying.
    FnO,
    /// Every listed equity.
    All,
}

impl IndexName {
    /// All variants, in menu order.
    pub const ALL: [IndexName; 8] = [
        Self::Nifty50,
        Self::NiftyNext50,
        Self::Nifty100,
        Self::Nifty200,
        Self::Nifty500,
        Self::NiftyBank,
        Self::FnO,
        Self::All,
    ];

    /// Slug used in the constituents file name, for indices that have one.
    pub fn slug(self) -> Option<&'static str> {
        match self {
            Self::Nifty50 => Some("nifty50"),
            Self::NiftyNext50 => Some("niftynext50"),
            Self::Nifty100 => Some("nifty100"),
            Self::Nifty200 => Some("nifty200"),
            Self::Nifty500 => Some("nifty500"),
            Self::NiftyBank => Some("niftybank"),
            Self::FnO | Self::All => None,
        }
    }
}

impl FromStr for IndexName {
    type Err = BhavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_', '-'], "");
        Self::ALL
            .into_iter()
            .find(|idx| match idx.slug() {
                Some(slug) => slug == wanted,
                None => format!("{idx:?}").to_ascii_lowercase() == wanted,
            })
            .ok_or_else(|| BhavError::InvalidArgument(format!("unknown index: {s}")))
    }
}
