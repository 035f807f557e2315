//! Futures build-up types — per-symbol price/OI changes and classification.

use serde::Serialize;

/// Positioning inferred from the direction of price and open-interest change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Buildup {
    /// Price up, OI up.
    LongBuildup,
    /// Price down, OI up.
    ShortBuildup,
    /// Price down, OI down.
    LongUnwinding,
    /// Price up, OI down.
    ShortCovering,
}

impl Buildup {
    /// Classify a change pair. Any flat component yields `None`.
    pub fn classify(pch_close: f64, pch_oi: f64) -> Option<Self> {
        match (pch_close, pch_oi) {
            (c, o) if c > 0.0 && o > 0.0 => Some(Self::LongBuildup),
            (c, o) if c < 0.0 && o > 0.0 => Some(Self::ShortBuildup),
            (c, o) if c < 0.0 && o < 0.0 => Some(Self::LongUnwinding),
            (c, o) if c > 0.0 && o < 0.0 => Some(Self::ShortCovering),
            _ => None,
        }
    }
}

/// Fractional changes for one underlying between two trade dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildupRow {
    pub symbol: String,
    /// Nearest-future close change, e.g. `0.02` for +2 %.
    pub pch_close: f64,
    /// Change in open interest summed over all futures expiries.
    pub pch_oi: f64,
    pub kind: Option<Buildup>,
}

/// Build-up rows for every underlying present on both dates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildupReport {
    /// Sorted by symbol.
    pub rows: Vec<BuildupRow>,
}

impl BuildupReport {
    /// The `n` strongest rows of a class.
    ///
    /// Long build-up and short covering rank by largest gain first; short
    /// build-up and long unwinding by steepest fall first.
    pub fn top(&self, kind: Buildup, n: usize) -> Vec<&BuildupRow> {
        let mut rows: Vec<&BuildupRow> = self
            .rows
            .iter()
            .filter(|row| row.kind == Some(kind))
            .collect();
        match kind {
            Buildup::LongBuildup | Buildup::ShortCovering => {
                rows.sort_by(|a, b| b.pch_close.total_cmp(&a.pch_close))
            }
            Buildup::ShortBuildup | Buildup::LongUnwinding => {
                rows.sort_by(|a, b| a.pch_close.total_cmp(&b.pch_close))
            }
        }
        rows.truncate(n);
        rows
    }
}
