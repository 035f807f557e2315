//! Delivery-percentage screening across an index universe.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::analytics::ensure_not_future;
use crate::constants::EQUITY_SERIES;
use crate::error::{BhavError, Result};
use crate::source::MarketDataSource;
use crate::types::bhavcopy::EquityRecord;
use crate::types::enums::IndexName;

/// Ranking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Highest,
    Lowest,
}

impl FromStr for SortOrder {
    type Err = BhavError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "highest" | "high" => Ok(Self::Highest),
            "lowest" | "low" => Ok(Self::Lowest),
            _ => Err(BhavError::InvalidArgument(format!("unknown sort order: {s}"))),
        }
    }
}

/// `EQ` rows of `universe` ranked by delivery %, at most `limit` of them.
///
/// Rows without a delivery figure are left out.
pub fn rank_by_delivery(
    snapshot: &[EquityRecord],
    universe: &BTreeSet<String>,
    order: SortOrder,
    limit: usize,
) -> Vec<EquityRecord> {
    let mut rows: Vec<&EquityRecord> = snapshot
        .iter()
        .filter(|rec| rec.series == EQUITY_SERIES && rec.delivery_pct.is_some())
        .filter(|rec| universe.contains(&rec.symbol))
        .collect();

    rows.sort_by(|a, b| {
        let (a, b) = (a.delivery_pct.unwrap_or_default(), b.delivery_pct.unwrap_or_default());
        match order {
            SortOrder::Highest => b.total_cmp(&a),
            SortOrder::Lowest => a.total_cmp(&b),
        }
    });
    rows.into_iter().take(limit).cloned().collect()
}

/// Ranks an index's constituents by delivery percentage.
#[derive(Debug)]
pub struct DeliveryScreener<'a, S> {
    source: &'a S,
}

impl<'a, S: MarketDataSource> DeliveryScreener<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Top `limit` constituents of `index` on `date`.
    pub async fn leaders(
        &self,
        date: NaiveDate,
        index: IndexName,
        order: SortOrder,
        limit: usize,
    ) -> Result<Vec<EquityRecord>> {
        ensure_not_future(date)?;
        let universe = self.source.symbols_for_index(index).await?;
        let snapshot = self.source.equity_bhavcopy(date).await?;
        Ok(rank_by_delivery(&snapshot, &universe, order, limit))
    }
}
