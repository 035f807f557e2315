//! Index universe endpoints — constituents, F&O underlyings, all equities.

use std::collections::BTreeSet;

use crate::client::NseClient;
use crate::constants::paths;
use crate::error::{BhavError, Result};
use crate::types::enums::IndexName;

impl NseClient {
    /// Retrieve the symbols that make up an index universe.
    ///
    /// Named indices come from their constituents file; [`IndexName::FnO`]
    /// from the F&O market-lots file; [`IndexName::All`] from the equity
    /// listing.
    pub async fn get_index_symbols(&self, index: IndexName) -> Result<BTreeSet<String>> {
        let body = self.get_bytes(&index_path(index)).await?;
        let symbols = parse_symbol_list(&body)?;
        tracing::debug!(?index, count = symbols.len(), "Loaded index universe");
        Ok(symbols)
    }
}

/// Archive path of the file listing `index`.
pub fn index_path(index: IndexName) -> String {
    match index.slug() {
        Some(slug) => paths::INDEX_CONSTITUENTS.replace("{slug}", slug),
        None if index == IndexName::FnO => paths::FNO_LOTS.to_owned(),
        None => paths::EQUITY_LIST.to_owned(),
    }
}

/// Collect the `SYMBOL` column (any case) of a listing file.
///
/// Section captions and blank cells are skipped; the lots file interleaves
/// them with data rows.
pub fn parse_symbol_list(data: &[u8]) -> Result<BTreeSet<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case("symbol"))
        .ok_or_else(|| BhavError::Schema {
            missing: vec!["SYMBOL".into()],
        })?;

    let mut symbols = BTreeSet::new();
    for record in rdr.records() {
        let record = record?;
        if let Some(sym) = record.get(column) {
            if !sym.is_empty() && !sym.eq_ignore_ascii_case("symbol") {
                symbols.insert(sym.to_owned());
            }
        }
    }
    Ok(symbols)
}
