use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::entities::setting;

/// Human readable selector the upload page sends for color jobs.
pub const COLOR_SELECTOR: &str = "Color";
/// Human readable selector the upload page sends for double sided jobs.
pub const DUPLEX_SELECTOR: &str = "2-Sided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub color: bool,
    pub duplex: bool,
}

impl PrintOptions {
    /// Anything other than the exact selector strings means black & white / single sided.
    pub fn from_selectors(color: &str, duplex: &str) -> Self {
        Self {
            color: color == COLOR_SELECTOR,
            duplex: duplex == DUPLEX_SELECTOR,
        }
    }

    /// Settings key holding the per page rate for these options.
    pub fn rate_key(&self) -> &'static str {
        match (self.color, self.duplex) {
            (false, false) => "bw_single_sided",
            (false, true) => "bw_double_sided",
            (true, false) => "color_single_sided",
            (true, true) => "color_double_sided",
        }
    }
}

/// Price settings keyed by name, as stored in the Settings table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    rates: BTreeMap<String, Decimal>,
}

impl PriceTable {
    pub fn from_settings(rows: impl IntoIterator<Item = setting::Model>) -> Self {
        Self {
            rates: rows
                .into_iter()
                .map(|row| (row.setting_key, row.setting_value))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.rates.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Float view for the JSON pricing endpoint.
    pub fn to_float_map(&self) -> BTreeMap<String, f64> {
        self.rates
            .iter()
            .map(|(key, value)| (key.clone(), value.to_f64().unwrap_or_default()))
            .collect()
    }
}

impl FromIterator<(String, Decimal)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}
