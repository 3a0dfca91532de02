//! Cost rules shared by the upload page and server side verification.
//!
//! Rates are per printed page: `file_cost = rate * page_count_final * copies`.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::orders::NewPrintFile;
use crate::models::settings::{PriceTable, PrintOptions};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRangeError {
    #[error("page range '{0}' is not a number or a-b span")]
    Malformed(String),
    #[error("page range '{token}' is outside 1-{page_count}")]
    OutOfBounds { token: String, page_count: u32 },
    #[error("page range '{0}' runs backwards")]
    Reversed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("no price configured for '{0}'")]
    MissingRate(&'static str),
    #[error(transparent)]
    PageRange(#[from] PageRangeError),
}

/// Why a submitted file failed server side recomputation.
#[derive(Debug, Error, PartialEq)]
pub enum CostMismatch {
    #[error("page range '{range}' selects {expected} pages, not {supplied}")]
    PageCount {
        range: String,
        expected: u32,
        supplied: i32,
    },
    #[error("cost should be {expected}, not {supplied}")]
    Cost { expected: Decimal, supplied: Decimal },
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Counts the pages a range selects out of a `page_count` page document.
///
/// Empty ranges and `all` select the whole document. Tokens are `n` or `a-b`,
/// 1-based and comma separated; a page listed twice is printed once.
pub fn parse_page_range(range: &str, page_count: u32) -> Result<u32, PageRangeError> {
    let range = range.trim();
    if range.is_empty() || range.eq_ignore_ascii_case("all") {
        return Ok(page_count);
    }

    let mut spans = Vec::new();
    for token in range.split(',').map(str::trim) {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_page(start, token)?, parse_page(end, token)?),
            None => {
                let page = parse_page(token, token)?;
                (page, page)
            }
        };

        if start > end {
            return Err(PageRangeError::Reversed(token.to_string()));
        }
        if start == 0 || end > page_count {
            return Err(PageRangeError::OutOfBounds {
                token: token.to_string(),
                page_count,
            });
        }
        spans.push((start, end));
    }

    // Merge overlapping spans so shared pages count once
    spans.sort_unstable();
    let mut selected = 0;
    let mut covered_to = 0;
    for (start, end) in spans {
        let start = start.max(covered_to + 1);
        if end >= start {
            selected += end - start + 1;
            covered_to = end;
        }
    }

    Ok(selected)
}

fn parse_page(value: &str, token: &str) -> Result<u32, PageRangeError> {
    value
        .trim()
        .parse()
        .map_err(|_| PageRangeError::Malformed(token.to_string()))
}

pub fn file_cost(
    prices: &PriceTable,
    options: PrintOptions,
    page_count_final: u32,
    copies: u32,
) -> Result<Decimal, PricingError> {
    let key = options.rate_key();
    let rate = prices.get(key).ok_or(PricingError::MissingRate(key))?;
    Ok(rate * Decimal::from(page_count_final) * Decimal::from(copies))
}

/// Largest amount a `DECIMAL(10,2)` cost column holds.
pub const MAX_STORED_COST: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// True when `cost` fits the cost columns: non-negative, at most
/// [`MAX_STORED_COST`] and no more than two decimal places.
pub fn is_storable_cost(cost: Decimal) -> bool {
    cost >= Decimal::ZERO && cost <= MAX_STORED_COST && cost.normalize().scale() <= 2
}

/// Exact sum of `costs`, or `None` when it overflows.
pub fn total_cost(costs: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    costs
        .into_iter()
        .try_fold(Decimal::ZERO, |total, cost| total.checked_add(cost))
}

/// Recomputes a submitted file's final page count and cost from the price table.
///
/// Costs are compared at two decimal places, the precision they are stored with.
pub fn verify_file(prices: &PriceTable, file: &NewPrintFile) -> Result<(), CostMismatch> {
    let page_count = u32::try_from(file.page_count_original).unwrap_or(0);
    let expected_pages =
        parse_page_range(&file.page_range, page_count).map_err(PricingError::from)?;
    if i64::from(expected_pages) != i64::from(file.page_count_final) {
        return Err(CostMismatch::PageCount {
            range: file.page_range.clone(),
            expected: expected_pages,
            supplied: file.page_count_final,
        });
    }

    let options = PrintOptions {
        color: file.print_color,
        duplex: file.print_duplex,
    };
    let copies = u32::try_from(file.copies).unwrap_or(0);
    let expected = file_cost(prices, options, expected_pages, copies)?.round_dp(2);
    let supplied = file.file_cost.round_dp(2);
    if expected != supplied {
        return Err(CostMismatch::Cost { expected, supplied });
    }

    Ok(())
}
