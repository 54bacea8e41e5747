// src/services/classifier.rs

//! Availability classification over raw supplier page text.
//!
//! Two named pattern sets are matched against the page: out-of-stock
//! indicators and in-stock indicators. The decision rule is deliberate:
//! a page counts as out of stock only when an out-of-stock pattern matches
//! and no in-stock pattern does. Every other case, including no match at
//! all and both sets matching, counts as in stock, so an unmatched or
//! ambiguous page never blocks a sale.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Classification result for a supplier page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    InStock,
    OutOfStock,
}

/// Common "out of stock" indicators.
static OUT_OF_STOCK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"out of stock",
        r"sold out",
        r"unavailable",
        r"not available",
        r"temporarily unavailable",
        r"back in stock soon",
        r"notify me",
        r"email when available",
        r"currently unavailable",
        r"stock: 0",
        r"quantity: 0",
        r"inventory-status.*out",
    ])
});

/// Common "in stock" indicators.
static IN_STOCK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"in stock",
        r"add to cart",
        r"buy now",
        r"available now",
        r"ships.*\d+.*days",
        r"\d+ in stock",
    ])
});

/// Waitlist phrasing that embeds the literal "in stock". Masked out before
/// the in-stock set runs, since "back in stock" announces a restock
/// waitlist, not availability.
static WAITLIST_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)back in stock").unwrap_or_else(|e| panic!("invalid waitlist pattern: {e}"))
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(&format!("(?i){p}")).unwrap_or_else(|e| {
                // Fixed literal patterns; a failure here is a programming error.
                panic!("invalid availability pattern {p:?}: {e}")
            })
        })
        .collect()
}

/// Classify raw page text as in stock or out of stock.
///
/// Pure function of the input: no markup assumption, no I/O. The input may
/// be arbitrary HTML or plain text of any size.
pub fn classify(page_text: &str) -> Verdict {
    let has_out_of_stock = OUT_OF_STOCK_PATTERNS.iter().any(|p| p.is_match(page_text));

    let masked: Cow<'_, str> = WAITLIST_PHRASE.replace_all(page_text, "");
    let has_in_stock = IN_STOCK_PATTERNS.iter().any(|p| p.is_match(&masked));

    if has_out_of_stock && !has_in_stock {
        return Verdict::OutOfStock;
    }

    // No match, in-stock only, or both: assume available.
    Verdict::InStock
}
