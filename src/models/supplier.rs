//! Supplier reference data.

use serde::{Deserialize, Serialize};

/// A supplier whose inventory page can be checked.
///
/// Read-only from the checker's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    /// Store-internal record identifier
    pub record_id: String,

    /// Display name, written to the product record when this supplier wins
    pub name: String,

    /// URL of the page checked for availability
    pub inventory_url: String,
}
