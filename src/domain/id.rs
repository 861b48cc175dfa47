//! Domain identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor-assigned subscription identifier.
///
/// Unique within one subscription listing; used verbatim in the reset
/// endpoint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(i64);

impl SubscriptionId {
    /// Create a new `SubscriptionId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubscriptionId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_raw_value() {
        assert_eq!(SubscriptionId::new(4021).to_string(), "4021");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&SubscriptionId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
