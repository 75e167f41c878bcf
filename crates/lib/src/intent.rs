//! Intent: the closed set of outcomes the classifier can produce.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the sender of a message wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    /// Asking about a product or its price.
    ProductInquiry,
    /// Asking to book or reserve.
    Reservation,
    /// Saying hello.
    Greeting,
    /// Nothing matched; routed to the fallback handler.
    Unknown,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 4] = [
        Intent::ProductInquiry,
        Intent::Reservation,
        Intent::Greeting,
        Intent::Unknown,
    ];

    /// Stable label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::ProductInquiry => "product_inquiry",
            Intent::Reservation => "reservation",
            Intent::Greeting => "greeting",
            Intent::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
