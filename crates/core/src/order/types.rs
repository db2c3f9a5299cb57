//! Sale order domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use kontor_shared::types::{ProductId, TaxRateId};

/// Operational status of a sale order.
///
/// Advances independently of the approval chain; `confirm` is gated on the
/// order being approved. The valid transitions are:
/// - Draft → Confirmed (confirm, requires approval)
/// - Confirmed → Shipped (ship)
/// - Shipped → Completed (complete)
/// - Draft | Confirmed → Cancelled (cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order is being drafted.
    Draft,
    /// Order is confirmed and ready for fulfilment and invoicing.
    Confirmed,
    /// Goods have left the warehouse.
    Shipped,
    /// Order fully delivered.
    Completed,
    /// Order cancelled before shipment.
    Cancelled,
}

impl OrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sale order line as entered by the user.
///
/// `tax_rate` is a fraction (0.10 = 10%), resolved from the tax-rate master
/// at entry time so the line is self-contained once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product being sold.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Unit price at order time.
    pub unit_price: Decimal,
    /// The tax rate applied to the line.
    pub tax_rate_id: TaxRateId,
    /// Tax rate as a fraction (0.10 = 10%).
    pub tax_rate: Decimal,
}

/// A line with its computed amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// The source line.
    pub line: OrderLine,
    /// quantity × unit price.
    pub line_total: Decimal,
    /// line total × (1 + tax rate), rounded to cents.
    pub line_total_after_tax: Decimal,
}

/// Document-level totals summed from priced lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line totals before tax.
    pub total_before_tax: Decimal,
    /// Sum of line tax amounts.
    pub total_tax: Decimal,
    /// Sum of line totals after tax.
    pub total_after_tax: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Draft,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("unknown"), None);
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(format!("{}", OrderStatus::Confirmed), "confirmed");
    }
}
