//! Line and document total computation.
//!
//! Amounts are `Decimal` throughout; per-line after-tax amounts are rounded
//! to cents (commercial rounding) and document totals are sums of the
//! rounded lines, so a document recomputed from its lines always matches
//! what was stored line by line.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::order::error::OrderError;
use crate::order::types::{DocumentTotals, OrderLine, PricedLine};

/// Computes the amounts for a single line.
///
/// # Errors
///
/// Returns an error if quantity is not positive, unit price is negative,
/// or the tax rate is negative.
pub fn price_line(line: &OrderLine) -> Result<PricedLine, OrderError> {
    if line.quantity <= Decimal::ZERO {
        return Err(OrderError::InvalidQuantity {
            quantity: line.quantity,
        });
    }
    if line.unit_price < Decimal::ZERO {
        return Err(OrderError::InvalidUnitPrice {
            unit_price: line.unit_price,
        });
    }
    if line.tax_rate < Decimal::ZERO {
        return Err(OrderError::InvalidTaxRate {
            tax_rate: line.tax_rate,
        });
    }

    let line_total = line.quantity * line.unit_price;
    let line_total_after_tax = (line_total * (Decimal::ONE + line.tax_rate))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PricedLine {
        line: line.clone(),
        line_total,
        line_total_after_tax,
    })
}

/// Sums document totals from priced lines.
#[must_use]
pub fn document_totals(lines: &[PricedLine]) -> DocumentTotals {
    let total_before_tax: Decimal = lines.iter().map(|l| l.line_total).sum();
    let total_after_tax: Decimal = lines.iter().map(|l| l.line_total_after_tax).sum();

    DocumentTotals {
        total_before_tax,
        total_tax: total_after_tax - total_before_tax,
        total_after_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontor_shared::types::{ProductId, TaxRateId};
    use rust_decimal_macros::dec;

    fn line(quantity: Decimal, unit_price: Decimal, tax_rate: Decimal) -> OrderLine {
        OrderLine {
            product_id: ProductId::new(),
            quantity,
            unit_price,
            tax_rate_id: TaxRateId::new(),
            tax_rate,
        }
    }

    #[test]
    fn test_price_line_basic() {
        let priced = price_line(&line(dec!(2), dec!(500), dec!(0.10))).unwrap();
        assert_eq!(priced.line_total, dec!(1000));
        assert_eq!(priced.line_total_after_tax, dec!(1100.00));
    }

    #[test]
    fn test_price_line_rounds_to_cents() {
        // 3 × 3.33 = 9.99; 9.99 × 1.07 = 10.6893 → 10.69
        let priced = price_line(&line(dec!(3), dec!(3.33), dec!(0.07))).unwrap();
        assert_eq!(priced.line_total, dec!(9.99));
        assert_eq!(priced.line_total_after_tax, dec!(10.69));
    }

    #[test]
    fn test_price_line_rejects_zero_quantity() {
        let result = price_line(&line(dec!(0), dec!(500), dec!(0.10)));
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_price_line_rejects_negative_price() {
        let result = price_line(&line(dec!(1), dec!(-5), dec!(0.10)));
        assert!(matches!(result, Err(OrderError::InvalidUnitPrice { .. })));
    }

    #[test]
    fn test_price_line_rejects_negative_tax() {
        let result = price_line(&line(dec!(1), dec!(5), dec!(-0.10)));
        assert!(matches!(result, Err(OrderError::InvalidTaxRate { .. })));
    }

    #[test]
    fn test_document_totals_two_lines_ten_percent() {
        // qty 2 @ 500 and qty 1 @ 2000, both 10% tax
        let lines = vec![
            price_line(&line(dec!(2), dec!(500), dec!(0.10))).unwrap(),
            price_line(&line(dec!(1), dec!(2000), dec!(0.10))).unwrap(),
        ];
        let totals = document_totals(&lines);
        assert_eq!(totals.total_before_tax, dec!(3000));
        assert_eq!(totals.total_tax, dec!(300.00));
        assert_eq!(totals.total_after_tax, dec!(3300.00));
    }

    #[test]
    fn test_document_totals_identity() {
        let lines = vec![
            price_line(&line(dec!(7), dec!(19.99), dec!(0.11))).unwrap(),
            price_line(&line(dec!(1), dec!(0.03), dec!(0.25))).unwrap(),
            price_line(&line(dec!(13), dec!(250), dec!(0))).unwrap(),
        ];
        let totals = document_totals(&lines);
        assert_eq!(
            totals.total_before_tax + totals.total_tax,
            totals.total_after_tax
        );
        let line_sum: Decimal = lines.iter().map(|l| l.line_total_after_tax).sum();
        assert_eq!(totals.total_after_tax, line_sum);
    }

    #[test]
    fn test_document_totals_empty() {
        let totals = document_totals(&[]);
        assert_eq!(totals.total_before_tax, Decimal::ZERO);
        assert_eq!(totals.total_tax, Decimal::ZERO);
        assert_eq!(totals.total_after_tax, Decimal::ZERO);
    }
}
