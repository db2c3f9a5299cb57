//! Business rule validation for ledger entries.

use rust_decimal::Decimal;

use crate::ledger::entry::EntryLine;
use crate::ledger::error::LedgerError;

/// Validates that a set of entry lines forms a postable double entry.
///
/// Checks, in order: the set is non-empty; every line carries exactly one
/// positive side; both sides are present; total debits equal total credits.
///
/// # Errors
///
/// Returns an error if the lines violate any double-entry rule.
pub fn validate_lines(lines: &[EntryLine]) -> Result<(), LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    let mut total_debits = Decimal::ZERO;
    let mut total_credits = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for line in lines {
        let debit_set = line.debit > Decimal::ZERO;
        let credit_set = line.credit > Decimal::ZERO;

        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO || debit_set == credit_set {
            return Err(LedgerError::InvalidLine);
        }

        if debit_set {
            total_debits += line.debit;
            has_debit = true;
        } else {
            total_credits += line.credit;
            has_credit = true;
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    if total_debits != total_credits {
        return Err(LedgerError::Unbalanced {
            debits: total_debits,
            credits: total_credits,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::entry::LedgerAccount;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balanced_invoice_entry() {
        // debit 1100 AR, credit 1000 Revenue, credit 100 Tax Payable
        let lines = vec![
            EntryLine::debit(LedgerAccount::AccountsReceivable, dec!(1100)),
            EntryLine::credit(LedgerAccount::Revenue, dec!(1000)),
            EntryLine::credit(LedgerAccount::TaxPayable, dec!(100)),
        ];
        assert!(validate_lines(&lines).is_ok());
    }

    #[test]
    fn test_unbalanced_entry() {
        let lines = vec![
            EntryLine::debit(LedgerAccount::AccountsReceivable, dec!(1100)),
            EntryLine::credit(LedgerAccount::Revenue, dec!(1000)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_no_lines() {
        assert!(matches!(validate_lines(&[]), Err(LedgerError::NoLines)));
    }

    #[test]
    fn test_single_sided() {
        let lines = vec![
            EntryLine::debit(LedgerAccount::Cash, dec!(100)),
            EntryLine::debit(LedgerAccount::AccountsReceivable, dec!(50)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::SingleSided)
        ));
    }

    #[test]
    fn test_zero_line_rejected() {
        let lines = vec![
            EntryLine::debit(LedgerAccount::Cash, dec!(0)),
            EntryLine::credit(LedgerAccount::Revenue, dec!(0)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InvalidLine)
        ));
    }

    #[test]
    fn test_both_sides_set_rejected() {
        let lines = vec![
            EntryLine {
                account: LedgerAccount::Cash,
                debit: dec!(100),
                credit: dec!(100),
            },
            EntryLine::credit(LedgerAccount::Revenue, dec!(100)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InvalidLine)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let lines = vec![
            EntryLine {
                account: LedgerAccount::Cash,
                debit: dec!(-100),
                credit: dec!(0),
            },
            EntryLine::credit(LedgerAccount::Revenue, dec!(100)),
        ];
        assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::InvalidLine)
        ));
    }

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// A debit mirrored by an equal credit always validates.
        #[test]
        fn prop_mirrored_amounts_balance(amount in amount_strategy()) {
            let lines = vec![
                EntryLine::debit(LedgerAccount::Cash, amount),
                EntryLine::credit(LedgerAccount::AccountsReceivable, amount),
            ];
            prop_assert!(validate_lines(&lines).is_ok());
        }

        /// Any split of a debit across two credits still balances.
        #[test]
        fn prop_split_credits_balance(a in amount_strategy(), b in amount_strategy()) {
            let lines = vec![
                EntryLine::debit(LedgerAccount::AccountsReceivable, a + b),
                EntryLine::credit(LedgerAccount::Revenue, a),
                EntryLine::credit(LedgerAccount::TaxPayable, b),
            ];
            prop_assert!(validate_lines(&lines).is_ok());
        }

        /// Any mismatch between the sides is rejected.
        #[test]
        fn prop_mismatch_rejected(amount in amount_strategy(), delta in amount_strategy()) {
            let lines = vec![
                EntryLine::debit(LedgerAccount::Cash, amount + delta),
                EntryLine::credit(LedgerAccount::Revenue, amount),
            ];
            let is_unbalanced = matches!(
                validate_lines(&lines),
                Err(LedgerError::Unbalanced { .. })
            );
            prop_assert!(is_unbalanced);
        }
    }
}
