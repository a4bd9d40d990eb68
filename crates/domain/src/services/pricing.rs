//! Payment and quote arithmetic.
//!
//! All amounts are integer rupees. Discount divisions truncate toward zero,
//! which matches how the amounts were historically displayed (no paise, no
//! rounding).

use serde::Serialize;

/// Promo code granting the promotional discount, matched case-insensitively.
pub const PROMO_CODE: &str = "BHAKTI20";

/// Package discount applies when more than this many services are selected.
const PACKAGE_DISCOUNT_MIN_ITEMS: usize = 3;

/// Clamps a requested payment amount into `[0, total]`.
pub fn clamp_payment(requested: i64, total: i64) -> i64 {
    requested.clamp(0, total)
}

/// Outstanding balance after a payment; by construction non-negative when
/// `paid` has been clamped.
pub fn balance_due(total: i64, paid: i64) -> i64 {
    total - paid
}

/// An itemized event-planner quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerQuote {
    pub subtotal: i64,
    pub package_discount: i64,
    pub promo_discount: i64,
    pub total: i64,
}

/// Computes a quote over the selected providers' base prices.
///
/// - 10% package discount when more than two services are in the cart.
/// - 20% promo discount iff the promo code equals [`PROMO_CODE`]
///   (case-insensitively).
pub fn quote(base_prices: &[i64], promo_code: Option<&str>) -> PlannerQuote {
    let subtotal: i64 = base_prices.iter().sum();

    let package_discount = if base_prices.len() >= PACKAGE_DISCOUNT_MIN_ITEMS {
        subtotal / 10
    } else {
        0
    };

    let promo_discount = match promo_code {
        Some(code) if code.trim().eq_ignore_ascii_case(PROMO_CODE) => subtotal / 5,
        _ => 0,
    };

    PlannerQuote {
        subtotal,
        package_discount,
        promo_discount,
        total: subtotal - package_discount - promo_discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_payment_within_range() {
        assert_eq!(clamp_payment(3000, 5000), 3000);
        assert_eq!(clamp_payment(5000, 5000), 5000);
        assert_eq!(clamp_payment(0, 5000), 0);
    }

    #[test]
    fn test_clamp_payment_out_of_range() {
        assert_eq!(clamp_payment(7000, 5000), 5000);
        assert_eq!(clamp_payment(-100, 5000), 0);
    }

    #[test]
    fn test_balance_due_exact() {
        assert_eq!(balance_due(5000, 3000), 2000);
        assert_eq!(balance_due(5000, 5000), 0);
    }

    #[test]
    fn test_balance_never_negative_after_clamp() {
        for requested in [-500, 0, 2500, 5000, 9999] {
            let paid = clamp_payment(requested, 5000);
            assert!(paid >= 0 && paid <= 5000);
            assert!(balance_due(5000, paid) >= 0);
        }
    }

    #[test]
    fn test_quote_no_discounts() {
        let q = quote(&[5000], None);
        assert_eq!(q.subtotal, 5000);
        assert_eq!(q.package_discount, 0);
        assert_eq!(q.promo_discount, 0);
        assert_eq!(q.total, 5000);
    }

    #[test]
    fn test_quote_package_discount_needs_more_than_two_items() {
        assert_eq!(quote(&[1000, 2000], None).package_discount, 0);
        let q = quote(&[1000, 2000, 3000], None);
        assert_eq!(q.subtotal, 6000);
        assert_eq!(q.package_discount, 600);
        assert_eq!(q.total, 5400);
    }

    #[test]
    fn test_quote_promo_discount_case_insensitive() {
        let q = quote(&[5000], Some("bhakti20"));
        assert_eq!(q.promo_discount, 1000);
        assert_eq!(q.total, 4000);

        assert_eq!(quote(&[5000], Some("DIWALI50")).promo_discount, 0);
    }

    #[test]
    fn test_quote_both_discounts_stack() {
        let q = quote(&[2000, 3000, 5000], Some("BHAKTI20"));
        assert_eq!(q.subtotal, 10000);
        assert_eq!(q.package_discount, 1000);
        assert_eq!(q.promo_discount, 2000);
        assert_eq!(q.total, 7000);
    }

    #[test]
    fn test_quote_empty_cart() {
        let q = quote(&[], Some(PROMO_CODE));
        assert_eq!(q.subtotal, 0);
        assert_eq!(q.total, 0);
    }
}
