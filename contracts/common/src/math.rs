/// Denominator for values expressed in basis points (1 bp = 0.01%).
pub const BPS_DENOMINATOR: i128 = 10_000;

/// `a * b / denominator`, truncating toward zero.
///
/// Returns `None` when the intermediate product overflows `i128` or the
/// denominator is zero. Callers map `None` onto their own overflow error so
/// that no accounting path ever wraps silently.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(denominator)
}

/// `a * b / denominator`, rounded away from zero when inexact.
///
/// Same failure modes as [`mul_div`].
pub fn mul_div_ceil(a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    let product = a.checked_mul(b)?;
    let quotient = product.checked_div(denominator)?;
    if product % denominator != 0 && (product > 0) == (denominator > 0) {
        return quotient.checked_add(1);
    }
    Some(quotient)
}

/// Portion of `amount` represented by `bps` basis points.
pub fn bps_of(amount: i128, bps: u32) -> Option<i128> {
    mul_div(amount, bps as i128, BPS_DENOMINATOR)
}
