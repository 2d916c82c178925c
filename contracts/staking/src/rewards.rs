use common::math::{mul_div, mul_div_ceil};

use crate::multiplier::MULTIPLIER_ONE;

/// Fixed-point scaling factor for `acc_reward_per_share`.
///
/// 10^12 keeps sub-unit precision for 7-decimal Stellar assets while leaving
/// headroom in `i128` for `amount × acc` products.
pub const PRECISION: i128 = 1_000_000_000_000;

// ── Accumulator ─────────────────────────────────────────────────────────────

/// Fold newly arrived rewards into the per-share accumulator.
///
/// ```text
/// acc' = acc + delta × PRECISION / total_staked
/// ```
///
/// Nothing is distributed while `total_staked` is zero or `delta` is not
/// positive; the caller keeps the undistributed balance for the next update.
pub fn accrue(acc: i128, delta: i128, total_staked: i128) -> Option<i128> {
    if total_staked <= 0 || delta <= 0 {
        return Some(acc);
    }
    acc.checked_add(mul_div(delta, PRECISION, total_staked)?)
}

/// `⌈amount × acc / PRECISION⌉`, the reward debt of a freshly synced position.
///
/// Debt rounds up and entitlement rounds down, so a position never accrues a
/// unit the accumulator did not fund.
pub fn debt_for(amount: i128, acc: i128) -> Option<i128> {
    mul_div_ceil(amount, acc, PRECISION)
}

/// Raw entitlement accumulated since the multiplier clock last restarted.
///
/// ```text
/// accrued_now = accrued + ⌊amount × acc / PRECISION⌋ − reward_debt
/// ```
pub fn accrued_now(accrued: i128, amount: i128, acc: i128, reward_debt: i128) -> Option<i128> {
    let gross = mul_div(amount, acc, PRECISION)?;
    accrued.checked_add(gross.checked_sub(reward_debt)?.max(0))
}

/// What the holder may take out of `accrued_now` at `multiplier`.
///
/// `claimed` was measured against an earlier (never larger) multiplier, so
/// a rising multiplier releases previously discounted rewards.
pub fn claimable(accrued_now: i128, claimed: i128, multiplier: u32) -> Option<i128> {
    let vested = mul_div(accrued_now, multiplier as i128, MULTIPLIER_ONE as i128)?;
    Some(vested.saturating_sub(claimed).max(0))
}

/// Outcome of settling one (user, reward token) record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    /// Transferred to the user.
    pub paid: i128,
    /// Moved into the token's forgone pool.
    pub forgone: i128,
    /// New `accrued` for the record.
    pub accrued: i128,
    /// New `claimed` for the record.
    pub claimed: i128,
}

/// Pay what the multiplier allows and decide what happens to the rest.
///
/// With `restart` the multiplier clock starts over, so the unclaimable
/// remainder is forgone and the epoch counters go back to zero. Otherwise
/// the remainder stays with the holder and may be claimed later.
pub fn settle(
    accrued_now: i128,
    claimed: i128,
    multiplier: u32,
    restart: bool,
) -> Option<Settlement> {
    let paid = claimable(accrued_now, claimed, multiplier)?;
    let claimed_after = claimed.checked_add(paid)?;

    if restart {
        return Some(Settlement {
            paid,
            forgone: accrued_now.checked_sub(claimed_after)?.max(0),
            accrued: 0,
            claimed: 0,
        });
    }

    // Fully claimed epochs collapse back to zero.
    if claimed_after >= accrued_now {
        return Some(Settlement {
            paid,
            ..Settlement::default()
        });
    }

    Some(Settlement {
        paid,
        forgone: 0,
        accrued: accrued_now,
        claimed: claimed_after,
    })
}

/// Pro-rata slice of the forgone pool for a holder of `amount` out of
/// `total_staked`. Never exceeds `forgone`.
pub fn extra_share(forgone: i128, amount: i128, total_staked: i128) -> Option<i128> {
    if forgone <= 0 || amount <= 0 || total_staked <= 0 {
        return Some(0);
    }
    Some(mul_div(forgone, amount, total_staked)?.min(forgone))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
