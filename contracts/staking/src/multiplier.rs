use soroban_sdk::{contracttype, Env, Vec};

use crate::errors::ContractError;

/// 1.0 in multiplier fixed point.
pub const MULTIPLIER_ONE: u32 = 1_000_000;

pub const DAY: u64 = 86_400;

// ── Types ───────────────────────────────────────────────────────────────────

/// A breakpoint of the staking multiplier curve: from `after` seconds of
/// uninterrupted staking the holder may claim `multiplier / MULTIPLIER_ONE`
/// of their raw entitlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiplierPoint {
    pub after: u64,
    pub multiplier: u32,
}

/// Piecewise-linear, non-decreasing curve mapping time since the position's
/// clock last restarted to a multiplier.
///
/// Below the first breakpoint the multiplier is zero. Between two breakpoints
/// it is interpolated linearly per second. From the last breakpoint on it is
/// pinned at `MULTIPLIER_ONE`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultiplierCurve {
    pub points: Vec<MultiplierPoint>,
}

/// How much of the accrued entitlement a position may claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RewardMode {
    /// Every position claims its full entitlement immediately.
    Flat,
    /// Claims are scaled by a time-weighted multiplier.
    TimeWeighted(MultiplierCurve),
}

// ── Curve ───────────────────────────────────────────────────────────────────

impl MultiplierCurve {
    /// 0 for the first week, 0.5 → 0.75 between day 7 and day 180,
    /// 0.75 → 1.0 between day 180 and day 365, 1.0 afterwards.
    pub fn default_curve(env: &Env) -> Self {
        MultiplierCurve {
            points: Vec::from_array(
                env,
                [
                    MultiplierPoint {
                        after: 7 * DAY,
                        multiplier: MULTIPLIER_ONE / 2,
                    },
                    MultiplierPoint {
                        after: 180 * DAY,
                        multiplier: MULTIPLIER_ONE / 4 * 3,
                    },
                    MultiplierPoint {
                        after: 365 * DAY,
                        multiplier: MULTIPLIER_ONE,
                    },
                ],
            ),
        }
    }

    /// Reject curves that are empty, unordered, decreasing, out of range, or
    /// that never reach `MULTIPLIER_ONE`.
    pub fn validate(&self) -> Result<(), ContractError> {
        let mut prev: Option<MultiplierPoint> = None;
        for point in self.points.iter() {
            if point.multiplier > MULTIPLIER_ONE {
                return Err(ContractError::InvalidMultiplierCurve);
            }
            if let Some(p) = &prev {
                if point.after <= p.after || point.multiplier < p.multiplier {
                    return Err(ContractError::InvalidMultiplierCurve);
                }
            }
            prev = Some(point);
        }
        match prev {
            Some(last) if last.multiplier == MULTIPLIER_ONE => Ok(()),
            _ => Err(ContractError::InvalidMultiplierCurve),
        }
    }

    pub fn multiplier_at(&self, elapsed: u64) -> u32 {
        let mut prev: Option<MultiplierPoint> = None;
        for point in self.points.iter() {
            if elapsed < point.after {
                return match prev {
                    None => 0,
                    Some(p) => interpolate(&p, &point, elapsed),
                };
            }
            prev = Some(point);
        }
        match prev {
            Some(last) => last.multiplier,
            None => MULTIPLIER_ONE,
        }
    }
}

impl RewardMode {
    pub fn validate(&self) -> Result<(), ContractError> {
        match self {
            RewardMode::Flat => Ok(()),
            RewardMode::TimeWeighted(curve) => curve.validate(),
        }
    }

    pub fn multiplier_at(&self, elapsed: u64) -> u32 {
        match self {
            RewardMode::Flat => MULTIPLIER_ONE,
            RewardMode::TimeWeighted(curve) => curve.multiplier_at(elapsed),
        }
    }
}

/// Linear interpolation between `lo` and `hi`, truncating. Requires
/// `lo.after <= elapsed < hi.after`.
fn interpolate(lo: &MultiplierPoint, hi: &MultiplierPoint, elapsed: u64) -> u32 {
    let rise = (hi.multiplier - lo.multiplier) as u128;
    let run = (hi.after - lo.after) as u128;
    let progress = (elapsed - lo.after) as u128;
    lo.multiplier + (rise * progress / run) as u32
}
