use soroban_sdk::{contracttype, Address, Env};

const DAY_IN_LEDGERS: u32 = 17_280;
const TTL_THRESHOLD: u32 = 29 * DAY_IN_LEDGERS;
const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;

// ── Storage keys ─────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum TierKey {
    /// The primary SuperAdmin, i.e. the owner of the contract.
    Primary,
    /// Tier assigned to a single address.
    Tier(Address),
}

// ── Admin tier enum ──────────────────────────────────────────────────────────

/// Admin hierarchy shared by the staking and vesting contracts.
///
/// - `SuperAdmin`    – everything, including granting and revoking tiers.
/// - `ContractAdmin` – ledger administration: reward-token registry,
///                     deposit fee, fee collector, sweeping stray tokens.
/// - `OperatorAdmin` – pause / unpause only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// True if this tier grants at least the permissions of `min_tier`.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Assign `tier` to `admin`, replacing any previous tier.
/// Callers must have verified authorization beforehand.
pub fn set_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = TierKey::Tier(admin.clone());
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage()
        .persistent()
        .get(&TierKey::Tier(admin.clone()))
}

pub fn clear_tier(env: &Env, admin: &Address) {
    env.storage()
        .persistent()
        .remove(&TierKey::Tier(admin.clone()));
}

/// Whether `caller` holds `min_tier` or better.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    match get_tier(env, caller) {
        Some(tier) => tier.has_at_least(min_tier),
        None => false,
    }
}

// ── Primary admin ────────────────────────────────────────────────────────────

/// Record `admin` as the primary SuperAdmin. Used on initialization and when a
/// two-step ownership transfer completes.
pub fn set_primary(env: &Env, admin: &Address) {
    env.storage().instance().set(&TierKey::Primary, admin);
    set_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn primary(env: &Env) -> Option<Address> {
    env.storage().instance().get(&TierKey::Primary)
}

// ── Grant / revoke ───────────────────────────────────────────────────────────

/// Grant `tier` to `target` on behalf of `caller`.
///
/// Returns `false` without touching storage unless `caller` is a SuperAdmin.
pub fn promote(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_tier(env, target, tier);
    true
}

/// Revoke every tier held by `target` on behalf of `caller`.
///
/// Returns `false` unless `caller` is a SuperAdmin. The primary admin cannot
/// be demoted; ownership moves only through the two-step transfer.
pub fn demote(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    if primary(env).as_ref() == Some(target) {
        return false;
    }
    clear_tier(env, target);
    true
}
