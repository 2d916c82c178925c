/// Errors returned by the staking ledger.
///
/// # Code ranges
/// | Range   | Purpose                                   |
/// |---------|-------------------------------------------|
/// | 1 – 9   | Lifecycle                                 |
/// | 10 – 19 | Authorization                             |
/// | 20 – 29 | Invalid arguments                         |
/// | 30 – 39 | Policy violations                         |
/// | 40 – 49 | Ineligible claims                         |
/// | 50 – 59 | Arithmetic faults                         |
///
/// An invocation that returns any of these commits no state.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Deposits and withdrawals are halted; emergency withdraw stays open.
    Paused = 3,

    // ── Authorization (10–19) ────────────────────────────────
    /// Caller lacks the admin tier required by the operation.
    Unauthorized = 10,
    /// `accept_admin` / `cancel_admin_transfer` without a proposal.
    NoPendingAdmin = 11,

    // ── Invalid arguments (20–29) ────────────────────────────
    /// Negative token amount.
    InvalidAmount = 20,
    /// Withdrawal larger than the staked principal.
    InsufficientBalance = 21,

    // ── Policy violations (30–39) ────────────────────────────
    /// Deposit fee above `MAX_DEPOSIT_FEE_BPS`.
    FeeTooHigh = 30,
    RewardTokenAlreadyRegistered = 31,
    /// The staking token can never be a reward token.
    RewardTokenIsStakingToken = 32,
    RewardTokenNotRegistered = 33,
    /// Staking token or a current/former reward token.
    TokenNotSweepable = 34,
    InvalidMultiplierCurve = 35,
    InvalidConfig = 36,

    // ── Ineligible claims (40–49) ────────────────────────────
    /// Extra rewards need a non-empty position at full multiplier.
    NotEligibleForExtraRewards = 40,

    // ── Arithmetic (50–59) ───────────────────────────────────
    /// A fixed-point product or sum left the `i128` range.
    ArithmeticOverflow = 50,
}
