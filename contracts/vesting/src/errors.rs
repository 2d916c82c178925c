/// Errors returned by the vesting contract.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VestingError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    Unauthorized = 10,

    /// Allocation or claim amount not strictly positive.
    InvalidAmount = 20,
    /// `beneficiaries` and `amounts` differ in length.
    LengthMismatch = 21,
    InvalidDuration = 22,

    /// Outstanding allocations would exceed the tokens held.
    InsufficientFunding = 30,

    /// Nothing has been released to the beneficiary yet.
    NothingVested = 40,
    /// Claim larger than what is currently releasable.
    ExceedsVested = 41,

    ArithmeticOverflow = 50,
}
