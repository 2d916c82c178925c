//! Shared building blocks for the staking contract suite.
//!
//! - [`admin_tiers`]: tiered admin registry used as the authorization gate
//!   for every admin-only entry point.
//! - [`math`]: checked fixed-point helpers (`mul_div`, basis points).

#![cfg_attr(not(feature = "std"), no_std)]

pub mod admin_tiers;
pub mod math;

pub use admin_tiers::AdminTier;
