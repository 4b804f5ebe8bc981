// Centralized Circle Constants

// Bounds
// ======

/// Largest number of seats a single circle may have.
/// Bounded so the Circle and RoundLedger accounts stay well under the
/// 10 KiB limit for accounts created through CPI.
pub const MAX_CIRCLE_SIZE: u8 = 24;

/// Member records kept per circle, including soft-removed ones.
/// Members who leave while forming keep their record for audit history.
pub const MAX_MEMBER_RECORDS: usize = 48;

/// Maximum byte length of a circle name.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum identities in a circle's trust list.
pub const MAX_TRUSTED: usize = 64;

/// Maximum byte length of a dispute reason.
pub const MAX_DISPUTE_REASON_LEN: usize = 64;

// Arithmetic
// ==========

/// Denominator for every `_x10000` rate (basis points).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Rounds are configured in days and evaluated against unix timestamps.
pub const SECONDS_PER_DAY: i64 = 86_400;

// Versions
// ========

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First id handed out by a fresh registry.
pub const INITIAL_CIRCLE_ID: u64 = 0;
