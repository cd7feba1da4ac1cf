use rust_decimal::Decimal;

/// Lifetime of a session cookie, in days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Lifetime of a refresh token, in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// `Max-Age` of the session cookie (7 days).
pub const SESSION_MAX_AGE_SECS: u64 = 604_800;

/// `Max-Age` of the refresh-token cookie (30 days).
pub const REFRESH_TOKEN_MAX_AGE_SECS: u64 = 2_592_000;

/// Number of random bytes in a raw refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Default page size for transaction listings
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on a requested page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Unpaid recurring bills due within this many days count as "due soon"
pub const DUE_SOON_WINDOW_DAYS: u32 = 5;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Largest magnitude accepted for a single amount (one trillion)
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);
