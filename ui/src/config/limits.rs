/// Bounds for the theme lookup timeout (seconds)
pub const MIN_LOOKUP_TIMEOUT_SECS: u64 = 1;
pub const MAX_LOOKUP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Bounds for the resolution cache TTL (seconds)
pub const MIN_CACHE_TTL_SECS: u64 = 1;
pub const MAX_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Simulated provider latency (milliseconds)
pub const DEFAULT_LATENCY_MIN_MS: u64 = 50;
pub const DEFAULT_LATENCY_MAX_MS: u64 = 150;
pub const MAX_LATENCY_MS: u64 = 5000;
