/// Currency recorded on donations and expenses when the caller does not
/// provide one. The tag is descriptive only; allocation never matches on it.
pub const DEFAULT_CURRENCY: &str = "SYP";

/// Delay before a simulated payment flips from PENDING to CONFIRMED.
pub const SIMULATED_CONFIRMATION_DELAY_SECS: u64 = 3;
