use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Captured on first access during startup; the health report derives
/// uptime from it.
pub static BOOT_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
