//! Logging initialization
//!
//! Provides a single initialization point for the `tracing` subscriber used by
//! binaries built on this crate. Library code only emits events.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output with debug level
    Development,
    /// JSON structured output with info level
    Production,
    /// Human-readable output with info level (default for the CLI)
    Quiet,
    /// No output; installs an empty registry
    Test,
}

impl Profile {
    fn default_filter(self) -> &'static str {
        match self {
            Profile::Development => "transback=debug,transback_core=debug",
            Profile::Production | Profile::Quiet => "transback=info,transback_core=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize logging once per process; later calls are no-ops.
///
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));

        // try_init: another subscriber may already be installed (e.g. by a test harness)
        let _ = match profile {
            Profile::Development | Profile::Quiet => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
