//! ClawMark command-line tools.
//!
//! Two binaries share this crate: `clawmark` builds the site and `clawmark-og`
//! draws the Open Graph preview image.

use tracing_subscriber::{fmt, EnvFilter};

pub mod commands;

/// Install the log subscriber used by both binaries.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();
}
