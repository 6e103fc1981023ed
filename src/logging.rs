//! Diagnostic logging setup shared by the binaries
//!
//! Diagnostics go to stderr so stdout only ever carries the report.

use tracing_subscriber::EnvFilter;

/// Level used for a given number of `-v` flags
#[must_use]
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install a stderr subscriber; `RUST_LOG` takes precedence over `verbosity`
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("kernel_splitter={}", level_for(verbosity)))
    });

    // A subscriber may already be installed when embedded in another tool.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "debug");
    }
}
