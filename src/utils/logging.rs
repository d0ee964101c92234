// ============================================================================
// Logging Setup
// fmt subscriber for binaries and demos embedding the calculator
// ============================================================================

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set, e.g.
/// `RUST_LOG=profit_split=debug` to see clamping and rejected tokens.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_logging("info");
        assert!(init_logging("debug").is_err());
    }
}
