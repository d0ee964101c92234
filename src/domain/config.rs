// ============================================================================
// Calculator Configuration
// Tunable constants for the share pool and holdings checks
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum shares the major holder keeps uncommitted once a minor
/// allocation exists.
pub const DEFAULT_MIN_RESERVE: u32 = 5;

/// Conventional size of the share pool.
pub const DEFAULT_TOTAL_SHARES: u32 = 130;

/// Configuration for a [`Calculator`](crate::engine::Calculator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    /// Reserve the major holder must keep once any minor allocation exists
    pub min_reserve: u32,

    /// Share pool size used for freshly created calculators
    /// Loaded states keep their own pool size
    pub total_shares: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            min_reserve: DEFAULT_MIN_RESERVE,
            total_shares: DEFAULT_TOTAL_SHARES,
        }
    }
}

impl CalculatorConfig {
    /// Create a configuration with explicit values
    pub fn new(min_reserve: u32, total_shares: u32) -> Self {
        Self {
            min_reserve,
            total_shares,
        }
    }

    /// Builder method: Set the minimum reserve
    pub fn with_min_reserve(mut self, min_reserve: u32) -> Self {
        self.min_reserve = min_reserve;
        self
    }

    /// Builder method: Set the share pool size
    pub fn with_total_shares(mut self, total_shares: u32) -> Self {
        self.total_shares = total_shares;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.total_shares == 0 {
            return Err("Total shares must be positive".to_string());
        }

        if self.min_reserve > self.total_shares {
            return Err(format!(
                "Minimum reserve {} cannot exceed total shares {}",
                self.min_reserve, self.total_shares
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.min_reserve, 5);
        assert_eq!(config.total_shares, 130);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = CalculatorConfig::default()
            .with_min_reserve(10)
            .with_total_shares(200);

        assert_eq!(config, CalculatorConfig::new(10, 200));
    }

    #[test]
    fn test_validation() {
        assert!(CalculatorConfig::default()
            .with_total_shares(0)
            .validate()
            .is_err());

        let err = CalculatorConfig::new(50, 40).validate().unwrap_err();
        assert!(err.contains("cannot exceed"));

        assert!(CalculatorConfig::new(0, 1).validate().is_ok());
    }
}
