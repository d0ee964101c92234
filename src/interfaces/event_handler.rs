// ============================================================================
// Event Handler Interface
// Defines the contract for observing calculator state changes
// ============================================================================

use crate::domain::{CalculatorState, HoldingsStatus, ProfitResult, StateField};
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the calculator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalculatorEvent {
    /// A field was edited through text input
    FieldUpdated {
        field: StateField,
        raw: String,
        /// In-progress text ("" or "-") that counts as zero
        transient: bool,
        timestamp: DateTime<Utc>,
    },

    /// The whole state was replaced (loaded from a link, reset, ...)
    StateReplaced {
        state: CalculatorState,
        timestamp: DateTime<Utc>,
    },

    /// Entered holdings are invalid or leave the major holder too few shares
    HoldingsFlagged {
        status: HoldingsStatus,
        timestamp: DateTime<Utc>,
    },

    /// Share counts were corrected to keep minor <= major <= pool
    HoldingsClamped {
        before: CalculatorState,
        after: CalculatorState,
        timestamp: DateTime<Utc>,
    },

    /// A valid split was computed
    ResultComputed {
        result: ProfitResult,
        timestamp: DateTime<Utc>,
    },

    /// The current inputs cannot produce a split
    InvalidInput {
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl CalculatorEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            CalculatorEvent::FieldUpdated { timestamp, .. }
            | CalculatorEvent::StateReplaced { timestamp, .. }
            | CalculatorEvent::HoldingsFlagged { timestamp, .. }
            | CalculatorEvent::HoldingsClamped { timestamp, .. }
            | CalculatorEvent::ResultComputed { timestamp, .. }
            | CalculatorEvent::InvalidInput { timestamp, .. } => *timestamp,
        }
    }
}

/// Event handler trait for processing calculator events
/// Implementations can re-render results, persist share links (debounced), etc.
pub trait EventHandler: Send + Sync {
    /// Handle a calculator event
    fn on_event(&self, event: CalculatorEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<CalculatorEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: CalculatorEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: CalculatorEvent) {
        tracing::debug!("Calculator event: {:?}", event);
    }
}
