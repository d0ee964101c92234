// ============================================================================
// Calculator
// Owns the input state and keeps result and invariants in step with it
// ============================================================================

use super::profit::{check_inputs, compute};
use crate::codec;
use crate::domain::holdings::{classify, with_invariant, HoldingsStatus};
use crate::domain::{CalculatorConfig, CalculatorState, ProfitResult, StateField};
use crate::interfaces::{CalculatorEvent, EventHandler};
use crate::numeric::parser;
use chrono::Utc;
use std::sync::Arc;

/// Stateful front for the pure core.
///
/// Every mutation goes through the same boundary: classify the holdings as
/// entered, apply the holdings invariant, recompute the split, report events.
/// Reads therefore always see a clamped state and a result that matches it,
/// while [`Calculator::holdings_status`] still reflects what was entered.
pub struct Calculator {
    /// Reserve and pool settings
    config: CalculatorConfig,

    /// Current (clamped) inputs
    state: CalculatorState,

    /// Split for `state`
    result: ProfitResult,

    /// Classification of the holdings before clamping
    holdings: HoldingsStatus,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl Calculator {
    /// Create a calculator over the sample inputs, sized to the configured pool
    pub fn new(
        config: CalculatorConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, String> {
        let state = CalculatorState::sample().with_total_shares(config.total_shares);
        Self::from_state(state, config, event_handler)
    }

    /// Create a calculator over explicit inputs
    pub fn from_state(
        state: CalculatorState,
        config: CalculatorConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, String> {
        config.validate()?;

        let holdings = classify(state.major_shares, state.minor_shares, config.min_reserve);
        let state = with_invariant(state);
        Ok(Self {
            config,
            state,
            result: compute(state),
            holdings,
            event_handler,
        })
    }

    /// Create a calculator from the parts of a share link, falling back to
    /// [`Calculator::new`] when neither the token nor the legacy query decodes.
    pub fn from_link(
        fragment: Option<&str>,
        query: Option<&str>,
        config: CalculatorConfig,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, String> {
        match codec::restore(fragment, query) {
            Some(state) => Self::from_state(state, config, event_handler),
            None => Self::new(config, event_handler),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Apply text typed into one field.
    ///
    /// Placeholder text while typing a negative profit ("" or "-") is
    /// reported as transient and counts as zero.
    pub fn set_field(&mut self, field: StateField, raw: &str) -> Vec<CalculatorEvent> {
        let mut events = vec![CalculatorEvent::FieldUpdated {
            field,
            raw: raw.to_string(),
            transient: field.is_signed() && parser::is_transient(raw),
            timestamp: Utc::now(),
        }];

        let candidate = self.state.with_field_text(field, raw);
        self.apply(candidate, &mut events);

        self.event_handler.on_events(events.clone());
        events
    }

    /// Replace the whole state
    pub fn set_state(&mut self, state: CalculatorState) -> Vec<CalculatorEvent> {
        let mut events = vec![CalculatorEvent::StateReplaced {
            state,
            timestamp: Utc::now(),
        }];

        self.apply(state, &mut events);

        self.event_handler.on_events(events.clone());
        events
    }

    /// Replace the state from a share link; `None` if nothing decodes, in
    /// which case the current state is kept.
    pub fn load_link(
        &mut self,
        fragment: Option<&str>,
        query: Option<&str>,
    ) -> Option<Vec<CalculatorEvent>> {
        codec::restore(fragment, query).map(|state| self.set_state(state))
    }

    /// State-transition boundary shared by every mutation
    fn apply(&mut self, candidate: CalculatorState, events: &mut Vec<CalculatorEvent>) {
        self.holdings = classify(
            candidate.major_shares,
            candidate.minor_shares,
            self.config.min_reserve,
        );
        if !self.holdings.is_clear() {
            events.push(CalculatorEvent::HoldingsFlagged {
                status: self.holdings.clone(),
                timestamp: Utc::now(),
            });
        }

        let clamped = with_invariant(candidate);
        if clamped != candidate {
            events.push(CalculatorEvent::HoldingsClamped {
                before: candidate,
                after: clamped,
                timestamp: Utc::now(),
            });
        }

        self.state = clamped;
        self.result = compute(clamped);

        if self.result.valid {
            events.push(CalculatorEvent::ResultComputed {
                result: self.result,
                timestamp: Utc::now(),
            });
        } else {
            let reason = match check_inputs(&clamped) {
                Err(reason) => reason,
                Ok(()) => "amounts out of range",
            };
            events.push(CalculatorEvent::InvalidInput {
                reason: reason.to_string(),
                timestamp: Utc::now(),
            });
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> CalculatorState {
        self.state
    }

    pub fn result(&self) -> ProfitResult {
        self.result
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Reserve classification of the holdings as last entered, before the
    /// invariant clamped them
    pub fn holdings_status(&self) -> &HoldingsStatus {
        &self.holdings
    }

    /// Share token for the current state
    pub fn share_token(&self) -> String {
        codec::encode(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holdings::MINOR_EXCEEDS_MAJOR;
    use crate::interfaces::NoOpEventHandler;
    use crate::numeric::Amount;
    use parking_lot::Mutex;

    /// Records every event it receives
    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<CalculatorEvent>>,
    }

    impl EventHandler for RecordingHandler {
        fn on_event(&self, event: CalculatorEvent) {
            self.events.lock().push(event);
        }
    }

    fn calculator() -> Calculator {
        Calculator::new(CalculatorConfig::default(), Arc::new(NoOpEventHandler)).unwrap()
    }

    #[test]
    fn test_new_uses_sample_inputs() {
        let calc = calculator();
        assert_eq!(calc.state(), CalculatorState::sample());
        assert!(calc.result().valid);
        assert_eq!(calc.result().total.to_grouped_string(2), "3,692,307.69");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Calculator::new(
            CalculatorConfig::default().with_total_shares(0),
            Arc::new(NoOpEventHandler),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_set_field_recomputes() {
        let mut calc = calculator();
        let events = calc.set_field(StateField::MinorShares, "30");

        assert!(matches!(events[0], CalculatorEvent::FieldUpdated { .. }));
        assert!(matches!(
            events.last(),
            Some(CalculatorEvent::ResultComputed { .. })
        ));
        assert_eq!(calc.result().minor.raw_value(), 184_615_385);
        assert!(calc.result().check());
    }

    #[test]
    fn test_major_above_pool_is_clamped() {
        let mut calc = calculator();
        calc.set_field(StateField::MinorShares, "50");
        let events = calc.set_field(StateField::MajorShares, "500");

        assert_eq!(calc.state().major_shares, 130);
        assert_eq!(calc.state().minor_shares, 50);
        assert!(events
            .iter()
            .any(|e| matches!(e, CalculatorEvent::HoldingsClamped { .. })));
    }

    #[test]
    fn test_shrinking_major_clamps_minor() {
        let mut calc = calculator();
        calc.set_field(StateField::MinorShares, "40");
        calc.set_field(StateField::MajorShares, "20");

        assert_eq!(calc.state().major_shares, 20);
        assert_eq!(calc.state().minor_shares, 20);
        assert!(!calc.holdings_status().valid);
    }

    #[test]
    fn test_minor_above_major_is_reported_before_clamping() {
        let mut calc = calculator();
        let events = calc.set_field(StateField::MinorShares, "70");

        // state is clamped, but the typed split is still reported invalid
        assert_eq!(calc.state().minor_shares, 60);
        let status = calc.holdings_status();
        assert!(!status.valid);
        assert_eq!(status.message.as_deref(), Some(MINOR_EXCEEDS_MAJOR));
        assert!(events.iter().any(|e| matches!(
            e,
            CalculatorEvent::HoldingsFlagged { status, .. } if !status.valid
        )));

        // a valid entry clears the flag
        let events = calc.set_field(StateField::MinorShares, "30");
        assert!(calc.holdings_status().is_clear());
        assert!(!events
            .iter()
            .any(|e| matches!(e, CalculatorEvent::HoldingsFlagged { .. })));
    }

    #[test]
    fn test_reserve_warning_event() {
        let mut calc = calculator();
        let events = calc.set_field(StateField::MinorShares, "56");

        assert!(calc.holdings_status().valid);
        assert!(calc.holdings_status().warn);
        assert!(events.iter().any(|e| matches!(
            e,
            CalculatorEvent::HoldingsFlagged { status, .. } if status.warn
        )));
    }

    #[test]
    fn test_shrinking_pool_clamps_both() {
        let mut calc = calculator();
        calc.set_field(StateField::MinorShares, "50");
        calc.set_field(StateField::TotalShares, "30");

        let state = calc.state();
        assert_eq!((state.total_shares, state.major_shares, state.minor_shares), (30, 30, 30));
    }

    #[test]
    fn test_transient_negative_input() {
        let mut calc = calculator();
        let events = calc.set_field(StateField::NetProfit, "-");

        match &events[0] {
            CalculatorEvent::FieldUpdated { transient, raw, .. } => {
                assert!(*transient);
                assert_eq!(raw, "-");
            },
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(calc.state().net_profit, Amount::ZERO);
        assert!(calc.result().valid);
        assert_eq!(calc.result().total, Amount::ZERO);

        calc.set_field(StateField::NetProfit, "-40,000,000");
        assert!(calc.result().total.is_negative());
    }

    #[test]
    fn test_invalid_input_event() {
        let mut calc = calculator();
        let events = calc.set_field(StateField::AttributableRevenue, "60,000,000");

        assert!(!calc.result().valid);
        match events.last() {
            Some(CalculatorEvent::InvalidInput { reason, .. }) => {
                assert_eq!(reason, "attributable revenue cannot exceed total revenue")
            },
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_events_reach_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let mut calc = Calculator::new(CalculatorConfig::default(), handler.clone()).unwrap();

        let events = calc.set_field(StateField::MajorShares, "70");
        assert_eq!(*handler.events.lock(), events);
    }

    #[test]
    fn test_share_token_roundtrip_through_link() {
        let mut calc = calculator();
        calc.set_field(StateField::NetProfit, "-12345");
        calc.set_field(StateField::MinorShares, "10");

        let fragment = format!("#{}", calc.share_token());
        let restored = Calculator::from_link(
            Some(&fragment),
            None,
            CalculatorConfig::default(),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();

        assert_eq!(restored.state(), calc.state());
        assert_eq!(restored.result(), calc.result());
    }

    #[test]
    fn test_from_link_clamps_decoded_state() {
        // D=130 (3m), major=200 (5k), minor=150 (46)
        let calc = Calculator::from_link(
            Some("v1:5yc1s.tro8w.1bmoe8.3m.5k.46"),
            None,
            CalculatorConfig::default(),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();

        assert_eq!(calc.state().major_shares, 130);
        assert_eq!(calc.state().minor_shares, 130);
    }

    #[test]
    fn test_from_link_falls_back_to_sample() {
        let calc = Calculator::from_link(
            Some("#garbage"),
            Some("utm=1"),
            CalculatorConfig::default(),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();
        assert_eq!(calc.state(), CalculatorState::sample());
    }

    #[test]
    fn test_load_link_keeps_state_on_failure() {
        let mut calc = calculator();
        calc.set_field(StateField::MajorShares, "80");

        assert!(calc.load_link(Some("v1:bad"), None).is_none());
        assert_eq!(calc.state().major_shares, 80);

        let events = calc.load_link(None, Some("major=10&minor=8")).unwrap();
        assert!(matches!(events[0], CalculatorEvent::StateReplaced { .. }));
        assert_eq!(calc.state().major_shares, 10);
        assert!(calc.holdings_status().warn);
    }

    #[test]
    fn test_holdings_status_uses_configured_reserve() {
        let mut calc = Calculator::new(
            CalculatorConfig::default().with_min_reserve(20),
            Arc::new(NoOpEventHandler),
        )
        .unwrap();
        calc.set_field(StateField::MinorShares, "50");

        assert!(calc.holdings_status().warn);
        assert_eq!(calc.config().min_reserve, 20);
    }
}
