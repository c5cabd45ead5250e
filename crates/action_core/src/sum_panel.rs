//! Client-side number adder panel: two text inputs, a compute-on-click sum,
//! and a cancel handler that asks the host to dismiss the action surface.

use std::fmt;

use shared::domain::PageRefKind;
use tokio::sync::broadcast;

/// Events the panel emits toward the hosting surface. One-way; the panel
/// never waits for an acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    CloseActionScreen,
}

/// `parseInt(value, 10)` semantics: leading whitespace skipped, optional
/// sign, then the longest leading run of decimal digits. Anything else is
/// not a number.
pub fn parse_number(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let run = &digits[..end];
    if run.is_empty() {
        return None;
    }
    run.parse::<i64>().ok().map(|n| if negative { -n } else { n })
}

/// Displayed sum. Inputs are unvalidated; a non-numeric operand makes the
/// whole sum not-a-number and the panel shows it that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumValue {
    Number(i64),
    NotANumber,
}

impl Default for SumValue {
    fn default() -> Self {
        SumValue::Number(0)
    }
}

impl fmt::Display for SumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumValue::Number(n) => write!(f, "{n}"),
            SumValue::NotANumber => f.write_str("NaN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SumPanelConfig {
    /// Label shown as the panel header when hosted as a quick action.
    pub header_label: String,
}

pub struct SumPanel {
    config: SumPanelConfig,
    sum: SumValue,
    is_quick_action: bool,
    events: broadcast::Sender<PanelEvent>,
}

impl SumPanel {
    pub fn new(config: SumPanelConfig) -> Self {
        let (events, _) = broadcast::channel(8);
        Self {
            config,
            sum: SumValue::default(),
            is_quick_action: false,
            events,
        }
    }

    /// Page-reference wiring from the host: the header label is shown only
    /// on quick-action surfaces.
    pub fn page_reference(&mut self, kind: PageRefKind) {
        self.is_quick_action = kind == PageRefKind::QuickAction;
    }

    pub fn header_label(&self) -> &str {
        if self.is_quick_action {
            &self.config.header_label
        } else {
            ""
        }
    }

    pub fn handle_addition(&mut self, num1: &str, num2: &str) {
        self.sum = match (parse_number(num1), parse_number(num2)) {
            (Some(a), Some(b)) => SumValue::Number(a + b),
            _ => SumValue::NotANumber,
        };
    }

    pub fn sum(&self) -> SumValue {
        self.sum
    }

    pub fn handle_cancel(&self) {
        let _ = self.events.send(PanelEvent::CloseActionScreen);
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PanelEvent> {
        self.events.subscribe()
    }
}
