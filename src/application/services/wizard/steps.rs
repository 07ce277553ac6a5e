//! Wizard steps and the data each one collects.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::domain::entities::{AlertType, Coin, NewAlert};

/// Longest note accepted on the confirmation step.
pub const MAX_NOTE_LENGTH: usize = 140;

/// Step labels in order.
pub const DEFAULT_STEP_LABELS: [&str; WizardStep::COUNT] = ["Coin", "Type", "Condition", "Confirm"];

/// Steps of the alert wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    /// Pick the coin to watch.
    Coin,
    /// Pick what kind of alert to create.
    Type,
    /// Enter the threshold.
    Condition,
    /// Review, set options and submit.
    Confirm,
}

impl WizardStep {
    /// Number of steps.
    pub const COUNT: usize = 4;

    /// Every step, in order.
    pub const ALL: [Self; Self::COUNT] = [Self::Coin, Self::Type, Self::Condition, Self::Confirm];

    /// Returns the one-based position.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Coin => 1,
            Self::Type => 2,
            Self::Condition => 3,
            Self::Confirm => 4,
        }
    }

    /// Returns the step at a one-based position.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Returns the following step, `None` on the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the preceding step, `None` on the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    /// Returns the locale key of the step label.
    #[must_use]
    pub const fn locale_key(self) -> &'static str {
        match self {
            Self::Coin => "wizard.step.coin",
            Self::Type => "wizard.step.type",
            Self::Condition => "wizard.step.condition",
            Self::Confirm => "wizard.step.confirm",
        }
    }
}

/// Raw threshold as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionInput {
    /// Text exactly as entered.
    pub raw: String,
}

impl ConditionInput {
    /// Wraps typed text.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Parses the threshold, accepting a comma as decimal separator.
    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        let normalized = self.raw.trim().replace(',', ".");
        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Returns whether the threshold is a positive number.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.threshold().is_some_and(|v| v > 0.0)
    }
}

/// Extra settings chosen on the confirmation step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertOptions {
    /// Fire again after triggering.
    pub repeating: bool,
    /// Free text shown with the alert.
    pub note: String,
}

impl AlertOptions {
    /// Returns whether the note fits the length limit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.note.chars().count() <= MAX_NOTE_LENGTH
    }
}

/// Input for one step, tagged by the step it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum StepData {
    /// Selected coin.
    Coin(Coin),
    /// Selected alert type.
    Type(AlertType),
    /// Typed threshold.
    Condition(ConditionInput),
    /// Options from the confirmation step.
    Confirm(AlertOptions),
}

impl StepData {
    /// Returns the step this input belongs to.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        match self {
            Self::Coin(_) => WizardStep::Coin,
            Self::Type(_) => WizardStep::Type,
            Self::Condition(_) => WizardStep::Condition,
            Self::Confirm(_) => WizardStep::Confirm,
        }
    }
}

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2,10}$").expect("Invalid regex"));

fn is_valid_symbol(symbol: &str) -> bool {
    SYMBOL_RE.is_match(symbol)
}

/// Everything entered so far. Fields stay set when the user steps back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertDraft {
    /// Coin from step one.
    pub coin: Option<Coin>,
    /// Alert type from step two.
    pub alert_type: Option<AlertType>,
    /// Threshold from step three.
    pub condition: Option<ConditionInput>,
    /// Options from step four.
    pub options: AlertOptions,
}

impl AlertDraft {
    /// Stores `data` in the slot of its step.
    pub fn merge(&mut self, data: StepData) {
        match data {
            StepData::Coin(coin) => self.coin = Some(coin),
            StepData::Type(alert_type) => self.alert_type = Some(alert_type),
            StepData::Condition(condition) => self.condition = Some(condition),
            StepData::Confirm(options) => self.options = options,
        }
    }

    /// Runs the validator owned by `step`.
    #[must_use]
    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Coin => self
                .coin
                .as_ref()
                .is_some_and(|coin| is_valid_symbol(coin.symbol())),
            WizardStep::Type => self.alert_type.is_some(),
            WizardStep::Condition => self
                .condition
                .as_ref()
                .is_some_and(ConditionInput::is_valid),
            WizardStep::Confirm => {
                self.options.is_valid()
                    && [WizardStep::Coin, WizardStep::Type, WizardStep::Condition]
                        .into_iter()
                        .all(|s| self.is_step_valid(s))
            }
        }
    }

    /// Builds the backend payload once every step is valid.
    #[must_use]
    pub fn to_new_alert(&self, request_id: Uuid) -> Option<NewAlert> {
        if !self.is_step_valid(WizardStep::Confirm) {
            return None;
        }

        let note = self.options.note.trim();
        Some(NewAlert {
            request_id,
            symbol: self.coin.as_ref()?.symbol().to_string(),
            alert_type: self.alert_type?,
            threshold: self.condition.as_ref()?.threshold()?,
            repeating: self.options.repeating,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }
}
