//! Step-gated alert creation flow.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::steps::{AlertDraft, DEFAULT_STEP_LABELS, StepData, WizardStep};
use crate::domain::entities::{Alert, NewAlert};
use crate::domain::errors::{ApiError, ConfigurationError, WizardError};
use crate::domain::ports::{AlertApiPort, HapticPort, ImpactStyle, NoHaptics, NotificationKind};

/// Drives the four alert steps in order and only lets the user move on
/// from a step whose validator passes.
pub struct WizardController {
    labels: Vec<String>,
    current: WizardStep,
    draft: AlertDraft,
    validity: [bool; WizardStep::COUNT],
    submitting: bool,
    request_id: Option<Uuid>,
    last_error: Option<WizardError>,
    haptics: Arc<dyn HapticPort>,
}

impl WizardController {
    /// Creates a wizard with the English step labels.
    #[must_use]
    pub fn new() -> Self {
        Self::build(DEFAULT_STEP_LABELS.iter().map(ToString::to_string).collect())
    }

    /// Creates a wizard with custom, usually localized, step labels.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::StepCountMismatch`] when the number of
    /// labels differs from the number of steps.
    pub fn with_labels<I, S>(labels: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != WizardStep::COUNT {
            return Err(ConfigurationError::StepCountMismatch {
                expected: WizardStep::COUNT,
                actual: labels.len(),
            });
        }
        Ok(Self::build(labels))
    }

    fn build(labels: Vec<String>) -> Self {
        Self {
            labels,
            current: WizardStep::Coin,
            draft: AlertDraft::default(),
            validity: [false; WizardStep::COUNT],
            submitting: false,
            request_id: None,
            last_error: None,
            haptics: Arc::new(NoHaptics),
        }
    }

    /// Sets the haptic feedback service.
    #[must_use]
    pub fn with_haptics(mut self, haptics: Arc<dyn HapticPort>) -> Self {
        self.haptics = haptics;
        self
    }

    /// Returns the step on screen.
    #[must_use]
    pub const fn current_step(&self) -> WizardStep {
        self.current
    }

    /// Returns the number of steps.
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        WizardStep::COUNT
    }

    /// Returns every step label, in order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the label of `step`.
    #[must_use]
    pub fn label(&self, step: WizardStep) -> &str {
        &self.labels[step.index() - 1]
    }

    /// Returns everything entered so far.
    #[must_use]
    pub const fn draft(&self) -> &AlertDraft {
        &self.draft
    }

    /// Returns whether the validator of `step` passes.
    #[must_use]
    pub const fn is_step_valid(&self, step: WizardStep) -> bool {
        self.validity[step.index() - 1]
    }

    /// Returns whether a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Returns the error of the last failed submission.
    #[must_use]
    pub const fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    /// Share of the flow reached so far, in `(0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_fraction(&self) -> f64 {
        self.current.index() as f64 / self.total_steps() as f64
    }

    /// Stores the input of one step and re-runs the validators.
    ///
    /// Returns the new validity of that step.
    ///
    /// # Errors
    /// Refuses while a submission is in flight; the draft is unchanged then.
    pub fn set_step_data(&mut self, data: StepData) -> Result<bool, WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        let step = data.step();
        self.draft.merge(data);
        self.request_id = None;
        self.last_error = None;
        self.revalidate();

        let valid = self.is_step_valid(step);
        debug!(step = step.index(), valid, "Wizard step data updated");
        Ok(valid)
    }

    fn revalidate(&mut self) {
        for step in WizardStep::ALL {
            self.validity[step.index() - 1] = self.draft.is_step_valid(step);
        }
    }

    /// Moves to the next step.
    ///
    /// # Errors
    /// Refuses when the current step is invalid, when already on the last
    /// step, or while a submission is in flight. State is unchanged then.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        if !self.is_step_valid(self.current) {
            debug!(step = self.current.index(), "Advance refused, step invalid");
            return Err(WizardError::StepInvalid {
                step: self.current.index(),
            });
        }
        let next = self.current.next().ok_or(WizardError::AtLastStep)?;

        self.current = next;
        self.haptics.impact(ImpactStyle::Light);
        debug!(step = next.index(), "Wizard advanced");
        Ok(next)
    }

    /// Moves to the previous step, keeping everything entered.
    ///
    /// # Errors
    /// Refuses on the first step or while a submission is in flight.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        let previous = self.current.previous().ok_or(WizardError::AtFirstStep)?;

        self.current = previous;
        debug!(step = previous.index(), "Wizard retreated");
        Ok(previous)
    }

    /// Returns whether [`Self::begin_submit`] would succeed.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.submitting
            && matches!(self.current, WizardStep::Confirm)
            && self.is_step_valid(WizardStep::Confirm)
    }

    /// Marks the wizard as submitting and returns the payload to send.
    ///
    /// Retries of an unchanged draft reuse the same request id.
    ///
    /// # Errors
    /// Refuses unless the wizard is on the final step with valid data and
    /// not already submitting.
    pub fn begin_submit(&mut self) -> Result<NewAlert, WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        if self.current != WizardStep::Confirm || !self.is_step_valid(WizardStep::Confirm) {
            return Err(WizardError::NotReady);
        }

        let request_id = *self.request_id.get_or_insert_with(Uuid::new_v4);
        let payload = self
            .draft
            .to_new_alert(request_id)
            .ok_or(WizardError::NotReady)?;

        self.submitting = true;
        self.last_error = None;
        info!(symbol = %payload.symbol, alert_type = ?payload.alert_type, "Submitting alert");
        Ok(payload)
    }

    /// Applies the backend's answer to a submission.
    ///
    /// Success discards the wizard state. Failure keeps the user on the final
    /// step with the draft intact and records the error.
    ///
    /// # Errors
    /// Returns [`WizardError::Submission`] when the backend refused.
    pub fn finish_submit(&mut self, result: Result<Alert, ApiError>) -> Result<Alert, WizardError> {
        self.submitting = false;
        match result {
            Ok(alert) => {
                info!(alert_id = %alert.id, "Alert created");
                self.haptics.notify(NotificationKind::Success);
                self.clear();
                Ok(alert)
            }
            Err(e) => {
                warn!(error = %e, "Alert submission failed");
                self.haptics.notify(NotificationKind::Error);
                let error = WizardError::Submission(e);
                self.last_error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Submits the draft through `api` and waits for the answer.
    ///
    /// # Errors
    /// See [`Self::begin_submit`] and [`Self::finish_submit`].
    pub async fn submit(&mut self, api: &dyn AlertApiPort) -> Result<Alert, WizardError> {
        let payload = self.begin_submit()?;
        let result = api.create_alert(&payload).await;
        self.finish_submit(result)
    }

    /// Discards everything and returns to the first step.
    ///
    /// # Errors
    /// Refuses while a submission is in flight; it settles on its own.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        self.clear();
        Ok(())
    }

    fn clear(&mut self) {
        self.current = WizardStep::Coin;
        self.draft = AlertDraft::default();
        self.validity = [false; WizardStep::COUNT];
        self.request_id = None;
        self.last_error = None;
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::wizard::steps::{AlertOptions, ConditionInput};
    use crate::domain::entities::{AlertType, Coin};
    use crate::domain::ports::mocks::{Feedback, MockAlertApiPort, RecordingHaptics};
    use chrono::Utc;

    fn fill_all(wizard: &mut WizardController) {
        wizard
            .set_step_data(StepData::Coin(Coin::new("BTC", "Bitcoin")))
            .unwrap();
        wizard
            .set_step_data(StepData::Type(AlertType::PriceAbove))
            .unwrap();
        wizard
            .set_step_data(StepData::Condition(ConditionInput::new("70000")))
            .unwrap();
        wizard
            .set_step_data(StepData::Confirm(AlertOptions {
                repeating: true,
                note: "moon".to_string(),
            }))
            .unwrap();
    }

    fn walk_to_confirm(wizard: &mut WizardController) {
        fill_all(wizard);
        for _ in 0..3 {
            wizard.advance().unwrap();
        }
    }

    fn created(payload: &NewAlert) -> Alert {
        Alert {
            id: "alert-1".to_string(),
            symbol: payload.symbol.clone(),
            alert_type: payload.alert_type,
            threshold: payload.threshold,
            repeating: payload.repeating,
            note: payload.note.clone(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_label_count_mismatch_fails_fast() {
        let result = WizardController::with_labels(["Coin", "Type", "Condition"]);
        assert_eq!(
            result.err(),
            Some(ConfigurationError::StepCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_custom_labels() {
        let wizard =
            WizardController::with_labels(["Монета", "Тип", "Условие", "Подтверждение"]).unwrap();
        assert_eq!(wizard.label(WizardStep::Type), "Тип");
        assert_eq!(wizard.labels().len(), wizard.total_steps());
    }

    #[test]
    fn test_advance_without_coin_is_refused() {
        let mut wizard = WizardController::new();

        let result = wizard.advance();

        assert_eq!(result, Err(WizardError::StepInvalid { step: 1 }));
        assert_eq!(wizard.current_step(), WizardStep::Coin);
    }

    #[test]
    fn test_invalid_coin_keeps_step_blocked() {
        let mut wizard = WizardController::new();
        assert_eq!(
            wizard.set_step_data(StepData::Coin(Coin::new("?", "Unknown"))),
            Ok(false)
        );
        assert!(wizard.advance().is_err());
        assert_eq!(wizard.current_step(), WizardStep::Coin);
    }

    #[test]
    fn test_advance_to_end_then_retreat_keeps_data() {
        let mut wizard = WizardController::new();
        fill_all(&mut wizard);

        assert_eq!(wizard.advance(), Ok(WizardStep::Type));
        assert_eq!(wizard.advance(), Ok(WizardStep::Condition));
        assert_eq!(wizard.advance(), Ok(WizardStep::Confirm));
        assert_eq!(wizard.retreat(), Ok(WizardStep::Condition));

        assert_eq!(wizard.current_step().index(), 3);
        assert_eq!(wizard.draft().coin.as_ref().map(Coin::symbol), Some("BTC"));
        assert!(wizard.draft().condition.is_some());
        assert!(wizard.is_step_valid(WizardStep::Confirm));
    }

    #[test]
    fn test_advance_on_last_step_is_refused() {
        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);

        assert_eq!(wizard.advance(), Err(WizardError::AtLastStep));
        assert_eq!(wizard.current_step(), WizardStep::Confirm);
    }

    #[test]
    fn test_retreat_on_first_step_is_refused() {
        let mut wizard = WizardController::new();
        assert_eq!(wizard.retreat(), Err(WizardError::AtFirstStep));
        assert_eq!(wizard.current_step(), WizardStep::Coin);
    }

    #[test]
    fn test_advance_only_when_current_step_valid() {
        let mut wizard = WizardController::new();
        wizard
            .set_step_data(StepData::Coin(Coin::new("ETH", "Ethereum")))
            .unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.advance(), Err(WizardError::StepInvalid { step: 2 }));

        wizard
            .set_step_data(StepData::Type(AlertType::PercentUp))
            .unwrap();
        assert_eq!(wizard.advance(), Ok(WizardStep::Condition));

        wizard
            .set_step_data(StepData::Condition(ConditionInput::new("-3")))
            .unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::StepInvalid { step: 3 }));
    }

    #[test]
    fn test_progress_is_monotonic_and_bounded() {
        let mut wizard = WizardController::new();
        fill_all(&mut wizard);

        let mut last = wizard.progress_fraction();
        assert!((last - 0.25).abs() < f64::EPSILON);

        while wizard.advance().is_ok() {
            let progress = wizard.progress_fraction();
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }

        assert!((last - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_advance_fires_light_haptic() {
        let haptics = Arc::new(RecordingHaptics::new());
        let mut wizard = WizardController::new().with_haptics(haptics.clone());
        wizard
            .set_step_data(StepData::Coin(Coin::new("SOL", "Solana")))
            .unwrap();

        wizard.advance().unwrap();
        let _ = wizard.advance();

        assert_eq!(haptics.events(), vec![Feedback::Impact(ImpactStyle::Light)]);
    }

    #[test]
    fn test_submit_requires_final_step() {
        let mut wizard = WizardController::new();
        fill_all(&mut wizard);

        assert!(!wizard.can_submit());
        assert_eq!(wizard.begin_submit(), Err(WizardError::NotReady));
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn test_navigation_blocked_while_submitting() {
        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);

        wizard.begin_submit().unwrap();

        assert!(wizard.is_submitting());
        assert_eq!(wizard.retreat(), Err(WizardError::AlreadySubmitting));
        assert_eq!(wizard.begin_submit(), Err(WizardError::AlreadySubmitting));
    }

    #[test]
    fn test_draft_frozen_while_submitting() {
        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);
        let first = wizard.begin_submit().unwrap();

        assert_eq!(wizard.reset(), Err(WizardError::AlreadySubmitting));
        assert_eq!(
            wizard.set_step_data(StepData::Condition(ConditionInput::new("1"))),
            Err(WizardError::AlreadySubmitting)
        );
        assert!(wizard.is_submitting());
        assert_eq!(wizard.current_step(), WizardStep::Confirm);
        assert_eq!(wizard.begin_submit(), Err(WizardError::AlreadySubmitting));

        let _ = wizard.finish_submit(Err(ApiError::network("timeout")));
        let retry = wizard.begin_submit().unwrap();
        assert_eq!(retry.request_id, first.request_id);
        assert_eq!(retry.threshold, first.threshold);
    }

    #[tokio::test]
    async fn test_successful_submit_discards_state() {
        let mut api = MockAlertApiPort::new();
        api.expect_create_alert()
            .withf(|payload| payload.symbol == "BTC" && payload.note.as_deref() == Some("moon"))
            .times(1)
            .returning(|payload| Ok(created(payload)));

        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);

        let alert = wizard.submit(&api).await.unwrap();

        assert_eq!(alert.symbol, "BTC");
        assert_eq!(wizard.current_step(), WizardStep::Coin);
        assert_eq!(wizard.draft(), &AlertDraft::default());
        assert!(!wizard.is_step_valid(WizardStep::Coin));
        assert!(wizard.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_final_step() {
        let mut api = MockAlertApiPort::new();
        api.expect_create_alert()
            .times(1)
            .returning(|_| Err(ApiError::rejected("unknown coin")));

        let haptics = Arc::new(RecordingHaptics::new());
        let mut wizard = WizardController::new().with_haptics(haptics.clone());
        walk_to_confirm(&mut wizard);

        let result = wizard.submit(&api).await;

        let expected = WizardError::Submission(ApiError::rejected("unknown coin"));
        assert_eq!(result, Err(expected.clone()));
        assert_eq!(wizard.current_step(), WizardStep::Confirm);
        assert_eq!(wizard.last_error(), Some(&expected));
        assert!(wizard.draft().coin.is_some());
        assert!(!wizard.is_submitting());
        assert!(wizard.can_submit());
        assert_eq!(
            haptics.events().last(),
            Some(&Feedback::Notify(NotificationKind::Error))
        );
    }

    #[test]
    fn test_retry_reuses_request_id_until_draft_changes() {
        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);

        let first = wizard.begin_submit().unwrap();
        let _ = wizard.finish_submit(Err(ApiError::network("timeout")));
        let second = wizard.begin_submit().unwrap();
        let _ = wizard.finish_submit(Err(ApiError::network("timeout")));

        assert_eq!(first.request_id, second.request_id);

        wizard
            .set_step_data(StepData::Condition(ConditionInput::new("71000")))
            .unwrap();
        let third = wizard.begin_submit().unwrap();
        assert_ne!(first.request_id, third.request_id);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut wizard = WizardController::new();
        walk_to_confirm(&mut wizard);

        assert_eq!(wizard.reset(), Ok(()));

        assert_eq!(wizard.current_step(), WizardStep::Coin);
        assert!(wizard.draft().coin.is_none());
    }
}
