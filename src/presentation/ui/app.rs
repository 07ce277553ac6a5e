//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use super::home_screen::{HomeKeyResult, HomeScreen};
use super::loading_screen::LoadingScreen;
use super::login_screen::{LoginAction, LoginScreen};
use crate::application::dto::{LoginRequest, LoginResponse, TokenSource};
use crate::application::services::{
    AuthGate, DestructiveActionCatalog, GateOutcome, Route, SessionStore, ToastQueue,
};
use crate::application::use_cases::{
    HydrateSessionUseCase, LoginUseCase, LogoutUseCase, ValidateSessionUseCase,
};
use crate::domain::entities::{Alert, NewAlert, User};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{AlertApiPort, AuthPort, HapticPort, LocaleProvider, TokenStoragePort};
use crate::infrastructure::config::AppConfig;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::ToastPopup;

const TICK_RATE: Duration = Duration::from_millis(80);

/// Ports the application is wired with.
pub struct AppServices {
    /// Shared session state.
    pub session_store: Arc<SessionStore>,
    /// Token validation.
    pub auth: Arc<dyn AuthPort>,
    /// Persisted token.
    pub token_storage: Arc<dyn TokenStoragePort>,
    /// Alerts backend.
    pub alert_api: Arc<dyn AlertApiPort>,
    /// Feedback output.
    pub haptics: Arc<dyn HapticPort>,
    /// UI strings.
    pub locale: Arc<dyn LocaleProvider>,
}

/// Completed background work, fed back into the event loop.
#[derive(Debug)]
enum Action {
    SessionValidated(Result<User, AuthError>),
    LoginFinished(Result<LoginResponse, AuthError>),
    LoggedOut(Result<(), AuthError>),
    AlertSubmitted(Result<Alert, ApiError>),
    DestructiveFinished(Result<(), ApiError>),
}

enum CurrentScreen {
    Loading(LoadingScreen),
    Login(LoginScreen),
    Home(Box<HomeScreen>),
}

/// Owns the screens and runs the event loop.
pub struct App {
    gate: AuthGate,
    screen: CurrentScreen,
    hydrate_use_case: HydrateSessionUseCase,
    validate_use_case: ValidateSessionUseCase,
    login_use_case: LoginUseCase,
    logout_use_case: LogoutUseCase,
    alert_api: Arc<dyn AlertApiPort>,
    haptics: Arc<dyn HapticPort>,
    locale: Arc<dyn LocaleProvider>,
    toasts: ToastQueue,
    theme: Theme,
    user: Option<User>,
    persist_default: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    exiting: bool,
}

impl App {
    /// Wires the use cases; nothing runs until [`App::run`].
    #[must_use]
    pub fn new(services: AppServices, config: &AppConfig) -> Self {
        let AppServices {
            session_store,
            auth,
            token_storage,
            alert_api,
            haptics,
            locale,
        } = services;
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            gate: AuthGate::new(&session_store),
            screen: CurrentScreen::Loading(LoadingScreen::new(locale.clone())),
            hydrate_use_case: HydrateSessionUseCase::new(
                token_storage.clone(),
                session_store.clone(),
            ),
            validate_use_case: ValidateSessionUseCase::new(
                auth.clone(),
                token_storage.clone(),
                session_store.clone(),
            ),
            login_use_case: LoginUseCase::new(auth, token_storage.clone(), session_store.clone()),
            logout_use_case: LogoutUseCase::new(token_storage, session_store),
            alert_api,
            haptics,
            locale,
            toasts: ToastQueue::new(config.toast_duration()),
            theme: Theme::default(),
            user: None,
            persist_default: config.persist_session,
            action_tx,
            action_rx,
            exiting: false,
        }
    }

    /// Hydrates the session and runs until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal drawing or session hydration fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_token: Option<String>,
    ) -> color_eyre::Result<()> {
        if let Some(resolved) = self.hydrate_use_case.execute(cli_token).await? {
            info!(source = %resolved.source, "Found existing token");
            self.spawn_validation();
        }
        self.sync_screen();

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(state) = self.gate.changed() => {
                    debug!(?state, "Session changed");
                    self.sync_screen();
                }

                Some(Ok(event)) = terminal_event => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.exiting = true;
                    }
                }

                _ = tick_interval.tick() => {
                    self.toasts.tick();
                    if let CurrentScreen::Loading(screen) = &mut self.screen {
                        screen.tick();
                    }
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Swaps the visible screen to match the gate's decision.
    fn sync_screen(&mut self) {
        match self.gate.guard(|| ()) {
            GateOutcome::Loading => {
                if !matches!(self.screen, CurrentScreen::Loading(_)) {
                    self.screen = CurrentScreen::Loading(LoadingScreen::new(self.locale.clone()));
                }
            }
            GateOutcome::Redirect(Route::Login | Route::Home) => {
                if !matches!(self.screen, CurrentScreen::Login(_)) {
                    self.user = None;
                    self.screen = CurrentScreen::Login(LoginScreen::new(
                        self.locale.clone(),
                        self.persist_default,
                    ));
                }
            }
            GateOutcome::Render(()) => {
                if !matches!(self.screen, CurrentScreen::Home(_)) {
                    let mut home = HomeScreen::new(
                        self.alert_api.clone(),
                        self.haptics.clone(),
                        self.locale.clone(),
                    );
                    if let Some(user) = self.user.clone() {
                        home.set_user(user);
                    }
                    self.screen = CurrentScreen::Home(Box::new(home));
                }
            }
        }
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            CurrentScreen::Loading(screen) => frame.render_widget(screen, area),
            CurrentScreen::Login(screen) => frame.render_widget(screen, area),
            CurrentScreen::Home(screen) => frame.render_widget(&**screen, area),
        }

        if let Some(toast) = self.toasts.current() {
            frame.render_widget(ToastPopup::new(toast, &self.theme), area);
        }
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Loading(_) => {}
            CurrentScreen::Login(screen) => match screen.handle_key(key) {
                LoginAction::Quit => return EventResult::Exit,
                LoginAction::Submit => self.handle_login_submit(),
                LoginAction::DeleteToken => {
                    self.spawn_logout();
                    self.toasts.info(
                        self.locale.text("login.title", "Sign in"),
                        "Saved token cleared",
                    );
                }
                LoginAction::None => {}
            },
            CurrentScreen::Home(screen) => match screen.handle_key(key) {
                HomeKeyResult::Logout => self.spawn_logout(),
                HomeKeyResult::Submit(payload) => self.spawn_submit(payload),
                HomeKeyResult::Run(action) => self.spawn_destructive(action),
                HomeKeyResult::Consumed => {}
            },
        }

        EventResult::Continue
    }

    fn handle_login_submit(&mut self) {
        let CurrentScreen::Login(screen) = &mut self.screen else {
            return;
        };
        let Some(token) = screen.token().map(ToString::to_string) else {
            return;
        };

        let mut request = LoginRequest::new(token, TokenSource::UserInput);
        if !screen.should_persist() {
            request = request.without_persistence();
        }
        screen.set_validating();

        let login = self.login_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = login.execute(request).await;
            let _ = tx.send(Action::LoginFinished(result));
        });
    }

    fn spawn_validation(&self) {
        let validate = self.validate_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = validate.execute().await;
            let _ = tx.send(Action::SessionValidated(result));
        });
    }

    fn spawn_logout(&self) {
        let logout = self.logout_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = logout.execute().await;
            let _ = tx.send(Action::LoggedOut(result));
        });
    }

    fn spawn_submit(&self, payload: NewAlert) {
        let api = self.alert_api.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = api.create_alert(&payload).await;
            let _ = tx.send(Action::AlertSubmitted(result));
        });
    }

    fn spawn_destructive(&self, action: BoxFuture<'static, Result<(), ApiError>>) {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = action.await;
            let _ = tx.send(Action::DestructiveFinished(result));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SessionValidated(Ok(user))
            | Action::LoginFinished(Ok(LoginResponse { user, .. })) => {
                info!(user = %user.display_name(), "Session authenticated");
                if let CurrentScreen::Home(home) = &mut self.screen {
                    home.set_user(user.clone());
                }
                self.user = Some(user);
            }
            Action::SessionValidated(Err(e)) => {
                warn!(error = %e, "Stored session could not be validated");
                if !matches!(e, AuthError::NoTokenAvailable) {
                    self.toasts.error(
                        self.locale.text("login.failed", "Sign in failed"),
                        login_error_message(&e),
                    );
                }
            }
            Action::LoginFinished(Err(e)) => {
                error!(error = %e, "Login failed");
                if let CurrentScreen::Login(screen) = &mut self.screen {
                    screen.set_error(login_error_message(&e));
                }
            }
            Action::LoggedOut(result) => {
                if let Err(e) = result {
                    warn!(error = %e, "Failed to forget stored token");
                }
            }
            Action::AlertSubmitted(result) => {
                let CurrentScreen::Home(home) = &mut self.screen else {
                    debug!("Alert result arrived after leaving home");
                    return;
                };
                match home.wizard_mut().finish_submit(result) {
                    Ok(alert) => self.toasts.success(
                        self.locale.text("wizard.created", "Alert created"),
                        alert.summary(),
                    ),
                    Err(e) => self.toasts.error(
                        self.locale.text("wizard.failed", "Could not create alert"),
                        e.to_string(),
                    ),
                }
            }
            Action::DestructiveFinished(result) => {
                let CurrentScreen::Home(home) = &mut self.screen else {
                    debug!("Danger zone result arrived after leaving home");
                    return;
                };
                let Some(category) = home.danger_mut().settle(&result) else {
                    return;
                };
                let copy = DestructiveActionCatalog::describe(category)
                    .localized(self.locale.as_ref());
                match result {
                    Ok(()) => self
                        .toasts
                        .success(copy.title, self.locale.text("danger.done", "Done")),
                    Err(e) => self.toasts.error(copy.title, e.to_string()),
                }
            }
        }
    }
}

fn login_error_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidTokenFormat { .. } => {
            "Invalid token format. Please check your token.".to_string()
        }
        AuthError::TokenRejected { .. } => "Token rejected. It may be invalid or expired.".to_string(),
        AuthError::NetworkError { message } => format!("Network error: {message}"),
        AuthError::RateLimited { retry_after_ms } => {
            format!("Rate limited. Try again in {}s", retry_after_ms / 1000)
        }
        _ => error.to_string(),
    }
}
