//! Application state management for authgate.
//!
//! This module contains the core `App` struct that manages all
//! application state: the current route, per-view form state, the
//! shared token store, and background task coordination. Navigation is
//! full-page: switching routes rebuilds the target view from scratch
//! and re-runs its mount logic, the way a browser reload would.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::auth::validate::{validate_login, validate_registration};
use crate::auth::{schedule_expiry, token, CookieFile, ExpiryTimer, TokenStore};
use crate::config::Config;
use crate::models::UserProfile;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A handful of in-flight completions at most; 32 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for email input.
/// 254 is the practical upper bound for a deliverable address.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// How long the profile error stays visible before redirecting to login
const PROFILE_REDIRECT_DELAY_SECS: i64 = 2;

/// Shown when a server error carries no readable detail
const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Shown when registration fails without a readable detail
const REGISTRATION_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";

/// Shown on the profile screen while the redirect delay runs
const PROFILE_FETCH_ERROR_MESSAGE: &str = "Failed to fetch profile. Redirecting to login...";

// ============================================================================
// UI State Types
// ============================================================================

/// Application screens. Moving between them is a full remount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Profile,
}

impl Route {
    /// Get the display title for this screen.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Welcome Back",
            Route::Register => "Create an Account",
            Route::Profile => "Profile",
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Email,
    Password,
    Button,
    RegisterLink,
}

/// Registration form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFocus {
    Username,
    Email,
    Password,
    Button,
    LoginLink,
}

/// Login screen state; rebuilt on every navigation here
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub focus: LoginFocus,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for LoginView {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginFocus::Email,
            error: None,
            submitting: false,
        }
    }
}

/// Registration screen state.
/// Validation errors and server errors display on separate lines.
pub struct RegisterView {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterFocus,
    pub validation_error: Option<String>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for RegisterView {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            focus: RegisterFocus::Username,
            validation_error: None,
            error: None,
            submitting: false,
        }
    }
}

/// Profile screen state
#[derive(Default)]
pub struct ProfileView {
    pub user: Option<UserProfile>,
    pub error: Option<String>,
    pub loading: bool,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Completions sent from spawned tasks (and timers) back to the main
/// loop. Every variant is applied between input polls by
/// `check_background_events`.
#[derive(Debug)]
enum AppEvent {
    /// Registration POST finished
    RegisterDone(Result<(), ApiError>),
    /// Login POST finished; Ok carries the issued access token
    LoginDone(Result<String, ApiError>),
    /// Profile GET finished
    ProfileLoaded(Result<UserProfile, ApiError>),
    /// The auto-logout timer fired
    SessionExpired,
    /// A delayed redirect came due
    DelayedRedirect(Route),
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub store: Arc<dyn TokenStore>,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub route: Route,
    pub login: LoginView,
    pub register: RegisterView,
    pub profile: ProfileView,

    // Background task channel
    events_rx: mpsc::Receiver<AppEvent>,
    events_tx: mpsc::Sender<AppEvent>,

    // Auto-logout timer owned by the login screen
    expiry_timer: Option<ExpiryTimer>,
    // Pending redirect owned by the profile screen
    redirect_timer: Option<ExpiryTimer>,
}

impl App {
    /// Create a new application instance backed by the on-disk cookie
    /// store, starting on the login screen
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let cookie_dir = config
            .cookie_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("./data"));
        debug!(?cookie_dir, "Cookie directory configured");

        let store = Arc::new(CookieFile::new(cookie_dir));
        Self::with_store(config, store)
    }

    /// Create an application with an injected token store. `new` goes
    /// through here; tests substitute an in-memory store.
    pub fn with_store(config: Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url(), store.clone())?;
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let mut app = Self {
            config,
            store,
            api,
            state: AppState::Running,
            route: Route::Login,
            login: LoginView::default(),
            register: RegisterView::default(),
            profile: ProfileView::default(),
            events_rx: rx,
            events_tx: tx,
            expiry_timer: None,
            redirect_timer: None,
        };
        app.navigate(Route::Login);
        Ok(app)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to a screen. The target view is rebuilt from scratch and
    /// its mount logic re-run; timers owned by the previous view are
    /// cancelled by dropping their handles.
    pub fn navigate(&mut self, route: Route) {
        debug!(?route, "Navigating");
        self.expiry_timer = None;
        self.redirect_timer = None;
        self.route = route;
        match route {
            Route::Login => {
                self.login = LoginView::default();
                self.mount_login();
            }
            Route::Register => {
                self.register = RegisterView::default();
            }
            Route::Profile => {
                self.profile = ProfileView::default();
                self.mount_profile();
            }
        }
    }

    /// Login mount: if a token is already held, either discard it (when
    /// expired or undecodable) or arrange the auto-logout callback at
    /// its expiry instant.
    fn mount_login(&mut self) {
        let Some(stored) = self.store.read() else {
            return;
        };

        match token::decode_expiry(&stored) {
            Ok(expires_at) if expires_at > Utc::now() => {
                let tx = self.events_tx.clone();
                self.expiry_timer = Some(schedule_expiry(expires_at, move || {
                    let _ = tx.try_send(AppEvent::SessionExpired);
                }));
            }
            _ => {
                // Expired or malformed: same treatment, no error surfaced
                debug!("Discarding stale token on login mount");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear stale token");
                }
            }
        }
    }

    /// Profile mount: token checks first, then the profile fetch. A
    /// missing or invalid token redirects without any network call.
    fn mount_profile(&mut self) {
        let Some(stored) = self.store.read() else {
            debug!("No token present, redirecting to login");
            self.navigate(Route::Login);
            return;
        };

        if !token::is_valid(&stored) {
            debug!("Stored token is invalid, redirecting to login");
            if let Err(e) = self.store.clear() {
                warn!(error = %e, "Failed to clear invalid token");
            }
            self.navigate(Route::Login);
            return;
        }

        self.profile.loading = true;
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_profile().await;
            let _ = tx.send(AppEvent::ProfileLoaded(result)).await;
        });
    }

    // =========================================================================
    // Form Submission
    // =========================================================================

    /// Submit the registration form. Validation runs first and a
    /// failure there never reaches the network.
    pub fn submit_register(&mut self) {
        if self.register.submitting {
            return;
        }
        self.register.error = None;
        self.register.validation_error = None;

        if let Err(e) = validate_registration(
            &self.register.username,
            &self.register.email,
            &self.register.password,
        ) {
            self.register.validation_error = Some(e.to_string());
            return;
        }

        self.register.submitting = true;
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let username = self.register.username.clone();
        let email = self.register.email.clone();
        let password = self.register.password.clone();
        tokio::spawn(async move {
            let result = api.register(&username, &email, &password).await;
            let _ = tx.send(AppEvent::RegisterDone(result)).await;
        });
    }

    /// Submit the login form
    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        self.login.error = None;

        if let Err(e) = validate_login(&self.login.email, &self.login.password) {
            self.login.error = Some(e.to_string());
            return;
        }

        self.login.submitting = true;
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        let email = self.login.email.clone();
        let password = self.login.password.clone();
        tokio::spawn(async move {
            let result = api.login(&email, &password).await;
            let _ = tx.send(AppEvent::LoginDone(result)).await;
        });
    }

    /// Manual logout: clear the token and go to login immediately,
    /// regardless of any in-flight fetch or pending redirect
    pub fn logout(&mut self) {
        info!("Logging out");
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear token on logout");
        }
        self.navigate(Route::Login);
    }

    // =========================================================================
    // Background Events
    // =========================================================================

    /// Drain and apply all pending background completions
    pub fn check_background_events(&mut self) {
        // Collect first to avoid holding a borrow of the receiver
        let events: Vec<AppEvent> = {
            let mut events = Vec::new();
            while let Ok(event) = self.events_rx.try_recv() {
                events.push(event);
            }
            events
        };

        for event in events {
            self.apply_event(event);
        }
    }

    /// Apply a single background completion.
    ///
    /// This is the only place submission outcomes land, so the busy
    /// flags are cleared here unconditionally before the outcome is
    /// examined.
    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RegisterDone(result) => {
                self.register.submitting = false;
                match result {
                    Ok(()) => {
                        info!("Registration successful");
                        self.navigate(Route::Login);
                    }
                    Err(e) => {
                        error!(error = %e, "Registration failed");
                        self.register.error = Some(
                            e.detail_message()
                                .unwrap_or_else(|| REGISTRATION_FALLBACK_MESSAGE.to_string()),
                        );
                    }
                }
            }
            AppEvent::LoginDone(result) => {
                self.login.submitting = false;
                match result {
                    Ok(access_token) => match self.store.store(&access_token) {
                        Ok(()) => {
                            info!("Login successful");
                            self.navigate(Route::Profile);
                        }
                        Err(e) => {
                            warn!(error = %e, "Server returned an undecodable token");
                            self.login.error = Some(GENERIC_ERROR_MESSAGE.to_string());
                        }
                    },
                    Err(e) => {
                        error!(error = %e, "Login failed");
                        self.login.error = Some(
                            e.detail_message()
                                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                        );
                    }
                }
            }
            AppEvent::ProfileLoaded(result) => {
                self.profile.loading = false;
                match result {
                    Ok(user) => {
                        debug!(username = %user.username, "Profile loaded");
                        self.profile.user = Some(user);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to fetch profile");
                        self.profile.error = Some(PROFILE_FETCH_ERROR_MESSAGE.to_string());
                        if let Err(e) = self.store.clear() {
                            warn!(error = %e, "Failed to clear token after fetch failure");
                        }
                        // Leave the message on screen briefly before
                        // falling back to login
                        let tx = self.events_tx.clone();
                        self.redirect_timer = Some(schedule_expiry(
                            Utc::now() + Duration::seconds(PROFILE_REDIRECT_DELAY_SECS),
                            move || {
                                let _ = tx.try_send(AppEvent::DelayedRedirect(Route::Login));
                            },
                        ));
                    }
                }
            }
            AppEvent::SessionExpired => {
                info!("Session expired, logging out");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear expired token");
                }
                self.navigate(Route::Login);
            }
            AppEvent::DelayedRedirect(route) => {
                self.navigate(route);
            }
        }
    }

    #[cfg(test)]
    async fn recv_event(&mut self) -> AppEvent {
        self.events_rx.recv().await.expect("event channel closed")
    }
}

// ============================================================================
// Input Validation
// ============================================================================

/// Check if a character is acceptable for text input
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if an email character should be accepted
pub fn can_add_email_char(current_len: usize, c: char) -> bool {
    current_len < MAX_EMAIL_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryTokenStore;
    use crate::auth::token::tests::make_token;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(base_url: &str) -> (App, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let config = Config {
            api_base_url: Some(base_url.to_string()),
        };
        let app = App::with_store(config, store.clone()).unwrap();
        (app, store)
    }

    fn fill_login(app: &mut App, email: &str, password: &str) {
        app.login.email = email.to_string();
        app.login.password = password.to_string();
    }

    // -------------------------------------------------------------------------
    // Login Flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_stores_token_and_navigates() {
        let server = MockServer::start().await;
        let token = make_token(chrono::Duration::minutes(30));
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"access_token": token.clone()})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"username": "alice", "email": "a@b.com"}),
            ))
            .mount(&server)
            .await;

        let (mut app, store) = test_app(&server.uri());
        fill_login(&mut app, "a@b.com", "Abcdef1!");
        app.submit_login();
        assert!(app.login.submitting);

        let event = app.recv_event().await;
        app.apply_event(event);

        assert!(!app.login.submitting);
        assert_eq!(app.route, Route::Profile);
        assert_eq!(store.read(), Some(token));
    }

    #[tokio::test]
    async fn test_login_failure_joins_detail_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(422).set_body_json(
                json!({"detail": [{"msg": "bad email"}, {"msg": "bad password"}]}),
            ))
            .mount(&server)
            .await;

        let (mut app, store) = test_app(&server.uri());
        fill_login(&mut app, "a@b.com", "Abcdef1!");
        app.submit_login();

        let event = app.recv_event().await;
        app.apply_event(event);

        assert!(!app.login.submitting);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.login.error.as_deref(), Some("bad email bad password"));
        assert_eq!(store.read(), None);
    }

    #[tokio::test]
    async fn test_login_validation_rejects_before_network() {
        let server = MockServer::start().await;
        let (mut app, _) = test_app(&server.uri());

        fill_login(&mut app, "not-an-email", "Abcdef1!");
        app.submit_login();
        assert!(!app.login.submitting);
        assert_eq!(
            app.login.error.as_deref(),
            Some("Please enter a valid email address.")
        );

        fill_login(&mut app, "a@b.com", "nosymbol1A");
        app.submit_login();
        assert!(!app.login.submitting);
        assert!(app
            .login
            .error
            .as_deref()
            .unwrap()
            .starts_with("Password must be at least 8 characters"));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_generic_message_for_shapeless_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (mut app, _) = test_app(&server.uri());
        fill_login(&mut app, "a@b.com", "Abcdef1!");
        app.submit_login();

        let event = app.recv_event().await;
        app.apply_event(event);
        assert_eq!(
            app.login.error.as_deref(),
            Some("An unexpected error occurred.")
        );
    }

    // -------------------------------------------------------------------------
    // Registration Flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_register_success_navigates_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/register"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let (mut app, _) = test_app(&server.uri());
        app.navigate(Route::Register);
        app.register.username = "alice".to_string();
        app.register.email = "a@b.com".to_string();
        app.register.password = "Abcdef1!".to_string();
        app.submit_register();
        assert!(app.register.submitting);

        let event = app.recv_event().await;
        app.apply_event(event);

        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_register_failure_stays_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"detail": "Email already registered"})),
            )
            .mount(&server)
            .await;

        let (mut app, _) = test_app(&server.uri());
        app.navigate(Route::Register);
        app.register.username = "alice".to_string();
        app.register.email = "a@b.com".to_string();
        app.register.password = "Abcdef1!".to_string();
        app.submit_register();

        let event = app.recv_event().await;
        app.apply_event(event);

        assert_eq!(app.route, Route::Register);
        assert!(!app.register.submitting);
        assert_eq!(
            app.register.error.as_deref(),
            Some("Email already registered")
        );
    }

    #[tokio::test]
    async fn test_register_validation_first_failure_wins() {
        let server = MockServer::start().await;
        let (mut app, _) = test_app(&server.uri());
        app.navigate(Route::Register);

        app.register.username = "ab".to_string();
        app.register.email = "bad".to_string();
        app.register.password = "bad".to_string();
        app.submit_register();

        assert_eq!(
            app.register.validation_error.as_deref(),
            Some("Username must be at least 3 characters long.")
        );
        assert!(!app.register.submitting);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    // -------------------------------------------------------------------------
    // Profile Flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_profile_mount_without_token_redirects() {
        let server = MockServer::start().await;
        let (mut app, _) = test_app(&server.uri());

        app.navigate(Route::Profile);

        assert_eq!(app.route, Route::Login);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profile_mount_with_expired_token_redirects() {
        let server = MockServer::start().await;
        let (mut app, store) = test_app(&server.uri());
        // Expired token in a cookie record that has not itself lapsed
        store.set_raw(
            &make_token(chrono::Duration::seconds(-60)),
            Utc::now() + Duration::minutes(5),
        );

        app.navigate(Route::Profile);

        assert_eq!(app.route, Route::Login);
        assert_eq!(store.read(), None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profile_mount_with_malformed_token_redirects() {
        let server = MockServer::start().await;
        let (mut app, store) = test_app(&server.uri());
        store.set_raw("definitely-not-a-token", Utc::now() + Duration::minutes(5));

        app.navigate(Route::Profile);

        assert_eq!(app.route, Route::Login);
        assert_eq!(store.read(), None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profile_mount_with_valid_token_loads_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"username": "alice", "email": "alice@example.com"}),
            ))
            .mount(&server)
            .await;

        let (mut app, store) = test_app(&server.uri());
        store.store(&make_token(chrono::Duration::minutes(30))).unwrap();

        app.navigate(Route::Profile);
        assert!(app.profile.loading);

        let event = app.recv_event().await;
        app.apply_event(event);

        assert!(!app.profile.loading);
        let user = app.profile.user.as_ref().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(app.route, Route::Profile);
    }

    #[tokio::test(start_paused = true)]
    async fn test_profile_fetch_failure_redirects_after_delay() {
        let (mut app, store) = test_app("http://127.0.0.1:9");
        store.store(&make_token(chrono::Duration::minutes(30))).unwrap();
        app.route = Route::Profile;

        app.apply_event(AppEvent::ProfileLoaded(Err(ApiError::InvalidResponse(
            "connection refused".to_string(),
        ))));

        assert_eq!(
            app.profile.error.as_deref(),
            Some("Failed to fetch profile. Redirecting to login...")
        );
        assert_eq!(store.read(), None);
        assert_eq!(app.route, Route::Profile);

        // Paused clock advances to the redirect deadline
        let event = app.recv_event().await;
        assert!(matches!(event, AppEvent::DelayedRedirect(Route::Login)));
        app.apply_event(event);
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_logout_clears_token_and_navigates() {
        let (mut app, store) = test_app("http://127.0.0.1:9");
        store.store(&make_token(chrono::Duration::minutes(30))).unwrap();
        app.route = Route::Profile;

        app.logout();

        assert_eq!(app.route, Route::Login);
        assert_eq!(store.read(), None);
    }

    // -------------------------------------------------------------------------
    // Auto-Logout Timer
    // -------------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_login_mount_schedules_auto_logout() {
        let (mut app, store) = test_app("http://127.0.0.1:9");
        store.store(&make_token(chrono::Duration::seconds(5))).unwrap();

        app.navigate(Route::Login);
        assert!(store.read().is_some());

        // No user action; the timer fires at the expiry instant
        let event = app.recv_event().await;
        assert!(matches!(event, AppEvent::SessionExpired));
        app.apply_event(event);

        assert_eq!(app.route, Route::Login);
        assert_eq!(store.read(), None);
        // Exactly one expiry fires
        assert!(app.events_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_login_mount_discards_expired_token() {
        let (mut app, store) = test_app("http://127.0.0.1:9");
        store.set_raw(
            &make_token(chrono::Duration::seconds(-60)),
            Utc::now() + Duration::minutes(5),
        );

        app.navigate(Route::Login);

        assert_eq!(app.route, Route::Login);
        assert_eq!(store.read(), None);
        assert!(app.events_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_cancels_pending_auto_logout() {
        let (mut app, store) = test_app("http://127.0.0.1:9");
        store.store(&make_token(chrono::Duration::seconds(5))).unwrap();

        app.navigate(Route::Login);
        // Tear the login screen down before the token expires
        app.navigate(Route::Register);

        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        app.check_background_events();
        assert_eq!(app.route, Route::Register);
    }
}
