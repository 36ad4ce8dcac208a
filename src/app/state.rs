//! Application State
//!
//! The page router. Owns the current page and the per-page controllers, and
//! dispatches every user action through one `match` on `(page, action)`.

use crate::app::error::{AppError, AppResult};
use crate::app::page::{Action, Page, SetupAction, VisitAction};
use crate::session::{AuthError, Session, SessionStore, SignUpForm, ValidationErrors};
use crate::training::{TrainingConfig, TrainingScreen, TrainingSnapshot};
use crate::visit::{CheckInOutcome, DataSink, VisitFlow};
use std::sync::Arc;
use tokio::sync::watch;

/// Banner shown when sign-in is rejected
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password. Please try again.";

/// Banner shown when sign-up fails for a reason other than validation
pub const SIGN_UP_FAILED_MESSAGE: &str = "Failed to create account. Email may already be in use.";

/// The running application
pub struct App {
    session: Arc<SessionStore>,
    sink: Arc<dyn DataSink>,
    training_config: TrainingConfig,
    page: Page,
    visit: VisitFlow,
    setup: Option<TrainingScreen>,
    /// Single-line error shown above a form
    banner: Option<String>,
    /// Per-field errors of the sign-up form
    form_errors: ValidationErrors,
}

impl App {
    /// Start on the dashboard if a session was restored, else on login
    pub async fn new(
        session: Arc<SessionStore>,
        sink: Arc<dyn DataSink>,
        training_config: TrainingConfig,
    ) -> Self {
        let page = if session.is_authenticated().await {
            Page::Dashboard
        } else {
            Page::Login
        };
        tracing::debug!(%page, "App started");

        Self {
            session,
            sink,
            training_config,
            page,
            visit: VisitFlow::new(),
            setup: None,
            banner: None,
            form_errors: ValidationErrors::default(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn visit(&self) -> &VisitFlow {
        &self.visit
    }

    /// Training screen, while the setup page is open
    pub fn setup(&self) -> Option<&TrainingScreen> {
        self.setup.as_ref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn form_errors(&self) -> &ValidationErrors {
        &self.form_errors
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.session.current().await
    }

    /// Snapshot stream of the training screen, while the setup page is open
    pub fn training_updates(&self) -> Option<watch::Receiver<TrainingSnapshot>> {
        self.setup.as_ref().map(TrainingScreen::subscribe)
    }

    /// Apply one user action
    pub async fn dispatch(&mut self, action: Action) -> AppResult<()> {
        match (self.page, action) {
            (Page::Login, Action::GoToSignUp) => self.navigate(Page::SignUp),
            (Page::SignUp, Action::GoToLogin) => self.navigate(Page::Login),
            (Page::Login, Action::Login { identifier, secret }) => {
                self.login(&identifier, &secret).await?
            }
            (Page::SignUp, Action::Register(form)) => self.register(&form).await?,
            (Page::Dashboard, Action::OpenVisit) => self.navigate(Page::Visit),
            (Page::Dashboard, Action::OpenSetup) => self.navigate(Page::Setup),
            (Page::Visit | Page::Setup, Action::BackToDashboard) => {
                self.navigate(Page::Dashboard)
            }
            (Page::Dashboard | Page::Visit | Page::Setup, Action::Logout) => self.logout().await?,
            (Page::Visit, Action::Visit(action)) => self.on_visit(action).await?,
            (Page::Setup, Action::Setup(action)) => self.on_setup(action)?,
            (page, action) => {
                return Err(AppError::Unavailable {
                    action: action.name(),
                    page,
                })
            }
        }
        Ok(())
    }

    /// Switch pages, tearing down whatever the old page owned
    fn navigate(&mut self, page: Page) {
        if page == self.page {
            return;
        }

        match self.page {
            Page::Visit => self.visit.close(),
            Page::Setup => {
                if let Some(mut screen) = self.setup.take() {
                    screen.shutdown();
                }
            }
            _ => {}
        }

        if page == Page::Setup {
            self.setup = Some(TrainingScreen::new(self.training_config.clone()));
        }

        tracing::info!(from = %self.page, to = %page, "Navigate");
        self.page = page;
        self.banner = None;
        self.form_errors = ValidationErrors::default();
    }

    async fn login(&mut self, identifier: &str, secret: &str) -> AppResult<()> {
        self.banner = None;

        match self.session.sign_in(identifier, secret).await {
            Ok(_) => {
                self.navigate(Page::Dashboard);
                Ok(())
            }
            Err(AuthError::InvalidCredentials) => {
                self.banner = Some(LOGIN_FAILED_MESSAGE.to_string());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn register(&mut self, form: &SignUpForm) -> AppResult<()> {
        self.banner = None;
        self.form_errors = ValidationErrors::default();

        match self.session.sign_up(form).await {
            Ok(_) => {
                self.navigate(Page::Dashboard);
                Ok(())
            }
            Err(AuthError::Validation(errors)) => {
                self.form_errors = errors;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Sign-up failed: {}", e);
                self.banner = Some(SIGN_UP_FAILED_MESSAGE.to_string());
                Ok(())
            }
        }
    }

    /// Sign out and return to login. On a storage failure the session is
    /// still active, so the page stays put and the error is returned.
    async fn logout(&mut self) -> AppResult<()> {
        self.session.sign_out().await?;
        self.navigate(Page::Login);
        Ok(())
    }

    async fn on_visit(&mut self, action: VisitAction) -> AppResult<()> {
        match action {
            VisitAction::ChooseLocation(location) => self.visit.choose_location(location)?,
            VisitAction::ChooseType(visit_type) => self.visit.choose_type(visit_type)?,
            VisitAction::CheckIn => {
                let session = self.session.current().await;
                let outcome = self
                    .visit
                    .check_in(session.as_ref(), self.sink.as_ref())
                    .await?;
                if outcome == CheckInOutcome::NotRecorded {
                    tracing::debug!("Check-in not recorded; flow unchanged");
                }
            }
            VisitAction::CheckOut => self.visit.check_out()?,
            VisitAction::SetCurrentStation(text) => self.visit.set_current_station(text)?,
            VisitAction::SetNextStation(text) => self.visit.set_next_station(text)?,
            VisitAction::ConfirmCheckOut => {
                self.visit.confirm_check_out()?;
            }
            VisitAction::Close => self.visit.close(),
        }
        Ok(())
    }

    fn on_setup(&mut self, action: SetupAction) -> AppResult<()> {
        let screen = self
            .setup
            .get_or_insert_with(|| TrainingScreen::new(self.training_config.clone()));

        match action {
            SetupAction::SelectImages => {
                screen.select_images()?;
            }
            SetupAction::Train => screen.train()?,
            SetupAction::Reset => screen.reset(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Field, FieldError, SessionConfig, DEMO_SECRET, SESSION_KEY};
    use crate::storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};
    use crate::training::TrainingState;
    use crate::visit::{Location, Modal, NullSink, VisitType};
    use std::io;
    use tokio::time::Duration;

    /// Memory store whose deletes always fail
    struct StuckStore(MemoryStore);

    impl KeyValueStore for StuckStore {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set(key, value)
        }

        fn delete(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    async fn app_with(storage: Arc<dyn KeyValueStore>) -> App {
        let session = Arc::new(SessionStore::open(storage, SessionConfig::instant()).unwrap());
        App::new(session, Arc::new(NullSink), TrainingConfig::default()).await
    }

    async fn signed_in_app() -> (App, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        let mut app = app_with(storage.clone()).await;
        app.dispatch(Action::Login {
            identifier: "ankit".to_string(),
            secret: DEMO_SECRET.to_string(),
        })
        .await
        .unwrap();
        (app, storage)
    }

    fn valid_form() -> SignUpForm {
        SignUpForm::new("Asha Rao", "asha@example.com", "9876543210", "secret1", "secret1")
    }

    #[tokio::test]
    async fn test_starts_on_login_when_signed_out() {
        let app = app_with(Arc::new(MemoryStore::new())).await;
        assert_eq!(app.page(), Page::Login);
    }

    #[tokio::test]
    async fn test_restored_session_starts_on_dashboard() {
        let (_, storage) = signed_in_app().await;
        let app = app_with(storage).await;
        assert_eq!(app.page(), Page::Dashboard);
        assert!(app.current_session().await.is_some());
    }

    #[tokio::test]
    async fn test_signed_out_cannot_reach_private_pages() {
        let mut app = app_with(Arc::new(MemoryStore::new())).await;

        for action in [Action::OpenVisit, Action::OpenSetup, Action::Logout] {
            let err = app.dispatch(action).await.unwrap_err();
            assert!(matches!(err, AppError::Unavailable { page: Page::Login, .. }));
        }

        app.dispatch(Action::GoToSignUp).await.unwrap();
        assert_eq!(app.page(), Page::SignUp);
        assert!(app.dispatch(Action::OpenVisit).await.is_err());

        app.dispatch(Action::GoToLogin).await.unwrap();
        assert_eq!(app.page(), Page::Login);
    }

    #[tokio::test]
    async fn test_failed_login_shows_banner() {
        let mut app = app_with(Arc::new(MemoryStore::new())).await;

        app.dispatch(Action::Login {
            identifier: "ankit".to_string(),
            secret: "wrong".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(app.page(), Page::Login);
        assert_eq!(app.banner(), Some(LOGIN_FAILED_MESSAGE));
        assert!(app.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_login_lands_on_dashboard() {
        let (app, _) = signed_in_app().await;
        assert_eq!(app.page(), Page::Dashboard);
        assert_eq!(app.banner(), None);
    }

    #[tokio::test]
    async fn test_register_shows_field_errors() {
        let mut app = app_with(Arc::new(MemoryStore::new())).await;
        app.dispatch(Action::GoToSignUp).await.unwrap();

        let form = SignUpForm {
            mobile_number: "12345".to_string(),
            ..valid_form()
        };
        app.dispatch(Action::Register(form)).await.unwrap();

        assert_eq!(app.page(), Page::SignUp);
        assert_eq!(
            app.form_errors().get(Field::MobileNumber),
            Some(FieldError::InvalidMobile)
        );

        app.dispatch(Action::Register(valid_form())).await.unwrap();
        assert_eq!(app.page(), Page::Dashboard);
        assert!(app.form_errors().is_empty());
    }

    #[tokio::test]
    async fn test_logout_returns_to_login_and_clears_storage() {
        let (mut app, storage) = signed_in_app().await;
        app.dispatch(Action::OpenVisit).await.unwrap();

        app.dispatch(Action::Logout).await.unwrap();
        assert_eq!(app.page(), Page::Login);
        assert_eq!(storage.get(SESSION_KEY).unwrap(), None);
        assert!(app.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_logout_stays_signed_in() {
        let storage = Arc::new(StuckStore(MemoryStore::new()));
        let mut app = app_with(storage.clone()).await;
        app.dispatch(Action::Login {
            identifier: "ankit".to_string(),
            secret: DEMO_SECRET.to_string(),
        })
        .await
        .unwrap();

        let err = app.dispatch(Action::Logout).await.unwrap_err();
        assert!(matches!(err, AppError::Session(AuthError::Storage(_))));
        assert_eq!(app.page(), Page::Dashboard);
        assert!(app.current_session().await.is_some());
        assert!(storage.get(SESSION_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_visit_flow_through_app() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Action::OpenVisit).await.unwrap();

        app.dispatch(Action::Visit(VisitAction::ChooseLocation(Location::Saket)))
            .await
            .unwrap();
        app.dispatch(Action::Visit(VisitAction::ChooseType(VisitType::Home)))
            .await
            .unwrap();
        app.dispatch(Action::Visit(VisitAction::CheckIn)).await.unwrap();

        assert_eq!(app.visit().modal(), Some(Modal::CheckInConfirmation));
        assert_eq!(app.visit().location(), Some(Location::Saket));

        app.dispatch(Action::Visit(VisitAction::Close)).await.unwrap();
        assert!(app.visit().is_idle());
    }

    #[tokio::test]
    async fn test_leaving_visit_page_closes_flow() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Action::OpenVisit).await.unwrap();
        app.dispatch(Action::Visit(VisitAction::ChooseLocation(Location::Saket)))
            .await
            .unwrap();

        app.dispatch(Action::BackToDashboard).await.unwrap();
        assert!(app.visit().is_idle());

        let err = app
            .dispatch(Action::Visit(VisitAction::CheckIn))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable { page: Page::Dashboard, .. }));
    }

    #[tokio::test]
    async fn test_visit_errors_surface() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Action::OpenVisit).await.unwrap();

        let err = app
            .dispatch(Action::Visit(VisitAction::ConfirmCheckOut))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Visit(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_setup_cancels_training() {
        let (mut app, _) = signed_in_app().await;
        app.dispatch(Action::OpenSetup).await.unwrap();
        assert!(app.setup().is_some());

        let err = app
            .dispatch(Action::Setup(SetupAction::Train))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Training(_)));

        app.dispatch(Action::Setup(SetupAction::SelectImages))
            .await
            .unwrap();
        app.dispatch(Action::Setup(SetupAction::Train)).await.unwrap();

        let mut updates = app.training_updates().unwrap();
        assert_eq!(updates.borrow().state, TrainingState::Processing);

        app.dispatch(Action::BackToDashboard).await.unwrap();
        assert!(app.setup().is_none());
        assert!(app.training_updates().is_none());

        // Timer is gone: the snapshot channel closes without completing
        let closed = tokio::time::timeout(Duration::from_secs(60), async {
            while updates.changed().await.is_ok() {}
        })
        .await;
        assert!(closed.is_ok());
        assert_eq!(updates.borrow().state, TrainingState::Processing);
    }
}
