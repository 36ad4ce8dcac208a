//! Pages and the actions available on them

use crate::session::SignUpForm;
use crate::visit::{Location, VisitType};
use std::fmt;

/// The screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    SignUp,
    Dashboard,
    Visit,
    Setup,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::SignUp => "Sign Up",
            Page::Dashboard => "Dashboard",
            Page::Visit => "Visit",
            Page::Setup => "Setup",
        }
    }

    /// Whether the page is only shown to a signed-in user
    pub fn requires_session(&self) -> bool {
        matches!(self, Page::Dashboard | Page::Visit | Page::Setup)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A user action
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GoToSignUp,
    GoToLogin,
    Login { identifier: String, secret: String },
    Register(SignUpForm),
    OpenVisit,
    OpenSetup,
    BackToDashboard,
    Logout,
    Visit(VisitAction),
    Setup(SetupAction),
}

/// Actions on the visit screen's modals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitAction {
    ChooseLocation(Location),
    ChooseType(VisitType),
    CheckIn,
    CheckOut,
    SetCurrentStation(String),
    SetNextStation(String),
    ConfirmCheckOut,
    Close,
}

/// Actions on the training screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    SelectImages,
    Train,
    Reset,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::GoToSignUp => "sign up",
            Action::GoToLogin => "go to login",
            Action::Login { .. } => "log in",
            Action::Register(_) => "create an account",
            Action::OpenVisit => "open visits",
            Action::OpenSetup => "open setup",
            Action::BackToDashboard => "go back to the dashboard",
            Action::Logout => "log out",
            Action::Visit(_) => "manage visits",
            Action::Setup(_) => "train models",
        }
    }
}
