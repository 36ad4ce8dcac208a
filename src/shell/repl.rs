//! Shell session
//!
//! Glue between input lines and the app: parses, dispatches, and keeps the
//! sign-up draft. The terminal loop itself lives in the binary.

use crate::app::{Action, App, Page};
use crate::session::{Field, SignUpForm};
use crate::shell::command::{self, ShellCommand};
use crate::shell::render;

/// What the caller should do after a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Re-render the page
    Render,
    /// Print this text, then keep going
    Message(String),
    /// Leave the shell
    Quit,
}

/// One interactive session over an [`App`]
pub struct Shell {
    app: App,
    draft: SignUpForm,
}

impl Shell {
    pub fn new(app: App) -> Self {
        Self {
            app,
            draft: SignUpForm::default(),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn draft(&self) -> &SignUpForm {
        &self.draft
    }

    /// The current page as text
    pub async fn screen(&self) -> String {
        let session = self.app.current_session().await;
        render::render(&self.app, session.as_ref(), &self.draft)
    }

    /// Handle one input line
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let page = self.app.page();

        let command = match command::parse(line, page) {
            Ok(command) => command,
            Err(message) => return Reply::Message(message),
        };

        match command {
            ShellCommand::Help => Reply::Message(command::help(page).to_string()),
            ShellCommand::Quit => Reply::Quit,
            ShellCommand::Show => Reply::Render,
            ShellCommand::Draft(field, value) => {
                self.set_draft(field, value);
                Reply::Render
            }
            ShellCommand::Submit => {
                let form = self.draft.clone();
                self.dispatch(Action::Register(form)).await
            }
            ShellCommand::App(action) => self.dispatch(action).await,
        }
    }

    async fn dispatch(&mut self, action: Action) -> Reply {
        let was = self.app.page();

        if let Err(e) = self.app.dispatch(action).await {
            return Reply::Message(e.to_string());
        }

        // A finished sign-up leaves the form behind
        if was == Page::SignUp && self.app.page() != Page::SignUp {
            self.draft = SignUpForm::default();
        }
        Reply::Render
    }

    fn set_draft(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::FullName => &mut self.draft.full_name,
            Field::Email => &mut self.draft.email,
            Field::MobileNumber => &mut self.draft.mobile_number,
            Field::Password => &mut self.draft.password,
            Field::ConfirmPassword => &mut self.draft.confirm_password,
        };
        *slot = value;
    }
}
