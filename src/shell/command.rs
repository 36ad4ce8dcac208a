//! Shell command parsing
//!
//! Turns one input line into an app action, interpreted against the page
//! currently shown. The sign-up form is filled field by field into a draft
//! kept by the shell and submitted as a whole.

use crate::app::{Action, Page, SetupAction, VisitAction};
use crate::session::Field;
use crate::visit::{Location, VisitType};

/// A parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    /// Show the commands for the current page
    Help,
    /// Leave the shell
    Quit,
    /// Re-render the current page
    Show,
    /// Edit one sign-up form field
    Draft(Field, String),
    /// Submit the sign-up draft
    Submit,
    /// Pass an action to the app
    App(Action),
}

/// Parse `line` in the context of `page`
pub fn parse(line: &str, page: Page) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_lowercase();

    // Available everywhere
    match word.as_str() {
        "" | "show" => return Ok(ShellCommand::Show),
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        _ => {}
    }

    if page.requires_session() {
        match word.as_str() {
            "logout" => return Ok(ShellCommand::App(Action::Logout)),
            "back" => return Ok(ShellCommand::App(Action::BackToDashboard)),
            _ => {}
        }
    }

    match page {
        Page::Login => parse_login(&word, rest),
        Page::SignUp => parse_sign_up(&word, rest),
        Page::Dashboard => parse_dashboard(&word),
        Page::Visit => parse_visit(&word, rest),
        Page::Setup => parse_setup(&word),
    }
}

fn unknown(word: &str, page: Page) -> String {
    format!("Unknown command on the {} page: {} (try 'help')", page, word)
}

fn required(rest: &str, what: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Missing {}", what))
    } else {
        Ok(rest.to_string())
    }
}

fn parse_login(word: &str, rest: &str) -> Result<ShellCommand, String> {
    match word {
        "login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(identifier), Some(secret), None) => Ok(ShellCommand::App(Action::Login {
                    identifier: identifier.to_string(),
                    secret: secret.to_string(),
                })),
                _ => Err("Usage: login <email> <password>".to_string()),
            }
        }
        "signup" => Ok(ShellCommand::App(Action::GoToSignUp)),
        other => Err(unknown(other, Page::Login)),
    }
}

fn parse_sign_up(word: &str, rest: &str) -> Result<ShellCommand, String> {
    let field = match word {
        "name" => Field::FullName,
        "email" => Field::Email,
        "mobile" | "phone" => Field::MobileNumber,
        "password" => Field::Password,
        "confirm" => Field::ConfirmPassword,
        "submit" => return Ok(ShellCommand::Submit),
        "login" => return Ok(ShellCommand::App(Action::GoToLogin)),
        other => return Err(unknown(other, Page::SignUp)),
    };
    // Empty values are allowed so a field can be cleared
    Ok(ShellCommand::Draft(field, rest.to_string()))
}

fn parse_dashboard(word: &str) -> Result<ShellCommand, String> {
    match word {
        "visit" => Ok(ShellCommand::App(Action::OpenVisit)),
        "setup" => Ok(ShellCommand::App(Action::OpenSetup)),
        other => Err(unknown(other, Page::Dashboard)),
    }
}

fn parse_visit(word: &str, rest: &str) -> Result<ShellCommand, String> {
    let action = match word {
        "loc" | "location" => {
            let location: Location = required(rest, "location")?.parse()?;
            VisitAction::ChooseLocation(location)
        }
        "home" => VisitAction::ChooseType(VisitType::Home),
        "station" => VisitAction::ChooseType(VisitType::Station),
        "in" | "checkin" => VisitAction::CheckIn,
        "out" | "checkout" => VisitAction::CheckOut,
        "current" => VisitAction::SetCurrentStation(rest.to_string()),
        "next" => VisitAction::SetNextStation(rest.to_string()),
        "confirm" => VisitAction::ConfirmCheckOut,
        "close" => VisitAction::Close,
        other => match other.parse::<usize>().ok().and_then(Location::from_index) {
            // A bare number picks a location
            Some(location) => VisitAction::ChooseLocation(location),
            None => return Err(unknown(other, Page::Visit)),
        },
    };
    Ok(ShellCommand::App(Action::Visit(action)))
}

fn parse_setup(word: &str) -> Result<ShellCommand, String> {
    let action = match word {
        "images" | "select" => SetupAction::SelectImages,
        "train" => SetupAction::Train,
        "reset" => SetupAction::Reset,
        other => return Err(unknown(other, Page::Setup)),
    };
    Ok(ShellCommand::App(Action::Setup(action)))
}

/// Command summary for `page`
pub fn help(page: Page) -> &'static str {
    match page {
        Page::Login => {
            "login <email> <password>   sign in\n\
             signup                     create an account\n\
             quit                       leave"
        }
        Page::SignUp => {
            "name <full name>           set full name\n\
             email <email>              set email\n\
             mobile <number>            set mobile number\n\
             password <password>        set password\n\
             confirm <password>         repeat password\n\
             submit                     create the account\n\
             login                      back to login"
        }
        Page::Dashboard => {
            "visit                      check in or out of a station\n\
             setup                      train the station model\n\
             logout                     sign out"
        }
        Page::Visit => {
            "loc <n|name>  or  <n>      pick a location\n\
             home | station             pick the visit type\n\
             in | out                   check in or start check out\n\
             current <text>             current station (check out)\n\
             next <text>                next station (check out)\n\
             confirm                    confirm check out\n\
             close                      close the dialog\n\
             back | logout              leave the page"
        }
        Page::Setup => {
            "images                     select images\n\
             train                      train the model\n\
             reset                      train another model\n\
             back | logout              leave the page"
        }
    }
}
