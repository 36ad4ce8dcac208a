//! Page rendering
//!
//! Plain-text views of each page. Rendering never mutates the app.

use crate::app::{App, Page};
use crate::session::{Field, Session, SignUpForm};
use crate::training::{TrainingSnapshot, TrainingState, RESULT_STATS};
use crate::visit::{Location, Modal, VisitFlow};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;

/// Render the whole screen: header, page body, and any banner
pub fn render(app: &App, session: Option<&Session>, draft: &SignUpForm) -> String {
    let mut out = String::new();

    header(&mut out, app.page(), session);

    if let Some(banner) = app.banner() {
        let _ = writeln!(out, "! {}", banner);
        out.push('\n');
    }

    match app.page() {
        Page::Login => login(&mut out),
        Page::SignUp => sign_up(&mut out, app, draft),
        Page::Dashboard => dashboard(&mut out),
        Page::Visit => visit(&mut out, app.visit()),
        Page::Setup => {
            if let Some(screen) = app.setup() {
                setup(&mut out, &screen.snapshot());
            }
        }
    }

    out
}

fn header(out: &mut String, page: Page, session: Option<&Session>) {
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    match session {
        Some(session) if page.requires_session() => {
            let _ = writeln!(out, "Station Desk | {} | {}", page, session.display_name());
        }
        _ => {
            let _ = writeln!(out, "Station Desk | {}", page);
        }
    }
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

fn login(out: &mut String) {
    out.push_str("Welcome back. Sign in to continue.\n");
    out.push_str("  login <email> <password>\n");
    out.push_str("Don't have an account? Type 'signup'.\n");
}

fn sign_up(out: &mut String, app: &App, draft: &SignUpForm) {
    out.push_str("Create your account\n\n");

    let fields = [
        (Field::FullName, draft.full_name.clone()),
        (Field::Email, draft.email.clone()),
        (Field::MobileNumber, draft.mobile_number.clone()),
        (Field::Password, mask(&draft.password)),
        (Field::ConfirmPassword, mask(&draft.confirm_password)),
    ];

    for (field, value) in fields {
        let _ = writeln!(out, "  {:<18} {}", format!("{}:", field.label()), value);
        if let Some(error) = app.form_errors().get(field) {
            let _ = writeln!(out, "  {:<18} ^ {}", "", error.message(field));
        }
    }

    out.push_str("\nType 'submit' when ready, or 'login' if you already have an account.\n");
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn dashboard(out: &mut String) {
    out.push_str("  visit   Visit: manage your location visits and check-ins\n");
    out.push_str("  setup   Setup: train models to analyze EV charging station images\n");
}

fn visit(out: &mut String, flow: &VisitFlow) {
    out.push_str("Select Location\n\n");
    for (i, location) in Location::ALL.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, location);
    }

    let Some(modal) = flow.modal() else {
        return;
    };

    let _ = writeln!(out, "\n+-- {} {}", modal.title(), "-".repeat(40));
    let location = flow.location().map(|l| l.name()).unwrap_or_default();

    match modal {
        Modal::VisitType => {
            let _ = writeln!(out, "| You are visiting {}", location);
            out.push_str("| home | station\n");
        }
        Modal::CheckInOut => {
            let _ = writeln!(out, "| Location: {}", location);
            let visit_type = flow.visit_type().map(|t| t.as_str()).unwrap_or_default();
            let _ = writeln!(out, "| Type: {}", visit_type);
            out.push_str("| in | out\n");
        }
        Modal::CheckInConfirmation => {
            out.push_str("| You are checked in at\n");
            let _ = writeln!(out, "| {}", location);
        }
        Modal::CheckOutForm => {
            if let Some(details) = flow.check_out_details() {
                let _ = writeln!(out, "| Current Station: {}", details.current_station);
                let _ = writeln!(out, "| Next Station:    {}", details.next_station);
            }
            if flow.can_confirm_check_out() {
                out.push_str("| confirm\n");
            } else {
                out.push_str("| (fill in both stations to confirm)\n");
            }
        }
    }
    out.push_str("| close\n");
    let _ = writeln!(out, "+{}", "-".repeat(RULE_WIDTH - 1));
}

fn setup(out: &mut String, snapshot: &TrainingSnapshot) {
    out.push_str("AI Model Training\n\n");

    if snapshot.images.is_empty() {
        out.push_str("No images selected. Type 'images' to select some.\n");
    } else {
        let _ = writeln!(out, "Selected Images ({})", snapshot.images.len());
        for image in &snapshot.images {
            let _ = writeln!(out, "  - {}", image);
        }
    }
    out.push('\n');

    match snapshot.state {
        TrainingState::Idle => {
            if snapshot.images.is_empty() {
                out.push_str("Upload images first to train the model\n");
            } else {
                let _ = writeln!(
                    out,
                    "Ready to train with {} images. Type 'train'.",
                    snapshot.images.len()
                );
            }
        }
        TrainingState::Processing => {
            let _ = writeln!(out, "{}", progress_line(snapshot));
            out.push_str("Processing images and training AI model...\n");
        }
        TrainingState::Completed => {
            out.push_str("Training Complete!\n");
            out.push_str("Your AI model is now ready to analyze EV station images\n");
            for (label, value) in RESULT_STATS {
                let _ = writeln!(out, "  {}: {}", label, value);
            }
            out.push_str("Type 'reset' to train another model.\n");
        }
    }
}

/// One-line progress bar, e.g. `[#########.....]  62%`
pub fn progress_line(snapshot: &TrainingSnapshot) -> String {
    let pct = snapshot.display_progress();
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled.min(BAR_WIDTH)),
        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        pct
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, VisitAction};
    use crate::session::{SessionConfig, SessionStore, DEMO_SECRET};
    use crate::storage::MemoryStore;
    use crate::training::TrainingConfig;
    use crate::visit::{NullSink, VisitType};
    use std::sync::Arc;

    async fn app() -> App {
        let storage = Arc::new(MemoryStore::new());
        let session = Arc::new(SessionStore::open(storage, SessionConfig::instant()).unwrap());
        App::new(session, Arc::new(NullSink), TrainingConfig::default()).await
    }

    #[tokio::test]
    async fn test_render_login_with_banner() {
        let mut app = app().await;
        app.dispatch(Action::Login {
            identifier: "nobody".to_string(),
            secret: "nothing".to_string(),
        })
        .await
        .unwrap();

        let text = render(&app, None, &SignUpForm::default());
        assert!(text.contains("Station Desk | Login"));
        assert!(text.contains("! Invalid email or password. Please try again."));
    }

    #[tokio::test]
    async fn test_render_sign_up_errors_and_masking() {
        let mut app = app().await;
        app.dispatch(Action::GoToSignUp).await.unwrap();

        let draft = SignUpForm::new("", "asha@example.com", "9876543210", "secret1", "secret2");
        app.dispatch(Action::Register(draft.clone())).await.unwrap();

        let text = render(&app, None, &draft);
        assert!(text.contains("Full name is required"));
        assert!(text.contains("Passwords do not match"));
        assert!(text.contains("*******"));
        assert!(!text.contains("secret1"));
    }

    #[tokio::test]
    async fn test_render_visit_confirmation() {
        let mut app = app().await;
        app.dispatch(Action::Login {
            identifier: "ankit".to_string(),
            secret: DEMO_SECRET.to_string(),
        })
        .await
        .unwrap();
        app.dispatch(Action::OpenVisit).await.unwrap();
        app.dispatch(Action::Visit(VisitAction::ChooseLocation(Location::LajpatNagar)))
            .await
            .unwrap();
        app.dispatch(Action::Visit(VisitAction::ChooseType(VisitType::Station)))
            .await
            .unwrap();
        app.dispatch(Action::Visit(VisitAction::CheckIn)).await.unwrap();

        let session = app.current_session().await;
        let text = render(&app, session.as_ref(), &SignUpForm::default());
        assert!(text.contains("Station Desk | Visit | ankit"));
        assert!(text.contains("Check In Successful"));
        assert!(text.contains("| Lajpat Nagar"));
        assert!(text.contains("15. Janakpuri"));
    }

    #[test]
    fn test_progress_line_clamps() {
        let snapshot = TrainingSnapshot {
            state: TrainingState::Processing,
            progress: 117.3,
            images: Vec::new(),
        };
        let line = progress_line(&snapshot);
        assert!(line.starts_with(&format!("[{}]", "#".repeat(BAR_WIDTH))));
        assert!(line.ends_with("100%"));

        let snapshot = TrainingSnapshot {
            progress: 0.0,
            ..snapshot
        };
        assert!(progress_line(&snapshot).ends_with("  0%"));
    }
}
