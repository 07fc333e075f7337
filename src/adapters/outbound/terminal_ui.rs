//! Terminal UI
//!
//! Implements PermissionGate and Notifier on a plain terminal: notices are
//! printed, and yes/no questions wait for the next line the user types.
//! The terminal session routes that line here via [`TerminalUi::answer_pending`].

use crate::domain::entities::{DisplayState, PermissionState};
use crate::domain::ports::{Notifier, PermissionGate};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::oneshot;

const PERMISSION_QUESTION: &str = "Allow geo-address to access this device's location?";
const SETTINGS_QUESTION: &str =
    "Location Settings: Location is disabled. Please enable location services. Open settings?";

/// A question waiting for the user's next line.
struct PendingPrompt {
    question: &'static str,
    reply: oneshot::Sender<bool>,
}

pub struct TerminalUi {
    permission: Mutex<PermissionState>,
    pending: Mutex<Option<PendingPrompt>>,
}

impl TerminalUi {
    pub fn new(permission: PermissionState) -> Self {
        Self {
            permission: Mutex::new(permission),
            pending: Mutex::new(None),
        }
    }

    /// Print the display state.
    pub fn render(&self, state: &DisplayState) {
        println!("{}", render_line(state));
    }

    /// Whether a question is waiting for an answer.
    pub fn has_pending_prompt(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Hand a typed line to the waiting question.
    ///
    /// Returns `false` when nothing was waiting, so the line is a command.
    pub fn answer_pending(&self, line: &str) -> bool {
        let Some(prompt) = self.pending.lock().take() else {
            return false;
        };
        let answer = is_yes(line);
        tracing::debug!("{:?} answered {}", prompt.question, answer);
        let _ = prompt.reply.send(answer);
        true
    }

    /// Ask a yes/no question. A newer question replaces an unanswered
    /// one, which then counts as "no".
    async fn ask(&self, question: &'static str) -> bool {
        let (reply, answer) = oneshot::channel();
        let superseded = self.pending.lock().replace(PendingPrompt { question, reply });
        if let Some(prompt) = superseded {
            tracing::debug!("{:?} superseded by {:?}", prompt.question, question);
        }

        println!("{} [y/N]", question);
        answer.await.unwrap_or(false)
    }
}

#[async_trait]
impl PermissionGate for TerminalUi {
    fn check(&self) -> PermissionState {
        *self.permission.lock()
    }

    async fn request(&self) -> PermissionState {
        let state = if self.ask(PERMISSION_QUESTION).await {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        *self.permission.lock() = state;
        state
    }
}

#[async_trait]
impl Notifier for TerminalUi {
    fn notify(&self, message: &str) {
        println!("! {}", message);
    }

    async fn confirm_location_settings(&self) -> bool {
        self.ask(SETTINGS_QUESTION).await
    }
}

/// One-line rendering of the display state.
pub fn render_line(state: &DisplayState) -> String {
    match state {
        DisplayState::Idle => "No location yet".to_string(),
        DisplayState::Loading => "Fetching location...".to_string(),
        DisplayState::ShowingAddress(result) => match result.display_text() {
            Some(text) => format!("Location: {}", text),
            None => "Address not found".to_string(),
        },
        DisplayState::ShowingError(reason) => reason.clone(),
    }
}

fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::{AddressResult, Coordinate};
    use std::sync::Arc;
    use std::time::Duration;

    async fn wait_for_prompt(ui: &TerminalUi) {
        for _ in 0..200 {
            if ui.has_pending_prompt() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no prompt was issued");
    }

    // ===== render_line Tests =====

    #[test]
    fn test_render_line() {
        assert_eq!(render_line(&DisplayState::Idle), "No location yet");
        assert_eq!(render_line(&DisplayState::Loading), "Fetching location...");
        assert_eq!(
            render_line(&DisplayState::ShowingAddress(AddressResult::ResolvedAddress(
                "1600 Amphitheatre Pkwy".to_string()
            ))),
            "Location: 1600 Amphitheatre Pkwy"
        );
        assert_eq!(
            render_line(&DisplayState::ShowingAddress(
                AddressResult::FallbackCoordinate(Coordinate::new(37.0, -122.0))
            )),
            "Location: Lat: 37.0, Lon: -122.0"
        );
        assert_eq!(
            render_line(&DisplayState::ShowingAddress(AddressResult::NotFound)),
            "Address not found"
        );
        assert_eq!(
            render_line(&DisplayState::ShowingError("Permission denied".to_string())),
            "Permission denied"
        );
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("yep"));
    }

    // ===== Prompt Tests =====

    #[test]
    fn test_answer_without_prompt_is_not_consumed() {
        let ui = TerminalUi::new(PermissionState::Unknown);
        assert!(!ui.answer_pending("y"));
    }

    #[tokio::test]
    async fn test_permission_request_granted() {
        let ui = Arc::new(TerminalUi::new(PermissionState::Unknown));
        assert_eq!(ui.check(), PermissionState::Unknown);

        let request = tokio::spawn({
            let ui = ui.clone();
            async move { ui.request().await }
        });
        wait_for_prompt(&ui).await;
        assert!(ui.answer_pending("y"));

        assert_eq!(request.await.unwrap(), PermissionState::Granted);
        assert_eq!(ui.check(), PermissionState::Granted);
        assert!(!ui.has_pending_prompt());
    }

    #[tokio::test]
    async fn test_permission_request_denied() {
        let ui = Arc::new(TerminalUi::new(PermissionState::Unknown));

        let request = tokio::spawn({
            let ui = ui.clone();
            async move { ui.request().await }
        });
        wait_for_prompt(&ui).await;
        assert!(ui.answer_pending("no"));

        assert_eq!(request.await.unwrap(), PermissionState::Denied);
        assert_eq!(ui.check(), PermissionState::Denied);
    }

    #[tokio::test]
    async fn test_newer_prompt_supersedes_older() {
        let ui = Arc::new(TerminalUi::new(PermissionState::Unknown));

        let first = tokio::spawn({
            let ui = ui.clone();
            async move { ui.confirm_location_settings().await }
        });
        wait_for_prompt(&ui).await;

        let second = tokio::spawn({
            let ui = ui.clone();
            async move { ui.request().await }
        });

        // The first prompt resolves as "no" once it is replaced.
        assert!(!first.await.unwrap());

        wait_for_prompt(&ui).await;
        assert!(ui.answer_pending("y"));
        assert_eq!(second.await.unwrap(), PermissionState::Granted);
    }

    #[tokio::test]
    async fn test_confirm_location_settings() {
        let ui = Arc::new(TerminalUi::new(PermissionState::Granted));

        let confirm = tokio::spawn({
            let ui = ui.clone();
            async move { ui.confirm_location_settings().await }
        });
        wait_for_prompt(&ui).await;
        ui.answer_pending("Y");

        assert!(confirm.await.unwrap());
    }
}
