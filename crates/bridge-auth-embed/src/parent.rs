//! Parent-side handshake state machine.

use std::time::Duration;

use crate::message::EmbedMessage;

/// How long the parent waits for the first status message before showing
/// the timeout fallback. The timer starts when the embed is requested and
/// is canceled by any status message, authenticated or not.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(6);

/// UI effect the embedding page must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// The frame is authenticated: remove the loading indicator.
    ClearLoading,
    /// The frame reported unauthenticated: the parent cannot finish a
    /// cross-origin login inside the frame, so instruct the user to sign
    /// in out of band (new tab).
    ShowSignInFallback,
    /// No status arrived in time: show the "still loading / open in a new
    /// tab" fallback.
    ShowTimeoutFallback,
}

/// Handshake progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// Waiting for the first status message.
    Pending,
    /// A status message arrived; `authenticated` is its latest value.
    Settled { authenticated: bool },
    /// The timeout fired before any status message.
    TimedOut,
}

/// One listener per embedded frame, filtering on sender origin and site.
#[derive(Debug)]
pub struct ParentHandshake {
    expected_origin: String,
    expected_site: String,
    outcome: HandshakeOutcome,
    timeout_fired: bool,
}

impl ParentHandshake {
    /// Start the handshake for a frame embedded from `expected_origin`
    /// identifying itself as `expected_site`.
    pub fn new(expected_origin: impl Into<String>, expected_site: impl Into<String>) -> Self {
        Self {
            expected_origin: expected_origin.into(),
            expected_site: expected_site.into(),
            outcome: HandshakeOutcome::Pending,
            timeout_fired: false,
        }
    }

    /// Feed a received message event. Returns the UI action to apply, or
    /// `None` when the event must be ignored (wrong origin, wrong shape,
    /// wrong site).
    pub fn on_message(&mut self, sender_origin: &str, raw_payload: &str) -> Option<UiAction> {
        if sender_origin != self.expected_origin {
            return None;
        }

        let EmbedMessage::AuthStatus {
            site,
            authenticated,
        } = EmbedMessage::parse(raw_payload)?;

        if site != self.expected_site {
            return None;
        }

        // Any status message settles the handshake and cancels the timer.
        self.outcome = HandshakeOutcome::Settled { authenticated };

        if authenticated {
            Some(UiAction::ClearLoading)
        } else {
            Some(UiAction::ShowSignInFallback)
        }
    }

    /// Feed timer expiry. Returns the fallback action exactly once, and
    /// only if no status message arrived first.
    pub fn on_timeout(&mut self) -> Option<UiAction> {
        if self.timeout_fired {
            return None;
        }
        self.timeout_fired = true;

        match self.outcome {
            HandshakeOutcome::Pending => {
                self.outcome = HandshakeOutcome::TimedOut;
                Some(UiAction::ShowTimeoutFallback)
            }
            _ => None,
        }
    }

    /// Whether the frontend should still keep the timer armed.
    pub fn awaiting_first_status(&self) -> bool {
        matches!(self.outcome, HandshakeOutcome::Pending)
    }

    pub fn outcome(&self) -> HandshakeOutcome {
        self.outcome
    }
}
