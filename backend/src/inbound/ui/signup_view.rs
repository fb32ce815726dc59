//! Board signup form.

use std::sync::Arc;

use tracing::warn;
use zeroize::Zeroizing;

use super::notifier::{Notifier, Toast};
use crate::domain::AccountCredentials;
use crate::domain::ports::BoardAccount;

/// Where the caller should go after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    NavigateToLogin,
    Stay,
}

/// Signup form state.
pub struct SignUpView {
    account: Arc<dyn BoardAccount>,
    notifier: Arc<dyn Notifier>,
    email: String,
    password: Zeroizing<String>,
    show_password: bool,
}

impl SignUpView {
    pub fn new(account: Arc<dyn BoardAccount>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            account,
            notifier,
            email: String::new(),
            password: Zeroizing::new(String::new()),
            show_password: false,
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = Zeroizing::new(password.into());
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    #[must_use]
    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    /// The password as the form shows it: plain when visible, masked otherwise.
    #[must_use]
    pub fn password_field(&self) -> String {
        if self.show_password {
            self.password.as_str().to_owned()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    pub async fn submit(&mut self) -> SignUpOutcome {
        let result = match AccountCredentials::try_from_parts(&self.email, &self.password) {
            Ok(credentials) => self
                .account
                .sign_up(&credentials)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };
        match result {
            Ok(()) => {
                self.notifier.notify(Toast::success("Account created successfully!"));
                SignUpOutcome::NavigateToLogin
            }
            Err(detail) => {
                warn!(error = %detail, "board signup failed");
                self.notifier.notify(Toast::error("Failed to sign up"));
                SignUpOutcome::Stay
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockBoardAccount, NoteBoardError};
    use crate::inbound::ui::notifier::RecordingNotifier;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn success_navigates_to_login() {
        let mut account = MockBoardAccount::new();
        account
            .expect_sign_up()
            .withf(|creds| creds.email() == "ada@example.com" && creds.password() == "s3cret!")
            .return_once(|_| Ok(()));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = SignUpView::new(Arc::new(account), Arc::clone(&notifier) as Arc<dyn Notifier>);
        view.set_email("ada@example.com");
        view.set_password("s3cret!");

        assert_eq!(view.submit().await, SignUpOutcome::NavigateToLogin);
        assert_eq!(notifier.drain(), vec![Toast::success("Account created successfully!")]);
    }

    #[rstest]
    #[tokio::test]
    async fn failure_stays() {
        let mut account = MockBoardAccount::new();
        account
            .expect_sign_up()
            .return_once(|_| Err(NoteBoardError::status(422_u16, "User already registered")));
        let notifier = Arc::new(RecordingNotifier::new());
        let mut view = SignUpView::new(Arc::new(account), Arc::clone(&notifier) as Arc<dyn Notifier>);
        view.set_email("ada@example.com");
        view.set_password("pw");

        assert_eq!(view.submit().await, SignUpOutcome::Stay);
        assert_eq!(notifier.drain(), vec![Toast::error("Failed to sign up")]);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_fields_never_reach_the_board() {
        let mut account = MockBoardAccount::new();
        account.expect_sign_up().never();
        let mut view = SignUpView::new(Arc::new(account), Arc::new(RecordingNotifier::new()));

        assert_eq!(view.submit().await, SignUpOutcome::Stay);
    }

    #[rstest]
    fn password_is_masked_until_toggled() {
        let mut view = SignUpView::new(Arc::new(MockBoardAccount::new()), Arc::new(RecordingNotifier::new()));
        view.set_password("abc");
        assert_eq!(view.password_field(), "•••");
        view.toggle_password_visibility();
        assert!(view.password_visible());
        assert_eq!(view.password_field(), "abc");
    }
}
