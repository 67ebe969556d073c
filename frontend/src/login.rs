//! Login and registration screens.

use egui::{Align2, Context, Vec2, Window};

/// What the user asked for on a credentials screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsAction {
    None,
    /// Submit trimmed email and the password
    Submit { email: String, password: String },
    /// Follow the link to the other screen
    SwitchScreen,
}

/// Email/password entry shared by the login and registration screens.
#[derive(Debug, Default)]
struct Credentials {
    email: String,
    password: String,
    error: Option<String>,
}

impl Credentials {
    fn submission(&mut self) -> CredentialsAction {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return CredentialsAction::None;
        }
        self.error = None;
        CredentialsAction::Submit {
            email: email.to_string(),
            password: self.password.clone(),
        }
    }

    fn show(&mut self, ui: &mut egui::Ui, busy: bool, submit_label: &str) -> bool {
        if let Some(ref error) = self.error {
            ui.colored_label(egui::Color32::RED, error);
            ui.add_space(5.0);
        }

        ui.label("Email:");
        let email_response = ui.add(
            egui::TextEdit::singleline(&mut self.email)
                .hint_text("you@example.com")
                .desired_width(260.0),
        );

        ui.label("Password:");
        let password_response = ui.add(
            egui::TextEdit::singleline(&mut self.password)
                .password(true)
                .desired_width(260.0),
        );

        // Submit on Enter in either field
        let mut requested = (email_response.lost_focus() || password_response.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!busy, egui::Button::new(submit_label))
                .clicked()
            {
                requested = true;
            }
            if busy {
                ui.spinner();
            }
        });

        requested && !busy
    }
}

/// Login screen state.
#[derive(Debug, Default)]
pub struct LoginScreen {
    credentials: Credentials,
    /// Whether login is in progress
    pub logging_in: bool,
}

impl LoginScreen {
    /// Show the login screen.
    pub fn show(&mut self, ctx: &Context) -> CredentialsAction {
        let mut action = CredentialsAction::None;

        Window::new("Login")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.heading("🎵 Media Player");
                ui.add_space(10.0);

                if self.credentials.show(ui, self.logging_in, "Login") {
                    action = self.submit();
                }

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label("No account yet?");
                    if ui.link("Register").clicked() {
                        action = CredentialsAction::SwitchScreen;
                    }
                });
            });

        action
    }

    /// Validate the inputs and mark the login as in flight.
    pub fn submit(&mut self) -> CredentialsAction {
        let action = self.credentials.submission();
        if matches!(action, CredentialsAction::Submit { .. }) {
            self.logging_in = true;
        }
        action
    }

    pub fn set_credentials(&mut self, email: &str, password: &str) {
        self.credentials.email = email.to_string();
        self.credentials.password = password.to_string();
    }

    /// Login rejected: keep the email, clear the password.
    pub fn on_failed(&mut self) {
        self.logging_in = false;
        self.credentials.password.clear();
    }

    /// Forget everything typed so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Registration screen state.
#[derive(Debug, Default)]
pub struct RegisterScreen {
    credentials: Credentials,
    /// Whether registration is in progress
    pub registering: bool,
}

impl RegisterScreen {
    /// Show the registration screen.
    pub fn show(&mut self, ctx: &Context) -> CredentialsAction {
        let mut action = CredentialsAction::None;

        Window::new("Register")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.heading("Create an account");
                ui.add_space(10.0);

                if self.credentials.show(ui, self.registering, "Register") {
                    action = self.submit();
                }

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label("Already registered?");
                    if ui.link("Back to login").clicked() {
                        action = CredentialsAction::SwitchScreen;
                    }
                });
            });

        action
    }

    pub fn submit(&mut self) -> CredentialsAction {
        let action = self.credentials.submission();
        if matches!(action, CredentialsAction::Submit { .. }) {
            self.registering = true;
        }
        action
    }

    pub fn set_credentials(&mut self, email: &str, password: &str) {
        self.credentials.email = email.to_string();
        self.credentials.password = password.to_string();
    }

    pub fn on_finished(&mut self) {
        self.registering = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_email_and_password() {
        let mut screen = LoginScreen::default();
        screen.set_credentials("  ", "secret");
        assert_eq!(screen.submit(), CredentialsAction::None);
        assert!(!screen.logging_in);

        screen.set_credentials("ana@example.com", "");
        assert_eq!(screen.submit(), CredentialsAction::None);
        assert!(!screen.logging_in);
    }

    #[test]
    fn test_login_submit_trims_email() {
        let mut screen = LoginScreen::default();
        screen.set_credentials(" ana@example.com ", " pw ");

        assert_eq!(
            screen.submit(),
            CredentialsAction::Submit {
                email: "ana@example.com".to_string(),
                password: " pw ".to_string(),
            }
        );
        assert!(screen.logging_in);
    }

    #[test]
    fn test_failed_login_clears_password_only() {
        let mut screen = LoginScreen::default();
        screen.set_credentials("ana@example.com", "wrong");
        screen.submit();

        screen.on_failed();
        assert!(!screen.logging_in);
        assert_eq!(screen.credentials.email, "ana@example.com");
        assert!(screen.credentials.password.is_empty());
    }

    #[test]
    fn test_register_requires_credentials() {
        let mut screen = RegisterScreen::default();
        assert_eq!(screen.submit(), CredentialsAction::None);
        assert!(screen.credentials.error.is_some());

        screen.set_credentials("bo@example.com", "pw");
        assert!(matches!(screen.submit(), CredentialsAction::Submit { .. }));
        assert!(screen.registering);
    }
}
