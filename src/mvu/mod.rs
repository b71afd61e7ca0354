// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring session state, screen components, messages, and commands.

use std::time::Duration;

use crate::config::Timings;
use crate::logic::scheduler::CancellationToken;
use crate::models::document::ACCEPTED_EXTENSIONS;
use crate::models::session::{Session, SessionError, SessionStore};
use crate::ui::components::dashboard::{
    self, DashboardCommand, DashboardModel, DashboardMsg,
};
use crate::ui::components::login::{self, LoginCommand, LoginModel, LoginMsg, LoginOutcome};
use crate::ui::components::signup::{
    self, SignupCommand, SignupModel, SignupMsg, SignupOutcome,
};

/// Which form is shown while nobody is signed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScreen {
    #[default]
    Login,
    Signup,
}

/// Screen derived from session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
}

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppModel {
    /// Simulated latencies used when scheduling deferred messages.
    pub timings: Timings,
    /// The one session store of the application.
    pub session: SessionStore,
    /// Form shown while anonymous.
    pub auth_screen: AuthScreen,
    /// Login form state.
    pub login: LoginModel,
    /// Registration form state.
    pub signup: SignupModel,
    /// Present only while a citizen is signed in.
    pub dashboard: Option<DashboardModel>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            ..Default::default()
        }
    }

    /// Screen to render, re-derived from the session every frame.
    pub fn screen(&self) -> Screen {
        if self.session.is_authenticated() {
            return Screen::Dashboard;
        }
        match self.auth_screen {
            AuthScreen::Login => Screen::Login,
            AuthScreen::Signup => Screen::Signup,
        }
    }

    /// Session and dashboard state for the dashboard screen.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no citizen is signed in.
    pub fn dashboard_view(&self) -> Result<(&Session, &DashboardModel), SessionError> {
        let session = self.session.require()?;
        let dashboard = self
            .dashboard
            .as_ref()
            .ok_or(SessionError::NotAuthenticated)?;
        Ok((session, dashboard))
    }
}

/// Application messages routed through the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Login(LoginMsg),
    Signup(SignupMsg),
    Dashboard(DashboardMsg),
    /// Picker result tagged with the upload token of the dashboard that asked for it.
    DocumentPicked {
        token: CancellationToken,
        result: DashboardMsg,
    },
    Navigate(AuthScreen),
    ReportError(String),
    DismissError,
}

/// Commands represent side-effects executed between frames.
#[derive(Debug)]
pub enum Command {
    /// Blocking work for the worker pool.
    Io(IoCommand),
    /// Message parked on the UI-thread scheduler.
    Defer(Deferred),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IoCommand {
    /// Open the document picker on behalf of the dashboard owning `token`.
    PickDocument(CancellationToken),
}

/// A message delivered after `delay` unless `token` is cancelled first.
#[derive(Debug)]
pub struct Deferred {
    pub delay: Duration,
    pub token: CancellationToken,
    pub msg: Msg,
}

fn defer(delay: Duration, token: CancellationToken, msg: Msg) -> Command {
    Command::Defer(Deferred { delay, token, msg })
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Login(m) => update_login(model, m, cmds),
        Msg::Signup(m) => update_signup(model, m, cmds),
        Msg::Dashboard(m) => update_dashboard(model, m, cmds),
        Msg::DocumentPicked { token, result } => {
            let current = model
                .dashboard
                .as_ref()
                .is_some_and(|dash| dash.upload_token() == &token);
            if current && !token.is_cancelled() {
                update_dashboard(model, result, cmds);
            } else {
                tracing::debug!(?result, "dashboard: pick from a closed dashboard dropped");
            }
        }
        Msg::Navigate(screen) => navigate(model, screen),
        Msg::ReportError(err) => {
            tracing::error!("{err}");
            surface_event(model, err, true);
        }
        Msg::DismissError => model.error = None,
    }
}

fn update_login(model: &mut AppModel, msg: LoginMsg, cmds: &mut Vec<Command>) {
    let mut login_cmds = Vec::new();
    let outcome = login::update(&mut model.login, msg, &mut login_cmds);

    for c in login_cmds {
        match c {
            LoginCommand::AwaitVerification => cmds.push(defer(
                model.timings.login_latency,
                CancellationToken::new(),
                Msg::Login(LoginMsg::VerificationFinished),
            )),
        }
    }

    match outcome {
        Some(LoginOutcome::Authenticated { identifier }) => {
            model.session.login(identifier);
            open_dashboard(model);
            surface_event(model, "Login successful.".into(), false);
        }
        Some(LoginOutcome::Rejected) => {
            tracing::info!("login: credentials rejected");
            surface_event(model, "Login failed.".into(), false);
        }
        Some(LoginOutcome::GoToSignup) => navigate(model, AuthScreen::Signup),
        None => {}
    }
}

fn update_signup(model: &mut AppModel, msg: SignupMsg, cmds: &mut Vec<Command>) {
    let mut signup_cmds = Vec::new();
    let outcome = signup::update(&mut model.signup, msg, &mut signup_cmds);

    for c in signup_cmds {
        match c {
            SignupCommand::AwaitRegistration => cmds.push(defer(
                model.timings.signup_latency,
                CancellationToken::new(),
                Msg::Signup(SignupMsg::RegistrationFinished),
            )),
            SignupCommand::ScheduleRedirect => cmds.push(defer(
                model.timings.redirect_delay,
                CancellationToken::new(),
                Msg::Navigate(AuthScreen::Login),
            )),
        }
    }

    match outcome {
        Some(SignupOutcome::Registered {
            identifier,
            username,
        }) => {
            model.session.signup(identifier, username);
            open_dashboard(model);
            surface_event(model, "Registration successful.".into(), false);
        }
        Some(SignupOutcome::GoToLogin) => navigate(model, AuthScreen::Login),
        None => {}
    }
}

fn update_dashboard(model: &mut AppModel, msg: DashboardMsg, cmds: &mut Vec<Command>) {
    let Some(dash) = model.dashboard.as_mut() else {
        tracing::debug!(?msg, "dashboard: message ignored while signed out");
        return;
    };

    let mut dash_cmds = Vec::new();
    let event = dashboard::update(dash, msg, &mut dash_cmds);
    let token = dash.upload_token().clone();

    if let Some(event) = event {
        surface_event(model, event.message, event.is_error);
    }
    for c in dash_cmds {
        match c {
            DashboardCommand::PickFile => {
                cmds.push(Command::Io(IoCommand::PickDocument(token.clone())));
            }
            DashboardCommand::SimulateUpload(file) => cmds.push(defer(
                model.timings.upload_latency,
                token.clone(),
                Msg::Dashboard(DashboardMsg::UploadFinished(file)),
            )),
            DashboardCommand::Logout => logout(model),
        }
    }
}

/// Execute a worker command and return the resulting message.
pub fn run_io(cmd: IoCommand) -> Msg {
    match cmd {
        IoCommand::PickDocument(token) => {
            let file = rfd::FileDialog::new()
                .set_title("Upload document")
                .add_filter("Documents", &ACCEPTED_EXTENSIONS)
                .pick_file();

            let msg = match file {
                Some(path) => match crate::utils::inspect_file(&path) {
                    Ok(descriptor) => DashboardMsg::FilePicked(descriptor),
                    Err(err) => DashboardMsg::PickFailed(format!("{err:#}")),
                },
                None => DashboardMsg::PickCancelled,
            };
            Msg::DocumentPicked { token, result: msg }
        }
    }
}

fn open_dashboard(model: &mut AppModel) {
    if model.dashboard.is_none() {
        model.dashboard = Some(DashboardModel::default());
    }
}

fn logout(model: &mut AppModel) {
    if let Some(mut dash) = model.dashboard.take() {
        dash.close();
    }
    if model.session.is_authenticated() {
        surface_event(model, "You have been logged out.".into(), false);
    }
    model.session.logout();
}

/// Switch the anonymous screen, discarding the form being left.
fn navigate(model: &mut AppModel, screen: AuthScreen) {
    if model.auth_screen == screen {
        return;
    }
    tracing::debug!(?screen, "navigate");
    match model.auth_screen {
        AuthScreen::Login => model.login = LoginModel::default(),
        AuthScreen::Signup => model.signup = SignupModel::default(),
    }
    model.auth_screen = screen;
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::logic::scheduler::Scheduler;
    use crate::models::document::FileDescriptor;
    use crate::ui::components::form::FormPhase;

    fn take_deferred(cmds: &mut Vec<Command>) -> Deferred {
        assert_eq!(cmds.len(), 1, "exactly one command expected");
        match cmds.pop().unwrap() {
            Command::Defer(d) => d,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    fn login_with(model: &mut AppModel, identifier: &str, password: &str) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(
            model,
            Msg::Login(LoginMsg::IdentifierChanged(identifier.into())),
            &mut cmds,
        );
        update(
            model,
            Msg::Login(LoginMsg::PasswordChanged(password.into())),
            &mut cmds,
        );
        update(model, Msg::Login(LoginMsg::Submit), &mut cmds);
        cmds
    }

    fn signed_in() -> AppModel {
        let mut model = AppModel::default();
        let mut cmds = login_with(&mut model, "123456789012", "Password123");
        let deferred = take_deferred(&mut cmds);
        update(&mut model, deferred.msg, &mut cmds);
        assert!(cmds.is_empty());
        model
    }

    fn pdf() -> FileDescriptor {
        FileDescriptor {
            name: "a.pdf".into(),
            mime_type: "application/pdf".into(),
            size_bytes: 2_097_152,
        }
    }

    #[test]
    fn starts_on_login_screen() {
        let model = AppModel::default();
        assert_eq!(model.screen(), Screen::Login);
        assert_eq!(
            model.dashboard_view().err(),
            Some(SessionError::NotAuthenticated)
        );
    }

    #[test]
    fn demo_login_opens_dashboard_after_latency() {
        let mut model = AppModel::default();
        let mut cmds = login_with(&mut model, "123456789012", "Password123");

        let deferred = take_deferred(&mut cmds);
        assert_eq!(deferred.delay, model.timings.login_latency);
        assert!(!model.session.is_authenticated(), "no mutation before latency");

        update(&mut model, deferred.msg, &mut cmds);

        assert_eq!(model.screen(), Screen::Dashboard);
        let (session, dash) = model.dashboard_view().expect("dashboard available");
        assert_eq!(session.identifier, "123456789012");
        assert_eq!(session.display_name, None);
        assert!(dash.registry().is_empty());
    }

    #[test]
    fn wrong_identifier_fails_without_touching_session() {
        let mut model = AppModel::default();
        let mut cmds = login_with(&mut model, "000000000000", "Password123");
        let deferred = take_deferred(&mut cmds);

        update(&mut model, deferred.msg, &mut cmds);

        assert_eq!(model.login.phase(), FormPhase::Failed);
        assert!(model.session.current().is_none());
        assert_eq!(model.screen(), Screen::Login);
        assert!(model.dashboard.is_none());
    }

    #[test]
    fn invalid_login_input_enqueues_nothing() {
        let mut model = AppModel::default();
        let cmds = login_with(&mut model, "12345", "Password123");

        assert!(cmds.is_empty());
        assert_eq!(model.login.phase(), FormPhase::Editing);
    }

    #[test]
    fn upload_then_delete_through_the_kernel() {
        let mut model = signed_in();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Dashboard(DashboardMsg::FilePicked(pdf())), &mut cmds);
        let deferred = take_deferred(&mut cmds);
        assert_eq!(deferred.delay, model.timings.upload_latency);
        assert!(model.dashboard.as_ref().unwrap().is_uploading());

        update(&mut model, deferred.msg, &mut cmds);

        let docs = model.dashboard.as_ref().unwrap().registry().list().to_vec();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].size_label, "2.00 MB");

        update(
            &mut model,
            Msg::Dashboard(DashboardMsg::Delete(docs[0].id.clone())),
            &mut cmds,
        );
        assert!(model.dashboard.as_ref().unwrap().registry().is_empty());
    }

    #[test]
    fn upload_request_enqueues_picker() {
        let mut model = signed_in();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Dashboard(DashboardMsg::RequestPickFile), &mut cmds);

        assert!(matches!(
            cmds.as_slice(),
            [Command::Io(IoCommand::PickDocument(_))]
        ));
    }

    fn request_pick(model: &mut AppModel) -> CancellationToken {
        let mut cmds = Vec::new();
        update(model, Msg::Dashboard(DashboardMsg::RequestPickFile), &mut cmds);
        match cmds.pop() {
            Some(Command::Io(IoCommand::PickDocument(token))) => token,
            other => panic!("expected picker command, got {other:?}"),
        }
    }

    #[test]
    fn picked_file_reaches_the_requesting_dashboard() {
        let mut model = signed_in();
        let token = request_pick(&mut model);
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::DocumentPicked {
                token,
                result: DashboardMsg::FilePicked(pdf()),
            },
            &mut cmds,
        );

        let upload = take_deferred(&mut cmds);
        update(&mut model, upload.msg, &mut cmds);
        assert_eq!(model.dashboard.as_ref().unwrap().registry().list().len(), 1);
    }

    // The native dialog stays open while the window is usable, so its result
    // may arrive after the citizen has logged out and back in.
    #[test]
    fn pick_from_previous_session_is_dropped() {
        let mut model = signed_in();
        let stale = request_pick(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);

        let mut cmds = login_with(&mut model, "123456789012", "Password123");
        let deferred = take_deferred(&mut cmds);
        update(&mut model, deferred.msg, &mut cmds);
        assert_eq!(model.screen(), Screen::Dashboard);

        update(
            &mut model,
            Msg::DocumentPicked {
                token: stale,
                result: DashboardMsg::FilePicked(pdf()),
            },
            &mut cmds,
        );

        assert!(cmds.is_empty(), "no upload scheduled");
        let dash = model.dashboard.as_ref().unwrap();
        assert!(!dash.is_uploading());
        assert!(dash.registry().is_empty());
    }

    #[test]
    fn logout_drops_dashboard_and_cancels_uploads() {
        let mut model = signed_in();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Dashboard(DashboardMsg::FilePicked(pdf())), &mut cmds);
        let pending_upload = take_deferred(&mut cmds);

        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);

        assert!(pending_upload.token.is_cancelled());
        assert!(model.dashboard.is_none());
        assert_eq!(model.screen(), Screen::Login);
        assert_eq!(model.status.as_deref(), Some("You have been logged out."));

        // A late delivery after logout is ignored.
        update(&mut model, pending_upload.msg, &mut cmds);
        assert!(model.dashboard.is_none());
    }

    #[test]
    fn second_logout_keeps_state_anonymous() {
        let mut model = signed_in();
        let mut cmds = Vec::new();

        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);
        assert!(!model.session.is_authenticated());

        logout(&mut model);
        assert!(!model.session.is_authenticated());
        assert_eq!(model.screen(), Screen::Login);
    }

    #[test]
    fn relogin_starts_with_empty_registry() {
        let mut model = signed_in();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Dashboard(DashboardMsg::UploadFinished(pdf())), &mut cmds);
        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);

        let mut cmds = login_with(&mut model, "123456789012", "Password123");
        let deferred = take_deferred(&mut cmds);
        update(&mut model, deferred.msg, &mut cmds);

        assert!(model.dashboard.as_ref().unwrap().registry().is_empty());
    }

    #[test]
    fn signup_registers_and_later_redirects_to_login() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Login(LoginMsg::GoToSignup), &mut cmds);
        assert_eq!(model.screen(), Screen::Signup);

        for msg in [
            SignupMsg::IdentifierChanged("123456789012".into()),
            SignupMsg::BirthDateChanged("1990-01-01".into()),
            SignupMsg::UsernameChanged("valid_user1".into()),
            SignupMsg::PasswordChanged("Password123".into()),
            SignupMsg::ConfirmPasswordChanged("Password123".into()),
            SignupMsg::TermsToggled(true),
            SignupMsg::Submit,
        ] {
            update(&mut model, Msg::Signup(msg), &mut cmds);
        }
        let deferred = take_deferred(&mut cmds);
        assert_eq!(deferred.delay, model.timings.signup_latency);

        update(&mut model, deferred.msg, &mut cmds);

        assert_eq!(model.screen(), Screen::Dashboard);
        let session = model.session.require().unwrap();
        assert_eq!(session.display_name.as_deref(), Some("valid_user1"));

        let redirect = take_deferred(&mut cmds);
        assert_eq!(redirect.delay, model.timings.redirect_delay);
        assert_eq!(redirect.msg, Msg::Navigate(AuthScreen::Login));
        update(&mut model, redirect.msg, &mut cmds);

        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);
        assert_eq!(model.screen(), Screen::Login);
        assert_eq!(model.signup.phase(), FormPhase::Editing, "signup form discarded");
    }

    #[test]
    fn proceed_to_login_before_redirect_lands_on_login_after_logout() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(&mut model, Msg::Navigate(AuthScreen::Signup), &mut cmds);
        for msg in [
            SignupMsg::IdentifierChanged("123456789012".into()),
            SignupMsg::BirthDateChanged("1990-01-01".into()),
            SignupMsg::UsernameChanged("valid_user1".into()),
            SignupMsg::PasswordChanged("Password123".into()),
            SignupMsg::ConfirmPasswordChanged("Password123".into()),
            SignupMsg::TermsToggled(true),
            SignupMsg::Submit,
        ] {
            update(&mut model, Msg::Signup(msg), &mut cmds);
        }
        let deferred = take_deferred(&mut cmds);
        update(&mut model, deferred.msg, &mut cmds);
        assert_eq!(model.signup.phase(), FormPhase::Succeeded);

        update(&mut model, Msg::Signup(SignupMsg::GoToLogin), &mut cmds);
        update(&mut model, Msg::Dashboard(DashboardMsg::Logout), &mut cmds);

        assert_eq!(model.screen(), Screen::Login);
        assert_eq!(model.signup.phase(), FormPhase::Editing);
    }

    #[test]
    fn navigating_away_discards_form_input() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::Login(LoginMsg::IdentifierChanged("1234".into())),
            &mut cmds,
        );

        update(&mut model, Msg::Navigate(AuthScreen::Signup), &mut cmds);
        update(&mut model, Msg::Navigate(AuthScreen::Login), &mut cmds);

        assert_eq!(model.login, LoginModel::default());
    }

    #[test]
    fn reported_errors_reach_the_modal() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(&mut model, Msg::ReportError("boom".into()), &mut cmds);
        assert_eq!(model.error.as_deref(), Some("boom"));

        update(&mut model, Msg::DismissError, &mut cmds);
        assert!(model.error.is_none());
    }

    // Drives deferred commands through the scheduler the way the shell does.
    #[test]
    fn scheduler_delivers_login_result_only_after_latency() {
        let start = Instant::now();
        let mut scheduler = Scheduler::default();
        let mut model = AppModel::default();

        for cmd in login_with(&mut model, "123456789012", "Password123") {
            if let Command::Defer(d) = cmd {
                scheduler.schedule(start, d.delay, d.token, d.msg);
            }
        }

        let early = scheduler.take_due(start + model.timings.login_latency / 2);
        assert!(early.is_empty());
        assert_eq!(model.screen(), Screen::Login);

        let mut cmds = Vec::new();
        for msg in scheduler.take_due(start + model.timings.login_latency) {
            update(&mut model, msg, &mut cmds);
        }
        assert_eq!(model.screen(), Screen::Dashboard);
    }
}
