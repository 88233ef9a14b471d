use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::state::session::{SessionFlag, read_session};
use crate::util::storage::MemoryStore;

// =============================================================
// Helpers
// =============================================================

/// Lookup double that answers every check the same way and counts calls.
struct FakeLookup {
    answer: Result<Option<UserRecord>, ApiError>,
    calls: Cell<usize>,
}

impl FakeLookup {
    fn answering(answer: Result<Option<UserRecord>, ApiError>) -> Self {
        Self { answer, calls: Cell::new(0) }
    }
}

impl UserLookup for FakeLookup {
    async fn check_user(&self, _credential: &Credential) -> Result<Option<UserRecord>, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }

    async fn user_exists(&self, _user_id: &str) -> Result<bool, ApiError> {
        Ok(true)
    }
}

/// Cell whose owner has been torn down.
struct GoneCell;

impl LoginCell for GoneCell {
    fn modify<R>(&self, _f: impl FnOnce(&mut LoginState) -> R) -> Option<R> {
        None
    }
}

/// Cell that survives `live_accesses` calls to `modify`, then is gone.
struct ClosingCell {
    state: RefCell<LoginState>,
    live_accesses: Cell<usize>,
}

impl ClosingCell {
    fn closing_after(live_accesses: usize) -> Self {
        Self { state: RefCell::new(LoginState::default()), live_accesses: Cell::new(live_accesses) }
    }
}

impl LoginCell for ClosingCell {
    fn modify<R>(&self, f: impl FnOnce(&mut LoginState) -> R) -> Option<R> {
        let remaining = self.live_accesses.get();
        if remaining == 0 {
            return None;
        }
        self.live_accesses.set(remaining - 1);
        Some(f(&mut self.state.borrow_mut()))
    }
}

fn user(id: &str, username: &str) -> UserRecord {
    UserRecord { id: id.to_owned(), username: username.to_owned() }
}

fn run(
    cell: &RefCell<LoginState>,
    lookup: &FakeLookup,
    store: &MemoryStore,
    username: &str,
    password: &str,
) -> (FlowOutcome, usize) {
    let navigations = Cell::new(0);
    let outcome = block_on(process_user(cell, lookup, store, username, password, || {
        navigations.set(navigations.get() + 1);
    }));
    (outcome, navigations.get())
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_credential_rejects_either_empty_field() {
    assert_eq!(validate_credential("", "x"), Err(LoginError::EmptyFields));
    assert_eq!(validate_credential("alice", ""), Err(LoginError::EmptyFields));
    assert_eq!(validate_credential("", ""), Err(LoginError::EmptyFields));
}

#[test]
fn validate_credential_does_not_trim() {
    let credential = validate_credential(" ", " ").unwrap();
    assert_eq!(credential.username, " ");
    assert_eq!(credential.password, " ");
}

#[test]
fn login_error_messages() {
    assert_eq!(LoginError::EmptyFields.to_string(), "input fields are empty");
    assert_eq!(LoginError::UserNotFound.to_string(), "user doesn't exist");
    let server = LoginError::from(ApiError::new("DB_ERROR", "user lookup failed"));
    assert_eq!(server.to_string(), "DB_ERROR: user lookup failed");
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn default_state_is_idle_and_editable() {
    let state = LoginState::default();
    assert_eq!(state.progress, Progress::NotActive);
    assert!(!state.inputs_disabled());
    assert!(state.shows_submit());
    assert!(!state.shows_message());
}

#[test]
fn valid_submit_enters_active_and_disables_inputs() {
    let mut state = LoginState::default();
    let submit = state.submit("alice", "secret");
    assert_eq!(
        submit,
        Submit::Check(Credential { username: "alice".to_owned(), password: "secret".to_owned() })
    );
    assert_eq!(state.progress, Progress::Active);
    assert_eq!(state.message, CHECKING_MESSAGE);
    assert!(state.inputs_disabled());
    assert!(!state.shows_submit());
    assert!(state.shows_message());
}

#[test]
fn submit_while_active_is_ignored() {
    let mut state = LoginState::default();
    let _ = state.submit("alice", "secret");
    assert_eq!(state.submit("alice", "secret"), Submit::Ignored);
    assert_eq!(state.progress, Progress::Active);
}

#[test]
fn resolve_without_outstanding_lookup_is_ignored() {
    let mut state = LoginState::default();
    assert_eq!(state.resolve(Ok(None)), Resolution::Ignored);
    assert_eq!(state.progress, Progress::NotActive);
}

#[test]
fn clear_error_returns_to_idle_and_clears_message() {
    let mut state = LoginState::default();
    let Submit::Rejected { epoch } = state.submit("", "x") else {
        panic!("expected rejection");
    };
    assert_eq!(state.progress, Progress::Error);
    assert!(state.clear_error(epoch));
    assert_eq!(state.progress, Progress::NotActive);
    assert!(state.message.is_empty());
}

#[test]
fn stale_error_timer_does_not_clear_newer_error() {
    let mut state = LoginState::default();
    let first = state.fail(&LoginError::EmptyFields);
    let second = state.fail(&LoginError::UserNotFound);
    assert!(!state.clear_error(first));
    assert_eq!(state.progress, Progress::Error);
    assert_eq!(state.message, "user doesn't exist");
    assert!(state.clear_error(second));
}

#[test]
fn error_timer_is_noop_after_resubmit() {
    let mut state = LoginState::default();
    let epoch = state.fail(&LoginError::EmptyFields);
    let _ = state.submit("alice", "secret");
    assert!(!state.clear_error(epoch));
    assert_eq!(state.progress, Progress::Active);
}

#[test]
fn submit_is_allowed_from_error() {
    let mut state = LoginState::default();
    state.fail(&LoginError::UserNotFound);
    assert!(state.shows_submit());
    assert!(matches!(state.submit("bob", "right"), Submit::Check(_)));
}

// =============================================================
// Password visibility
// =============================================================

#[test]
fn password_starts_masked() {
    let state = LoginState::default();
    assert_eq!(state.password_input_type(), "password");
    assert_eq!(state.password_icon(), HIDDEN_ICON);
}

#[test]
fn toggling_twice_restores_masked_field_and_icon() {
    let mut state = LoginState::default();
    state.toggle_password_visibility();
    assert_eq!(state.password_input_type(), "text");
    assert_eq!(state.password_icon(), VISIBLE_ICON);
    state.toggle_password_visibility();
    assert_eq!(state.password_input_type(), "password");
    assert_eq!(state.password_icon(), HIDDEN_ICON);
}

// =============================================================
// process_user
// =============================================================

#[test]
fn found_user_is_remembered_and_navigates_home_once() {
    let cell = RefCell::new(LoginState::default());
    let lookup = FakeLookup::answering(Ok(Some(user("42", "alice"))));
    let store = MemoryStore::new();

    let (outcome, navigations) = run(&cell, &lookup, &store, "alice", "secret");

    assert_eq!(outcome, FlowOutcome::SignedIn(user("42", "alice")));
    assert_eq!(navigations, 1);
    assert_eq!(lookup.calls.get(), 1);
    assert_eq!(
        read_session(&store),
        Some(SessionFlag { remember: true, user_id: "42".to_owned(), username: "alice".to_owned() })
    );
    let state = cell.borrow();
    assert!(state.signed_in);
    assert_eq!(state.message, WELCOME_MESSAGE);
}

#[test]
fn signed_in_form_ignores_further_submits() {
    let cell = RefCell::new(LoginState::default());
    let lookup = FakeLookup::answering(Ok(Some(user("42", "alice"))));
    let store = MemoryStore::new();

    let _ = run(&cell, &lookup, &store, "alice", "secret");
    let (outcome, navigations) = run(&cell, &lookup, &store, "alice", "secret");

    assert_eq!(outcome, FlowOutcome::Ignored);
    assert_eq!(navigations, 0);
    assert_eq!(lookup.calls.get(), 1);
}

#[test]
fn empty_field_fails_without_calling_lookup() {
    for (username, password) in [("", "x"), ("alice", ""), ("", "")] {
        let cell = RefCell::new(LoginState::default());
        let lookup = FakeLookup::answering(Ok(Some(user("42", "alice"))));
        let store = MemoryStore::new();

        let (outcome, navigations) = run(&cell, &lookup, &store, username, password);

        assert!(matches!(outcome, FlowOutcome::Failed { .. }));
        assert_eq!(lookup.calls.get(), 0);
        assert_eq!(navigations, 0);
        assert!(store.is_empty());
        let state = cell.borrow();
        assert_eq!(state.progress, Progress::Error);
        assert_eq!(state.message, "input fields are empty");
    }
}

#[test]
fn missing_user_fails_then_clears_back_to_idle() {
    let cell = RefCell::new(LoginState::default());
    let lookup = FakeLookup::answering(Ok(None));
    let store = MemoryStore::new();

    let (outcome, navigations) = run(&cell, &lookup, &store, "bob", "wrong");

    let FlowOutcome::Failed { epoch } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert_eq!(navigations, 0);
    assert!(store.is_empty());
    assert_eq!(cell.borrow().progress, Progress::Error);
    assert_eq!(cell.borrow().message, "user doesn't exist");

    assert!(cell.borrow_mut().clear_error(epoch));
    assert_eq!(cell.borrow().progress, Progress::NotActive);
    assert!(cell.borrow().message.is_empty());
}

#[test]
fn server_failure_shows_code_and_message() {
    let cell = RefCell::new(LoginState::default());
    let lookup = FakeLookup::answering(Err(ApiError::new("HTTP_502", "request failed")));
    let store = MemoryStore::new();

    let (outcome, _) = run(&cell, &lookup, &store, "alice", "secret");

    assert!(matches!(outcome, FlowOutcome::Failed { .. }));
    assert_eq!(cell.borrow().progress, Progress::Error);
    assert_eq!(cell.borrow().message, "HTTP_502: request failed");
    assert!(store.is_empty());
}

#[test]
fn detached_form_never_calls_lookup_or_navigates() {
    let lookup = FakeLookup::answering(Ok(Some(user("42", "alice"))));
    let store = MemoryStore::new();
    let navigated = Cell::new(false);

    let outcome = block_on(process_user(&GoneCell, &lookup, &store, "alice", "secret", || navigated.set(true)));

    assert_eq!(outcome, FlowOutcome::Detached);
    assert_eq!(lookup.calls.get(), 0);
    assert!(!navigated.get());
    assert!(store.is_empty());
}

#[test]
fn form_closed_during_lookup_discards_found_user() {
    let cell = ClosingCell::closing_after(1);
    let lookup = FakeLookup::answering(Ok(Some(user("42", "alice"))));
    let store = MemoryStore::new();
    let navigations = Cell::new(0);

    let outcome = block_on(process_user(&cell, &lookup, &store, "alice", "secret", || {
        navigations.set(navigations.get() + 1);
    }));

    assert_eq!(outcome, FlowOutcome::Detached);
    assert_eq!(lookup.calls.get(), 1);
    assert_eq!(navigations.get(), 0);
    assert!(store.is_empty());
    assert!(!cell.state.borrow().signed_in);
}
