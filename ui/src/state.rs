//! Owned state of the users page and its transitions.
//!
//! The form region is a two-state machine: [`FormMode::Create`] and
//! [`FormMode::Editing`]. Only the functions here move between them.

use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use crate::types::{CreateUserRequest, FormField, FormState, UpdateUserRequest, User, UserId};

/// Whether the form drafts a new user or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(UserId),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn editing_target(&self) -> Option<&UserId> {
        match self {
            Self::Create => None,
            Self::Editing(id) => Some(id),
        }
    }

    /// Identity fields are display-only while editing.
    pub fn allows_edit(&self, field: FormField) -> bool {
        !(self.is_editing() && field.is_identity())
    }

    /// The password input is hidden while editing.
    pub fn shows(&self, field: FormField) -> bool {
        !(self.is_editing() && field == FormField::Password)
    }

    pub fn required_fields(&self) -> &'static [FormField] {
        match self {
            Self::Create => &FormField::ALL,
            Self::Editing(_) => &[FormField::Firstname, FormField::Lastname],
        }
    }
}

/// A validated request ready to be sent for the current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(CreateUserRequest),
    Update { id: UserId, body: UpdateUserRequest },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersState {
    /// Last successfully fetched collection, in response order.
    pub users: Vec<User>,
    pub form: FormState,
    mode: FormMode,
}

impl UsersState {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        if !self.mode.allows_edit(field) {
            debug!(field = field.name(), "ignoring edit of display-only field");
            return;
        }
        *self.form.value_mut(field) = value;
    }

    pub fn start_edit(&mut self, user: &User) {
        debug!(user_id = %user.id, "start editing user");
        self.mode = FormMode::Editing(user.id.clone());
        self.form = FormState::from_user(user);
    }

    pub fn cancel_edit(&mut self) {
        debug!("form reset to create mode");
        self.mode = FormMode::Create;
        self.form.clear();
    }

    /// Builds the request for the current mode, or lists the blank required
    /// fields.
    pub fn submission(&self) -> Result<Submission, Vec<FormField>> {
        let missing = self.form.missing(self.mode.required_fields());
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(match &self.mode {
            FormMode::Create => Submission::Create(self.form.to_create_request()),
            FormMode::Editing(id) => Submission::Update {
                id: id.clone(),
                body: self.form.to_update_request(),
            },
        })
    }

    /// Successful create. The mode stays `Create`; the draft is cleared
    /// unless the user has moved on to editing meanwhile.
    pub fn finish_create(&mut self) {
        if self.mode == FormMode::Create {
            self.form.clear();
        }
    }

    /// Successful update of `id`. Returns to `Create` only if the form is
    /// still editing that user.
    pub fn finish_update(&mut self, id: &UserId) {
        if self.mode.editing_target() == Some(id) {
            self.cancel_edit();
        }
    }
}

/// Shared handle to [`UsersState`].
///
/// Reads and updates are closures so that no borrow outlives a single call,
/// letting independent operations interleave across await points.
pub trait StateStore {
    fn read_state<R>(&self, f: impl FnOnce(&UsersState) -> R) -> R;
    fn update_state(&self, f: impl FnOnce(&mut UsersState));
}

impl StateStore for RwSignal<UsersState> {
    fn read_state<R>(&self, f: impl FnOnce(&UsersState) -> R) -> R {
        SignalWithUntracked::with_untracked(self, f)
    }

    fn update_state(&self, f: impl FnOnce(&mut UsersState)) {
        SignalUpdate::update(self, f)
    }
}

impl StateStore for Rc<RefCell<UsersState>> {
    fn read_state<R>(&self, f: impl FnOnce(&UsersState) -> R) -> R {
        f(&*self.borrow())
    }

    fn update_state(&self, f: impl FnOnce(&mut UsersState)) {
        f(&mut *self.borrow_mut())
    }
}
