//! Request orchestration for the users page.
//!
//! [`UserManager`] runs each user action as: read the state, issue one
//! request, apply the matching transition, report a [`Notice`], refresh.
//! Every method borrows `&self`, so actions triggered concurrently run
//! independently and each ends with its own refresh.

use std::fmt;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, UserApi};
use crate::state::{StateStore, Submission, UsersState};
use crate::types::{CreateUserRequest, FormField, ImageFile, UpdateUserRequest, User, UserId};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// Which user-facing action failed at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Delete,
    Upload,
}

/// User-facing message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    ImageUploaded,
    /// Message returned by the backend with a non-success status.
    Server(String),
    Failed(Operation),
    NoFileSelected,
    MissingFields(Vec<FormField>),
}

impl Notice {
    fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Server(message.unwrap_or_else(|| format!("request failed with status {}", status)))
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Created | Self::Updated | Self::ImageUploaded)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => f.write_str("User created successfully"),
            Self::Updated => f.write_str("User updated successfully"),
            Self::ImageUploaded => f.write_str("Profile image uploaded successfully"),
            Self::Server(message) => write!(f, "Error: {}", message),
            Self::Failed(Operation::Submit) => f.write_str("Operation failed"),
            Self::Failed(Operation::Delete) => f.write_str("Delete failed"),
            Self::Failed(Operation::Upload) => f.write_str("Image upload failed"),
            Self::NoFileSelected => f.write_str("Please select an image file first"),
            Self::MissingFields(fields) => {
                let labels: Vec<&str> = fields.iter().map(|field| field.label()).collect();
                write!(f, "Please fill in: {}", labels.join(", "))
            }
        }
    }
}

/// Where notices go and who answers confirmation prompts.
pub trait Notifier {
    fn notify(&self, notice: Notice);

    fn confirm(&self, prompt: &str) -> bool;
}

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    /// The backend answered with a non-success status.
    Rejected,
    /// No usable response: transport or decoding failure.
    Failed,
    /// A precondition failed or the user declined; nothing was sent.
    Skipped,
}

pub struct UserManager<A, N, S> {
    api: A,
    notifier: N,
    state: S,
}

impl<A, N, S> UserManager<A, N, S>
where
    A: UserApi,
    N: Notifier,
    S: StateStore,
{
    pub fn new(api: A, notifier: N, state: S) -> Self {
        Self {
            api,
            notifier,
            state,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Replaces the collection with the backend's current list. Failures
    /// keep the previous collection and are only logged.
    pub async fn fetch_users(&self) -> Outcome {
        match self.api.list_users().await {
            Ok(users) => {
                debug!(count = users.len(), "fetched users");
                self.state.update_state(|state| state.replace_users(users));
                Outcome::Succeeded
            }
            Err(err) => {
                error!(error = %err, "error fetching users");
                Outcome::Failed
            }
        }
    }

    /// Creates or updates depending on the form mode.
    pub async fn submit(&self) -> Outcome {
        let submission = match self.state.read_state(UsersState::submission) {
            Ok(submission) => submission,
            Err(missing) => {
                debug!(?missing, "submit blocked by blank required fields");
                self.notifier.notify(Notice::MissingFields(missing));
                return Outcome::Skipped;
            }
        };

        match submission {
            Submission::Create(body) => self.create(body).await,
            Submission::Update { id, body } => self.update(id, body).await,
        }
    }

    async fn create(&self, body: CreateUserRequest) -> Outcome {
        match self.api.create_user(&body).await {
            Ok(()) => {
                info!(username = %body.username, "user created");
                self.state.update_state(UsersState::finish_create);
                self.notifier.notify(Notice::Created);
                self.fetch_users().await;
                Outcome::Succeeded
            }
            Err(err) => self.report_failure(Operation::Submit, err).await,
        }
    }

    async fn update(&self, id: UserId, body: UpdateUserRequest) -> Outcome {
        match self.api.update_user(&id, &body).await {
            Ok(()) => {
                info!(user_id = %id, "user updated");
                self.state.update_state(|state| state.finish_update(&id));
                self.notifier.notify(Notice::Updated);
                self.fetch_users().await;
                Outcome::Succeeded
            }
            Err(err) => self.report_failure(Operation::Submit, err).await,
        }
    }

    /// Deletes after interactive confirmation. Any response refreshes the
    /// list; only transport failures are shown to the user.
    pub async fn delete_user(&self, id: UserId) -> Outcome {
        if !self.notifier.confirm(DELETE_PROMPT) {
            debug!(user_id = %id, "delete cancelled");
            return Outcome::Skipped;
        }

        match self.api.delete_user(&id).await {
            Ok(()) => {
                info!(user_id = %id, "user deleted");
                self.fetch_users().await;
                Outcome::Succeeded
            }
            Err(ApiError::Http { status, message }) => {
                warn!(user_id = %id, status, ?message, "delete rejected");
                self.fetch_users().await;
                Outcome::Rejected
            }
            Err(err) => {
                warn!(user_id = %id, error = %err, "delete failed");
                self.notifier.notify(Notice::Failed(Operation::Delete));
                Outcome::Failed
            }
        }
    }

    pub fn start_edit(&self, user: &User) {
        self.state.update_state(|state| state.start_edit(user));
    }

    pub fn cancel_edit(&self) {
        self.state.update_state(UsersState::cancel_edit);
    }

    pub fn set_field(&self, field: FormField, value: String) {
        self.state.update_state(|state| state.set_field(field, value));
    }

    /// Uploads a profile image for `id`. Without a selected file nothing is
    /// sent.
    pub async fn upload_image(&self, id: UserId, file: Option<ImageFile>) -> Outcome {
        let Some(file) = file else {
            self.notifier.notify(Notice::NoFileSelected);
            return Outcome::Skipped;
        };

        let size = file.bytes.len();
        match self.api.upload_image(&id, file).await {
            Ok(()) => {
                info!(user_id = %id, size, "profile image uploaded");
                self.notifier.notify(Notice::ImageUploaded);
                self.fetch_users().await;
                Outcome::Succeeded
            }
            Err(err) => self.report_failure(Operation::Upload, err).await,
        }
    }

    /// Shows the server's message for a rejected request and refreshes, or a
    /// generic notice when no response arrived.
    async fn report_failure(&self, operation: Operation, err: ApiError) -> Outcome {
        match err {
            ApiError::Http { status, message } => {
                warn!(?operation, status, ?message, "request rejected");
                self.notifier.notify(Notice::rejected(status, message));
                self.fetch_users().await;
                Outcome::Rejected
            }
            err => {
                warn!(?operation, error = %err, "request failed");
                self.notifier.notify(Notice::Failed(operation));
                Outcome::Failed
            }
        }
    }
}
