use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    // older records may lack these
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(rename = "profileImage", default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Column headers of the users table, in render order.
    pub const COLUMNS: [&'static str; 7] = [
        "ID",
        "Username",
        "Email",
        "First Name",
        "Last Name",
        "Image",
        "Actions",
    ];

    /// Text cells of the table row: id, username, email, first and last name.
    pub fn table_cells(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            &self.username,
            &self.email,
            &self.firstname,
            &self.lastname,
        ]
    }
}

// Request payloads

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Body of `PATCH /api/user/{id}`. Username, email and password are never
/// part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub firstname: String,
    pub lastname: String,
}

/// A file picked for upload, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// MIME type reported by the browser; may be empty.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Username,
    Email,
    Password,
    Firstname,
    Lastname,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::Username,
        Self::Email,
        Self::Password,
        Self::Firstname,
        Self::Lastname,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Firstname => "First Name",
            Self::Lastname => "Last Name",
        }
    }

    /// HTML input type used to render the field.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            _ => "text",
        }
    }

    /// Fields fixed at creation time.
    pub fn is_identity(self) -> bool {
        matches!(self, Self::Username | Self::Email | Self::Password)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Draft values of the user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub username: String,
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

impl FormState {
    /// Copy of an existing user's editable fields. The password is never
    /// round-tripped from a read.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: String::new(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::Firstname => &self.firstname,
            FormField::Lastname => &self.lastname,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
            FormField::Firstname => &mut self.firstname,
            FormField::Lastname => &mut self.lastname,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fields among `required` whose value is blank.
    pub fn missing(&self, required: &[FormField]) -> Vec<FormField> {
        required
            .iter()
            .copied()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    pub fn to_create_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }

    pub fn to_update_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}
