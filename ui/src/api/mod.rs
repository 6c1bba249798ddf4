// REST client for the user backend
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;
use crate::types::{CreateUserRequest, ImageFile, UpdateUserRequest, User, UserId};

#[cfg(target_arch = "wasm32")]
use gloo_net::http::{Request, Response};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Operations the user backend exposes.
///
/// Futures are not `Send`: in the browser everything runs on one thread.
#[async_trait(?Send)]
pub trait UserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    async fn create_user(&self, body: &CreateUserRequest) -> Result<(), ApiError>;

    async fn update_user(&self, id: &UserId, body: &UpdateUserRequest) -> Result<(), ApiError>;

    async fn delete_user(&self, id: &UserId) -> Result<(), ApiError>;

    /// Uploads `file` as the multipart field `file`.
    async fn upload_image(&self, id: &UserId, file: ImageFile) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extracts the `message` field of an error body, if there is one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}

/// HTTP implementation of [`UserApi`]: `fetch` through gloo-net in the
/// browser, reqwest everywhere else.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    config: Config,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl HttpUserApi {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn network_error(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self
            .client
            .get(self.config.users_endpoint())
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn create_user(&self, body: &CreateUserRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.config.users_endpoint())
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn update_user(&self, id: &UserId, body: &UpdateUserRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .patch(self.config.user_endpoint(id.as_str()))
            .json(body)
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.config.user_endpoint(id.as_str()))
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn upload_image(&self, id: &UserId, file: ImageFile) -> Result<(), ApiError> {
        use reqwest::multipart::{Form, Part};

        let mut part = Part::bytes(file.bytes).file_name(file.name);
        if !file.content_type.is_empty() {
            part = part
                .mime_str(&file.content_type)
                .map_err(|e| ApiError::Serialization(e.to_string()))?;
        }

        let response = self
            .client
            .post(self.config.image_endpoint(id.as_str()))
            .multipart(Form::new().part("file", part))
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }
}

#[cfg(target_arch = "wasm32")]
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: response.status(),
        message: error_message(&body),
    })
}

#[cfg(target_arch = "wasm32")]
fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Serialization(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = Request::get(&self.config.users_endpoint())
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn create_user(&self, body: &CreateUserRequest) -> Result<(), ApiError> {
        let response = Request::post(&self.config.users_endpoint())
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn update_user(&self, id: &UserId, body: &UpdateUserRequest) -> Result<(), ApiError> {
        let response = Request::patch(&self.config.user_endpoint(id.as_str()))
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let response = Request::delete(&self.config.user_endpoint(id.as_str()))
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }

    async fn upload_image(&self, id: &UserId, file: ImageFile) -> Result<(), ApiError> {
        let mime = (!file.content_type.is_empty()).then_some(file.content_type.as_str());
        let blob: web_sys::Blob = gloo_file::Blob::new_with_options(file.bytes.as_slice(), mime).into();

        let form = web_sys::FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename("file", &blob, &file.name)
            .map_err(js_error)?;

        // The browser sets the multipart boundary header itself.
        let response = Request::post(&self.config.image_endpoint(id.as_str()))
            .body(form)
            .map_err(|e| ApiError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        ensure_success(response).await.map(drop)
    }
}
