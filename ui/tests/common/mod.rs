use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use user_manager_ui::{
    api::HttpUserApi,
    config::Config,
    manager::{Notice, Notifier, UserManager},
    state::UsersState,
    types::{User, UserId},
};

/// Request seen by the test backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// In-memory stand-in for the user REST backend.
#[derive(Debug, Default)]
pub struct Backend {
    pub users: Vec<User>,
    pub requests: Vec<RecordedRequest>,
    /// Raw body served by `GET /api/user` instead of the user list.
    pub list_override: Option<String>,
    next_id: u32,
}

impl Backend {
    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(RecordedRequest { method, path, body });
    }

    pub fn seed(&mut self, username: &str, firstname: &str, lastname: &str) -> UserId {
        self.next_id += 1;
        let id = UserId::new(format!("u{}", self.next_id));
        self.users.push(User {
            id: id.clone(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            profile_image: None,
        });
        id
    }
}

type SharedBackend = Arc<Mutex<Backend>>;

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

async fn list_users(State(backend): State<SharedBackend>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.record("GET", "/api/user".to_string(), None);

    match backend.list_override.clone() {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => Json(backend.users.clone()).into_response(),
    }
}

async fn create_user(State(backend): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.record("POST", "/api/user".to_string(), Some(body.clone()));

    let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
    let username = field("username");
    if backend.users.iter().any(|u| u.username == username) {
        return message(StatusCode::BAD_REQUEST, "Username already exists");
    }

    let id = backend.seed(&username, &field("firstname"), &field("lastname"));
    let user = backend.users.iter_mut().find(|u| u.id == id).unwrap();
    user.email = field("email");
    (StatusCode::CREATED, Json(user.clone())).into_response()
}

async fn update_user(
    State(backend): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.record("PATCH", format!("/api/user/{}", id), Some(body.clone()));

    match backend.users.iter_mut().find(|u| u.id.as_str() == id) {
        Some(user) => {
            user.firstname = body["firstname"].as_str().unwrap_or_default().to_string();
            user.lastname = body["lastname"].as_str().unwrap_or_default().to_string();
            Json(user.clone()).into_response()
        }
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(State(backend): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.record("DELETE", format!("/api/user/{}", id), None);

    let before = backend.users.len();
    backend.users.retain(|u| u.id.as_str() != id);
    if backend.users.len() == before {
        return message(StatusCode::NOT_FOUND, "User not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload_image(
    State(backend): State<SharedBackend>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let size = field.bytes().await.unwrap().len();
            upload = Some((file_name, content_type, size));
        }
    }

    let mut backend = backend.lock().unwrap();
    let recorded = upload.as_ref().map(|(name, content_type, size)| {
        json!({ "file": name, "content_type": content_type, "size": size })
    });
    backend.record("POST", format!("/api/user/{}/image", id), recorded);

    let Some((file_name, _, _)) = upload else {
        return message(StatusCode::BAD_REQUEST, "No file uploaded");
    };
    match backend.users.iter_mut().find(|u| u.id.as_str() == id) {
        Some(user) => {
            user.profile_image = Some(format!("/uploads/{}-{}", id, file_name));
            Json(user.clone()).into_response()
        }
        None => message(StatusCode::NOT_FOUND, "User not found"),
    }
}

pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/api/user", get(list_users).post(create_user))
        .route("/api/user/{id}", patch(update_user).delete(delete_user))
        .route("/api/user/{id}/image", post(upload_image))
        .with_state(backend)
}

/// Collects notices; answers confirmations with `answer`.
pub struct RecordingNotifier {
    pub notices: RefCell<Vec<Notice>>,
    pub answer: Cell<bool>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }

    fn confirm(&self, _prompt: &str) -> bool {
        self.answer.get()
    }
}

pub type TestManager = UserManager<HttpUserApi, RecordingNotifier, Rc<RefCell<UsersState>>>;

pub struct TestContext {
    pub backend: SharedBackend,
    pub config: Config,
    pub manager: TestManager,
}

impl TestContext {
    /// Starts the backend on an ephemeral port and points a manager at it.
    pub async fn new() -> Self {
        user_manager_ui::logging::init();

        let backend = SharedBackend::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test backend");
        let addr = listener.local_addr().unwrap();

        let app = router(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test backend crashed");
        });

        let config = Config::new(&format!("http://{}", addr)).unwrap();
        let manager = manager_for(config.clone());

        Self {
            backend,
            config,
            manager,
        }
    }

    pub fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap()
    }

    pub fn state(&self) -> UsersState {
        self.manager.state().borrow().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.manager.notifier().notices.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.backend().requests.len()
    }
}

pub fn manager_for(config: Config) -> TestManager {
    UserManager::new(
        HttpUserApi::new(config),
        RecordingNotifier {
            notices: RefCell::new(Vec::new()),
            answer: Cell::new(true),
        },
        Rc::new(RefCell::new(UsersState::default())),
    )
}

#[macro_export]
macro_rules! test_with_context {
    ($test_name:ident, |$ctx:ident| $body:block) => {
        #[tokio::test]
        async fn $test_name() {
            let $ctx = crate::common::TestContext::new().await;
            $body
        }
    };
}
