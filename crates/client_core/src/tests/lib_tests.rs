use super::*;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use shared::domain::{ActivityStats, DocumentRefs, UserRecord, UserType};
use tokio::{net::TcpListener, sync::oneshot};

struct CapturedPatch {
    user_id: String,
    body: UpdateStatusRequest,
    bearer: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    list_tx: Arc<Mutex<Option<oneshot::Sender<Option<String>>>>>,
    patch_tx: Arc<Mutex<Option<oneshot::Sender<CapturedPatch>>>>,
}

fn sample_user(id: &str, status: RegistrationStatus) -> UserRecord {
    UserRecord {
        user_id: UserId::from(id),
        name: format!("User {id}"),
        email: format!("{}@example.com", id.to_ascii_lowercase()),
        phone: "+91-98000-00000".to_string(),
        city: "Mumbai".to_string(),
        user_type: UserType::Buyer,
        registration_status: status,
        documents: DocumentRefs::default(),
        activity_stats: ActivityStats::default(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn handle_list_users(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Json<ListUsersResponse> {
    if let Some(tx) = state.list_tx.lock().await.take() {
        let _ = tx.send(bearer_of(&headers));
    }
    Json(ListUsersResponse {
        count: 2,
        users: vec![
            sample_user("USR-1", RegistrationStatus::Pending),
            sample_user("USR-2", RegistrationStatus::Approved),
        ],
    })
}

async fn handle_update_status(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<UpdateStatusRequest>,
) -> Json<StatusUpdateAck> {
    if let Some(tx) = state.patch_tx.lock().await.take() {
        let _ = tx.send(CapturedPatch {
            user_id,
            body,
            bearer: bearer_of(&headers),
        });
    }
    Json(StatusUpdateAck {
        message: Some("Status updated".to_string()),
    })
}

async fn handle_login(Json(body): Json<AdminLoginRequest>) -> Json<AdminLoginResponse> {
    Json(AdminLoginResponse {
        message: Some("ok".to_string()),
        admin: AdminProfile {
            admin_id: body.admin_id,
            name: "Admin".to_string(),
            token: "tok-123".to_string(),
        },
    })
}

async fn spawn_directory_server() -> (
    String,
    oneshot::Receiver<Option<String>>,
    oneshot::Receiver<CapturedPatch>,
) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (list_tx, list_rx) = oneshot::channel();
    let (patch_tx, patch_rx) = oneshot::channel();
    let state = ServerState {
        list_tx: Arc::new(Mutex::new(Some(list_tx))),
        patch_tx: Arc::new(Mutex::new(Some(patch_tx))),
    };
    let app = Router::new()
        .route("/users/list", get(handle_list_users))
        .route("/users/status/:user_id", patch(handle_update_status))
        .route("/admin/login", post(handle_login))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), list_rx, patch_rx)
}

async fn spawn_failing_server(status: axum::http::StatusCode, message: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let respond = move || async move { (status, Json(ApiErrorBody::new(message))) };
    let app = Router::new()
        .route("/users/list", get(respond.clone()))
        .route("/users/status/:user_id", patch(respond.clone()))
        .route("/admin/login", post(respond));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn list_users_parses_directory_payload() {
    let (server_url, _list_rx, _patch_rx) = spawn_directory_server().await;
    let client = AdminApiClient::new();
    client.set_base_url(server_url).await;

    let listing = client.list_users().await.expect("list users");
    assert_eq!(listing.count, 2);
    assert_eq!(listing.users.len(), 2);
    assert_eq!(listing.users[0].user_id, UserId::from("USR-1"));
    assert_eq!(
        listing.users[1].registration_status,
        RegistrationStatus::Approved
    );
}

#[tokio::test]
async fn list_users_attaches_bearer_token_after_login() {
    let (server_url, list_rx, _patch_rx) = spawn_directory_server().await;
    let client = AdminApiClient::new();
    let profile = client
        .login(&server_url, "admin-7", "hunter2")
        .await
        .expect("login");
    assert_eq!(profile.token, "tok-123");

    client.list_users().await.expect("list users");
    let bearer = list_rx.await.expect("captured list request");
    assert_eq!(bearer.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn update_status_sends_documented_patch() {
    let (server_url, _list_rx, patch_rx) = spawn_directory_server().await;
    let client = AdminApiClient::new();
    client.login(&server_url, "admin-7", "hunter2").await.expect("login");

    let ack = client
        .update_status(&UserId::from("USR-9"), RegistrationStatus::Approved)
        .await
        .expect("update status");
    assert_eq!(ack.message.as_deref(), Some("Status updated"));

    let captured = patch_rx.await.expect("captured patch");
    assert_eq!(captured.user_id, "USR-9");
    assert_eq!(
        captured.body.registration_status,
        RegistrationStatus::Approved
    );
    assert_eq!(captured.bearer.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn load_failure_surfaces_server_error_message() {
    let server_url =
        spawn_failing_server(axum::http::StatusCode::INTERNAL_SERVER_ERROR, "directory offline")
            .await;
    let client = AdminApiClient::new();
    client.set_base_url(server_url).await;

    let err = client.list_users().await.expect_err("must fail");
    assert_eq!(err.to_string(), "directory offline");
}

#[tokio::test]
async fn update_rejection_surfaces_server_error_message() {
    let server_url = spawn_failing_server(
        axum::http::StatusCode::UNPROCESSABLE_ENTITY,
        "invalid status transition",
    )
    .await;
    let client = AdminApiClient::new();
    client.set_base_url(server_url).await;

    let err = client
        .update_status(&UserId::from("USR-1"), RegistrationStatus::Rejected)
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), "invalid status transition");
}

#[tokio::test]
async fn login_failure_surfaces_server_error_message() {
    let server_url =
        spawn_failing_server(axum::http::StatusCode::UNAUTHORIZED, "invalid credentials").await;
    let client = AdminApiClient::new();

    let err = client
        .login(&server_url, "admin-7", "wrong")
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn listing_without_a_server_fails_locally() {
    let client = AdminApiClient::new();
    let err = client.list_users().await.expect_err("must fail");
    assert!(err.to_string().contains("not connected"));
}
