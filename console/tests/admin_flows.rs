//! # Admin Flow Tests
//!
//! End-to-end flows through [`App`] and the real HTTP client against a mock
//! backend, with the session persisted to a scratch file.

use std::net::TcpListener;
use std::path::Path;

use admin_console::app::{App, AuthState, NotificationLevel, Page};
use admin_console::config::ConsoleConfig;
use admin_console::services::session::{FileSessionStore, SessionStore};
use mockito::Matcher;
use shared::{AdminProfile, ReviewDecision};

fn profile() -> AdminProfile {
    serde_json::from_value(serde_json::json!({
        "id": "adm-1",
        "email": "ops@example.com",
        "username": "ops",
        "full_name": "Ops Admin",
        "role": "super_admin",
        "created_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

fn config(api_url: &str, session_file: &Path) -> ConsoleConfig {
    ConsoleConfig {
        api_url: api_url.to_string(),
        session_file: session_file.to_path_buf(),
        ..ConsoleConfig::default()
    }
}

/// App whose session file already holds a token and profile
fn logged_in_app(api_url: &str, session_file: &Path) -> App {
    let store = FileSessionStore::new(session_file);
    store.store_token("tok").unwrap();
    store.store_profile(&profile()).unwrap();
    App::from_config(&config(api_url, session_file)).unwrap()
}

fn user_json(id: usize, active: bool) -> serde_json::Value {
    serde_json::json!({
        "id": format!("u{}", id),
        "email": format!("alice{}@example.com", id),
        "username": format!("alice{}", id),
        "is_active": active,
        "created_at": "2024-03-01T12:00:00Z"
    })
}

fn messages(app: &App) -> Vec<(NotificationLevel, String)> {
    app.drain_notifications()
        .into_iter()
        .map(|n| (n.level, n.message))
        .collect()
}

// ========== List Page Tests ==========

#[tokio::test]
async fn test_user_search_single_page_disables_navigation() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let users: Vec<_> = (0..12).map(|i| user_json(i, true)).collect();
    let mock = server
        .mock("GET", "/admin/users?search=alice&page=1&limit=20")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(serde_json::json!({ "users": users, "page": 1, "pages": 1 }).to_string())
        .expect(1)
        .create_async()
        .await;
    let mut app = logged_in_app(&server.url(), &dir.path().join("session.json"));
    app.navigate(Page::Users);

    // Act
    app.users.open(1, "alice").await;

    // Assert
    let state = app.users.snapshot();
    assert_eq!(state.items.len(), 12);
    assert_eq!(state.total_pages, 1);
    assert!(!state.can_go_prev());
    assert!(!state.can_go_next());
    assert!(!state.loading);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_user_deactivation_refetches_page() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/admin/users?page=1&limit=20")
        .with_status(200)
        .with_body(serde_json::json!({ "users": [user_json(7, true)], "page": 1, "pages": 1 }).to_string())
        .expect(2)
        .create_async()
        .await;
    let toggle = server
        .mock("PUT", "/admin/users/u7/status?is_active=false")
        .with_status(200)
        .with_body(r#"{"message":"User deactivated"}"#)
        .expect(1)
        .create_async()
        .await;
    let mut app = logged_in_app(&server.url(), &dir.path().join("session.json"));
    app.navigate(Page::Users);
    assert!(app.mount_current().await);

    // Act
    app.users.set_user_active("u7", false).await.unwrap();

    // Assert
    toggle.assert_async().await;
    list.assert_async().await;
    assert!(messages(&app).contains(&(
        NotificationLevel::Success,
        "User deactivated successfully".to_string()
    )));
}

#[tokio::test]
async fn test_withdrawal_rejection_encodes_note() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let _list = server
        .mock("GET", Matcher::Regex(r"^/admin/withdrawals\?".to_string()))
        .with_status(200)
        .with_body(r#"{"withdrawals":[],"page":1,"pages":1}"#)
        .create_async()
        .await;
    let process = server
        .mock(
            "PUT",
            "/admin/withdrawals/42/process?approved=false&admin_note=insufficient%20funds",
        )
        .with_status(200)
        .with_body(r#"{"message":"Withdrawal rejected"}"#)
        .expect(1)
        .create_async()
        .await;
    let app = logged_in_app(&server.url(), &dir.path().join("session.json"));

    // Act
    let response = app
        .withdrawals
        .review("42", ReviewDecision::reject(Some("insufficient funds".to_string())))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.message, "Withdrawal rejected");
    process.assert_async().await;
    assert!(messages(&app).contains(&(
        NotificationLevel::Success,
        "Withdrawal rejected successfully".to_string()
    )));
}

#[tokio::test]
async fn test_page_filters_map_to_resource_queries() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for (path, key) in [
        ("/admin/kyc/pending?page=1&limit=20&user_id=u9", "submissions"),
        ("/admin/documents?page=1&limit=20&search=tax%20guide", "documents"),
        ("/admin/transactions?page=1&limit=20&type=staking", "transactions"),
        ("/admin/audit-logs?page=1&limit=20&action=login", "logs"),
    ] {
        let mut body = serde_json::json!({ "page": 1, "pages": 1 });
        body[key] = serde_json::json!([]);
        let mock = server
            .mock("GET", path)
            .with_status(200)
            .with_body(body.to_string())
            .expect(1)
            .create_async()
            .await;
        mocks.push(mock);
    }
    let app = logged_in_app(&server.url(), &dir.path().join("session.json"));

    // Act
    app.kyc.open(1, "u9").await;
    app.documents.open(1, "tax guide").await;
    app.transactions.open(1, "staking").await;
    app.audit_logs.open(1, "login").await;

    // Assert
    for mock in &mocks {
        mock.assert_async().await;
    }
    assert!(app.drain_notifications().is_empty());
}

// ========== Session Tests ==========

#[tokio::test]
async fn test_failed_login_leaves_no_session() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/admin/auth/login")
        .with_status(401)
        .with_body(r#"{"detail":"Invalid credentials"}"#)
        .create_async()
        .await;
    let app = App::from_config(&config(&server.url(), &session_file)).unwrap();

    // Act
    let result = app.auth.login("ops@example.com", "WrongPass1", None).await;

    // Assert
    assert!(result.is_err());
    assert!(!app.auth.is_authenticated());
    assert!(FileSessionStore::new(&session_file).load().unwrap().is_empty());
    assert_eq!(
        messages(&app),
        vec![(NotificationLevel::Error, "Invalid credentials".to_string())]
    );
}

#[tokio::test]
async fn test_wrong_password_keeps_existing_session() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/admin/auth/login")
        .with_status(401)
        .with_body(r#"{"detail":"Invalid credentials"}"#)
        .create_async()
        .await;
    let app = logged_in_app(&server.url(), &session_file);

    // Act
    let result = app.auth.login("ops@example.com", "WrongPass1", None).await;

    // Assert
    assert!(result.is_err());
    let stored = FileSessionStore::new(&session_file).load().unwrap();
    assert_eq!(stored.token.as_deref(), Some("tok"));
    assert_eq!(stored.profile, Some(profile()));
    assert_eq!(app.api.session().token.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_profile_failure_after_login_leaves_no_token() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mut server = mockito::Server::new_async().await;
    let _login = server
        .mock("POST", "/admin/auth/login")
        .with_status(200)
        .with_body(r#"{"access_token":"tok-new","token_type":"bearer"}"#)
        .create_async()
        .await;
    let _profile = server
        .mock("GET", "/admin/auth/profile")
        .with_status(500)
        .with_body(r#"{"detail":"Internal server error"}"#)
        .create_async()
        .await;
    let app = App::from_config(&config(&server.url(), &session_file)).unwrap();

    // Act
    let result = app.auth.login("ops@example.com", "Secret123", None).await;

    // Assert
    assert!(result.is_err());
    assert!(!app.auth.is_authenticated());
    assert!(app.api.session().is_empty());
    assert!(FileSessionStore::new(&session_file).load().unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_with_unreachable_server_clears_session() {
    // Arrange
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let app = logged_in_app(&format!("http://127.0.0.1:{}/api", port), &session_file);
    assert!(app.auth.is_authenticated());

    // Act
    app.auth.logout().await;

    // Assert
    assert_eq!(app.auth.snapshot(), AuthState::default());
    assert!(app.api.session().is_empty());
    assert!(FileSessionStore::new(&session_file).load().unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_token_returns_to_login() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/admin/dashboard")
        .with_status(401)
        .with_body(r#"{"detail":"Token expired"}"#)
        .create_async()
        .await;
    let app = logged_in_app(&server.url(), &session_file);

    // Act
    let mounted = app.mount_current().await;

    // Assert
    assert!(!mounted);
    assert!(!app.auth.is_authenticated());
    assert!(FileSessionStore::new(&session_file).load().unwrap().is_empty());
    assert!(messages(&app).contains(&(
        NotificationLevel::Warning,
        "Session expired, please log in again".to_string()
    )));
}

// ========== Settings Tests ==========

#[tokio::test]
async fn test_settings_edit_sends_whole_bundle() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut server = mockito::Server::new_async().await;
    let _get = server
        .mock("GET", "/admin/settings")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "eth_network": "mainnet",
                "bsc_network": "mainnet",
                "staking_lock_period_days": 30,
                "withdrawal_fee_percentage": 1.5
            })
            .to_string(),
        )
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/admin/settings")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "eth_network": "goerli",
            "bsc_network": "mainnet",
            "staking_lock_period_days": 30
        })))
        .with_status(200)
        .with_body(r#"{"message":"Settings updated"}"#)
        .expect(1)
        .create_async()
        .await;
    let mut app = logged_in_app(&server.url(), &dir.path().join("session.json"));
    app.navigate(Page::Settings);
    assert!(app.mount_current().await);

    // Act
    app.settings.update_field("eth_network", "goerli");
    app.settings.save().await.unwrap();

    // Assert
    put.assert_async().await;
    assert!(!app.settings.snapshot().dirty);
    assert!(messages(&app).contains(&(
        NotificationLevel::Success,
        "System settings updated successfully".to_string()
    )));
}
