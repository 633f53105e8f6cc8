//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use gym_core::ApprovalState;
use integration_tests::{
    assert_json, assert_status, check_test_env, seed_member, ErrorEnvelope, LedgerEdit,
    MemberView, StatusPanel, TestServer, TEST_ADMIN_ID,
};
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_redirects_to_provider() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/auth/kakao/login").await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.contains("response_type=code"));
    assert!(location.contains("state="));
}

#[tokio::test]
async fn test_callback_with_unknown_state() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/auth/kakao/callback?code=abc&state=never-issued")
        .await
        .unwrap();
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_LOGIN_STATE");
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_check_in_requires_session() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let url = format!("{}/api/v1/attendance", server.base_url());
    let response = server.client.post(&url).send().await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn test_status_panel_from_loopback() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/attendance/status").await.unwrap();
    let panel: StatusPanel = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!panel.is_authenticated);
    assert!(panel.is_ip_valid);
    assert_eq!(panel.client_ip, "127.0.0.1");
    assert!(!panel.already_attended);
}

#[tokio::test]
async fn test_check_in_follows_the_window() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Window", ApprovalState::Approved)
        .await
        .unwrap();
    let token = server.session_for(&member).unwrap();

    let response = server
        .get_auth("/api/v1/attendance/status", &token)
        .await
        .unwrap();
    let panel: StatusPanel = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(panel.is_authenticated);

    let response = server.post_auth("/api/v1/attendance", &token).await.unwrap();

    // the real clock decides which outcome applies
    let expected = match panel.time_status.as_str() {
        "open" => Some("present"),
        "late" => Some("late"),
        _ => None,
    };
    match expected {
        Some(status) => {
            let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
            assert_eq!(body["status"], status);

            let again = server.post_auth("/api/v1/attendance", &token).await.unwrap();
            let body: ErrorEnvelope = assert_json(again, StatusCode::CONFLICT).await.unwrap();
            assert_eq!(body.error.code, "ALREADY_CHECKED_IN");
        }
        _ => {
            let body: ErrorEnvelope = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
                .await
                .unwrap();
            assert_eq!(body.error.code, "WINDOW_CLOSED");
        }
    }
}

#[tokio::test]
async fn test_pending_member_is_not_ranked() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Pending", ApprovalState::Pending)
        .await
        .unwrap();
    let admin = server.session_for(TEST_ADMIN_ID).unwrap();
    let edit = LedgerEdit::mark(&[("2024-03-02", "present"), ("2024-03-03", "present")]);
    let response = server
        .put_auth(&format!("/api/v1/admin/members/{member}/attendance"), &admin, &edit)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let token = server.session_for(&member).unwrap();
    let response = server
        .get_auth("/api/v1/ranking?year=2024&month=3", &token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let ranked = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["member_id"] == member.as_str());
    assert!(!ranked);
}

// ============================================================================
// Records and Ranking Tests
// ============================================================================

#[tokio::test]
async fn test_my_records() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Reader", ApprovalState::Approved)
        .await
        .unwrap();
    let token = server.session_for(&member).unwrap();

    let response = server.get_auth("/api/v1/me", &token).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["member"]["id"], member.as_str());
    assert_eq!(body["is_admin"], false);
    assert!(body["month"]["valid_class_days"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn test_ranking_invalid_month() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Ranker", ApprovalState::Approved)
        .await
        .unwrap();
    let token = server.session_for(&member).unwrap();

    let response = server
        .get_auth("/api/v1/ranking?year=2024&month=13", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth("/api/v1/ranking?year=2024&month=2", &token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["valid_class_days"], 8);
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_forbidden_for_members() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "Curious", ApprovalState::Approved)
        .await
        .unwrap();
    let token = server.session_for(&member).unwrap();

    let response = server
        .get_auth("/api/v1/admin/dashboard", &token)
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_ADMIN");
}

#[tokio::test]
async fn test_admin_member_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let member = seed_member(&server.pool, "kakao_nick", ApprovalState::Pending)
        .await
        .unwrap();
    let admin = server.session_for(TEST_ADMIN_ID).unwrap();
    let path = format!("/api/v1/admin/members/{member}");

    // Approve and rename
    let response = server
        .patch_auth(
            &path,
            &admin,
            &json!({"nickname": "Real Name", "approval": "approved", "batch": "24-03"}),
        )
        .await
        .unwrap();
    let updated: MemberView = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.id, member);
    assert_eq!(updated.nickname, "Real Name");
    assert_eq!(updated.approval, "approved");
    assert_eq!(updated.batch.as_deref(), Some("24-03"));

    // Malformed batch
    let response = server
        .patch_auth(&path, &admin, &json!({"batch": "March"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Ledger edit
    let edit = LedgerEdit::mark(&[
        ("2024-03-02", "present"),
        ("2024-03-03", "late"),
        ("2024-03-09", "absent"),
    ]);
    let response = server
        .put_auth(&format!("{path}/attendance"), &admin, &edit)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["upserted"], 2);
    assert_eq!(body["deleted"], 0);

    let response = server.get_auth(&path, &admin).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["records"][0]["date"], "2024-03-03");
    assert_eq!(body["records"][0]["status"], "late");

    // Dashboard lists the member
    let response = server
        .get_auth("/api/v1/admin/dashboard", &admin)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let listed = body["members"]
        .as_array()
        .unwrap()
        .iter()
        .any(|m| m["id"] == member.as_str());
    assert!(listed);

    // Purge
    let response = server.delete_auth(&path, &admin).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["deleted_records"], 2);
    assert_eq!(body["member_deleted"], true);

    let response = server.get_auth(&path, &admin).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_MEMBER");
}
