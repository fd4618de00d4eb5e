//! Test utilities for integration testing (available with `test-utils` feature).

use axum_test::TestServer;
use sqlx::SqlitePool;

use crate::{
    api::models::{
        auth::LoginResponse,
        prompts::PromptPayload,
        tools::{HowToStep, ToolPayload},
    },
    config::Config,
};

pub const TEST_ADMIN_USERNAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "correct-horse-battery-staple";

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_username: TEST_ADMIN_USERNAME.to_string(),
        admin_password: Some(TEST_ADMIN_PASSWORD.to_string()),
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Config::default()
    }
}

/// Spin up a test server on the given (already migrated) pool.
pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();
    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");
    app.into_test_server()
}

/// Log in as the bootstrapped test admin and return the session token.
pub async fn login_admin(server: &TestServer) -> String {
    let response = server
        .post("/login")
        .json(&serde_json::json!({
            "username": TEST_ADMIN_USERNAME,
            "password": TEST_ADMIN_PASSWORD,
        }))
        .await;
    response.assert_status_ok();
    response.json::<LoginResponse>().token
}

pub fn sample_tool_payload(name: &str) -> ToolPayload {
    ToolPayload {
        slug: Some(name.to_lowercase().replace(' ', "-")),
        name: Some(name.to_string()),
        tagline: Some(format!("{name} in one line")),
        category: Some("writing".to_string()),
        best_for: vec!["testing".to_string()],
        difficulty: Some("Beginner".to_string()),
        price: Some("Free".to_string()),
        how_to_use: vec![HowToStep {
            step: 1,
            text: "Sign up".to_string(),
        }],
        official_website: Some(format!("https://{}.example", name.to_lowercase())),
        ..Default::default()
    }
}

pub fn sample_prompt_payload(title: &str) -> PromptPayload {
    PromptPayload {
        slug: Some(title.to_lowercase().replace(' ', "-")),
        title: Some(title.to_string()),
        prompt: Some(format!("{title}: {{input}}")),
        category: Some("research".to_string()),
        tags: vec!["test".to_string()],
        tool_id: None,
    }
}
