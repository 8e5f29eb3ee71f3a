//! Test server harness for E2E testing
//!
//! Provides TestServer for spawning real service instances in tests.

use crate::token_builders::TestTokenBuilder;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use ta_service::config::Config;
use ta_service::handlers::auth_handler::AppState;
use ta_service::repositories::users::UserDirectory;
use ta_service::routes;
use ta_service::services::auth_service::AuthService;
use tokio::task::JoinHandle;

/// Deterministic JWT secret shared by every spawned test server.
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// A secret of valid length that no test server signs with, for forging
/// tokens that must fail verification.
pub const FOREIGN_JWT_SECRET: &str = "a-completely-different-secret-key-000000";

/// Test harness for spawning the service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_login_e2e() -> Result<(), anyhow::Error> {
///     let server = TestServer::spawn().await?;
///
///     let response = server
///         .client()
///         .post(format!("{}/auth/login", server.url()))
///         .json(&serde_json::json!({"username": "admin", "password": "password"}))
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestServer {
    addr: SocketAddr,
    config: Config,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn a new test server instance
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Provision the default user directory with the minimum bcrypt cost
    ///   so logins stay fast
    /// - Start the HTTP server in the background
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("TA_JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            ("BCRYPT_COST".to_string(), "10".to_string()),
        ]);
        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to build test config: {}", e))?;

        let users = Arc::new(
            UserDirectory::bootstrap(config.bcrypt_cost)
                .map_err(|e| anyhow::anyhow!("Failed to provision test users: {}", e))?,
        );
        let auth = Arc::new(AuthService::new(&config, users));

        let state = Arc::new(AppState {
            auth,
            config: config.clone(),
        });

        // Initialize metrics recorder for the test server.
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        // Build routes using the real route builder
        let app = routes::build_routes(state, metrics_handle);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// POST credentials to /auth/login and return the raw response
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<reqwest::Response, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/auth/login", self.url()))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await?;

        Ok(response)
    }

    /// Log in with the provisioned account and return its token
    pub async fn obtain_token(&self) -> Result<String, anyhow::Error> {
        let response = self.login("admin", "password").await?;

        if !response.status().is_success() {
            anyhow::bail!("Login failed with status {}", response.status());
        }

        let body: serde_json::Value = response.json().await?;
        body["token"]
            .as_str()
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow::anyhow!("Login response missing token"))
    }

    /// Forge a token that expired the given number of seconds ago, signed
    /// with the server's secret
    pub fn issue_expired_token(&self, expired_seconds_ago: i64) -> String {
        TestTokenBuilder::new()
            .expired_seconds_ago(expired_seconds_ago)
            .sign(TEST_JWT_SECRET)
    }

    /// Forge a structurally valid token signed with a secret the server
    /// does not hold
    pub fn issue_foreign_token(&self) -> String {
        TestTokenBuilder::new().sign(FOREIGN_JWT_SECRET)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Explicitly abort the HTTP server task to ensure immediate cleanup
        // when the test completes.
        self._handle.abort();
    }
}
