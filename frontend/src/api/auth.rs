use mediadeck_types::{LoginRequest, LoginResponse, RegisterRequest};
use tracing::info;

use super::*;

impl ApiClient {
    /// Login with email and password.
    ///
    /// Sent without a bearer token. The response body is returned as-is.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let url = format!("{}/Auth/login", self.base_url);
        info!("Attempting login for user: {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.send(self.client.post(&url).json(&request), "login").await?;
        let login_response: LoginResponse = Self::decode(response, "login").await?;

        info!("Login succeeded for user: {}", email);
        Ok(login_response)
    }

    /// Register a new user account.
    ///
    /// Returns the created-user representation verbatim.
    pub async fn register(&self, email: &str, password: &str) -> ApiResult<serde_json::Value> {
        let url = format!("{}/api/User", self.base_url);
        info!("Registering user: {}", email);

        let request = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self
            .send(self.client.post(&url).json(&request), "registration")
            .await?;
        let user = Self::decode(response, "registration").await?;

        info!("Registered user: {}", email);
        Ok(user)
    }
}
