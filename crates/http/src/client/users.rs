//! Account and authentication endpoints

use super::{ClientError, ClinicClient};
use crate::types::{
    DetailResponse, LoginRequest, ProfileUpdate, RegisterRequest, TokenResponse, UserProfile,
};
use clinic_core::{InvalidationReason, SessionOrigin, SessionToken};
use reqwest::Method;

impl ClinicClient {
    /// Log in with email and password and store the issued token
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, "/login").json(&request);
        let response: TokenResponse = self.execute(req).await?;

        let token = SessionToken::new(response.access_token.clone())?;
        self.session().establish(token, SessionOrigin::PasswordLogin)?;
        Ok(response)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, ClientError> {
        request.validate().map_err(ClientError::Validation)?;
        let req = self.request(Method::POST, "/register").json(&request);
        self.execute(req).await
    }

    /// Current user's profile
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        let req = self.request(Method::GET, "/me");
        self.execute(req).await
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, ClientError> {
        update.validate().map_err(ClientError::Validation)?;
        let req = self.request(Method::PUT, "/me/profile").json(&update);
        self.execute(req).await
    }

    /// Delete the current account and end the session
    pub async fn delete_account(&self) -> Result<DetailResponse, ClientError> {
        let req = self.request(Method::DELETE, "/me");
        let response: DetailResponse = self.execute(req).await?;
        self.session().invalidate(InvalidationReason::SignedOut)?;
        Ok(response)
    }

    /// Where the browser goes to start the identity provider login
    pub fn google_login_url(&self) -> String {
        format!("{}/auth/google/login", self.base_url())
    }
}
