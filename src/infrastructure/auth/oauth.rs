use rand::{distributions::Alphanumeric, Rng};
use reqwest::Client;
use serde::Deserialize;

use crate::entities::user::OAuthUserInfo;
use crate::errors::AuthError;
use crate::settings::{AppConfig, OAuthProviderSettings};

/// Endpoint table for the supported providers. The exchange itself is
/// plain authorization-code flow over `reqwest`; providers only differ in
/// their URLs and userinfo payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Kakao,
    Naver,
}

impl OAuthProvider {
    pub fn parse(name: &str) -> Result<Self, AuthError> {
        match name {
            "google" => Ok(OAuthProvider::Google),
            "kakao" => Ok(OAuthProvider::Kakao),
            "naver" => Ok(OAuthProvider::Naver),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Kakao => "kakao",
            OAuthProvider::Naver => "naver",
        }
    }

    fn authorize_url(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            OAuthProvider::Kakao => "https://kauth.kakao.com/oauth/authorize",
            OAuthProvider::Naver => "https://nid.naver.com/oauth2.0/authorize",
        }
    }

    fn token_url(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://oauth2.googleapis.com/token",
            OAuthProvider::Kakao => "https://kauth.kakao.com/oauth/token",
            OAuthProvider::Naver => "https://nid.naver.com/oauth2.0/token",
        }
    }

    fn userinfo_url(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "https://www.googleapis.com/oauth2/v2/userinfo",
            OAuthProvider::Kakao => "https://kapi.kakao.com/v2/user/me",
            OAuthProvider::Naver => "https://openapi.naver.com/v1/nid/me",
        }
    }

    fn scope(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "openid email profile",
            OAuthProvider::Kakao => "account_email profile_nickname",
            OAuthProvider::Naver => "",
        }
    }
}

#[derive(Clone)]
pub struct OAuthClient {
    http: Client,
}

impl OAuthClient {
    pub fn new() -> Self {
        OAuthClient { http: Client::new() }
    }

    pub fn provider_settings(
        config: &AppConfig,
        provider: OAuthProvider,
    ) -> Result<OAuthProviderSettings, AuthError> {
        config
            .oauth_provider(provider.name())
            .ok_or_else(|| AuthError::UnknownProvider(provider.name().to_string()))
    }

    /// Random CSRF state token, echoed back by the provider and compared
    /// against the login cookie in the callback.
    pub fn generate_state() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect()
    }

    pub fn build_authorize_url(
        provider: OAuthProvider,
        settings: &OAuthProviderSettings,
        state: &str,
    ) -> String {
        let mut url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&state={}",
            provider.authorize_url(),
            urlencoding::encode(&settings.client_id),
            urlencoding::encode(&settings.redirect_uri),
            urlencoding::encode(state),
        );

        let scope = provider.scope();
        if !scope.is_empty() {
            url.push_str("&scope=");
            url.push_str(&urlencoding::encode(scope).into_owned());
        }

        url
    }

    /// Exchanges the authorization code for an access token, then resolves
    /// the provider's user info. One round-trip each, no retry.
    pub async fn exchange_code(
        &self,
        provider: OAuthProvider,
        settings: &OAuthProviderSettings,
        code: &str,
    ) -> Result<OAuthUserInfo, AuthError> {
        let token = self.fetch_token(provider, settings, code).await?;
        self.fetch_user_info(provider, &token.access_token).await
    }

    async fn fetch_token(
        &self,
        provider: OAuthProvider,
        settings: &OAuthProviderSettings,
        code: &str,
    ) -> Result<TokenResponse, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("client_secret", settings.client_secret.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self.http
            .post(provider.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = provider.name(), %status, "OAuth token exchange rejected");
            return Err(AuthError::OAuthProvider(format!("token exchange failed: HTTP {status}: {body}")));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("invalid token response: {e}")))
    }

    async fn fetch_user_info(
        &self,
        provider: OAuthProvider,
        access_token: &str,
    ) -> Result<OAuthUserInfo, AuthError> {
        let response = self.http
            .get(provider.userinfo_url())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("userinfo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::OAuthProvider(format!("userinfo failed: HTTP {status}")));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AuthError::OAuthProvider(format!("invalid userinfo response: {e}")))?;

        parse_user_info(provider, &body)
    }
}

impl Default for OAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

fn parse_user_info(
    provider: OAuthProvider,
    body: &serde_json::Value,
) -> Result<OAuthUserInfo, AuthError> {
    let (id, email, name) = match provider {
        OAuthProvider::Google => (
            body.get("id").and_then(json_id),
            body.get("email").and_then(|v| v.as_str()).map(String::from),
            body.get("name").and_then(|v| v.as_str()).map(String::from),
        ),
        OAuthProvider::Kakao => (
            body.get("id").and_then(json_id),
            body.pointer("/kakao_account/email").and_then(|v| v.as_str()).map(String::from),
            body.pointer("/kakao_account/profile/nickname").and_then(|v| v.as_str()).map(String::from),
        ),
        // Naver wraps the payload in a `response` object.
        OAuthProvider::Naver => (
            body.pointer("/response/id").and_then(json_id),
            body.pointer("/response/email").and_then(|v| v.as_str()).map(String::from),
            body.pointer("/response/name").and_then(|v| v.as_str()).map(String::from),
        ),
    };

    let provider_user_id = id.ok_or_else(|| {
        AuthError::OAuthProvider(format!("{} userinfo missing user id", provider.name()))
    })?;

    Ok(OAuthUserInfo {
        provider: provider.name().to_string(),
        provider_user_id,
        email,
        name,
    })
}

// Kakao sends a numeric id, the others send strings.
fn json_id(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
