use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{error::ResponseError, get, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use crate::auth::oauth::{OAuthClient, OAuthProvider};
use crate::errors::AuthError;
use crate::AppState;

const STATE_COOKIE: &str = "oauth_state";
const STATE_COOKIE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Starts the authorization-code flow: sets the CSRF state cookie and
/// redirects to the provider's consent page.
#[get("/{provider}/login")]
pub async fn oauth_login(
    state: web::Data<AppState>,
    provider: web::Path<String>,
) -> impl Responder {
    let provider = match OAuthProvider::parse(&provider) {
        Ok(p) => p,
        Err(e) => return e.error_response(),
    };

    let settings = match OAuthClient::provider_settings(&state.config, provider) {
        Ok(s) => s,
        Err(e) => return e.error_response(),
    };

    let csrf_state = OAuthClient::generate_state();
    let authorize_url = OAuthClient::build_authorize_url(provider, &settings, &csrf_state);

    let cookie = Cookie::build(STATE_COOKIE, csrf_state)
        .path("/api/v1/auth")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::minutes(STATE_COOKIE_TTL_MINUTES))
        .finish();

    HttpResponse::Found()
        .append_header(("Location", authorize_url))
        .cookie(cookie)
        .finish()
}

/// Provider redirect target: verifies the state cookie, exchanges the
/// code, and signs the user in (creating the account on first login).
#[get("/{provider}/callback")]
pub async fn oauth_callback(
    request: HttpRequest,
    state: web::Data<AppState>,
    provider: web::Path<String>,
    query: web::Query<CallbackQuery>,
) -> impl Responder {
    let provider = match OAuthProvider::parse(&provider) {
        Ok(p) => p,
        Err(e) => return e.error_response(),
    };

    if let Some(error) = &query.error {
        tracing::warn!(provider = provider.name(), error, "OAuth consent denied");
        return AuthError::OAuthProvider(format!("provider returned error: {error}"))
            .error_response();
    }

    if let Err(e) = verify_state(&request, query.state.as_deref()) {
        return e.error_response();
    }

    let code = match &query.code {
        Some(code) => code,
        None => return AuthError::OAuthStateMismatch.error_response(),
    };

    let settings = match OAuthClient::provider_settings(&state.config, provider) {
        Ok(s) => s,
        Err(e) => return e.error_response(),
    };

    let user_info = match state.oauth_client.exchange_code(provider, &settings, code).await {
        Ok(info) => info,
        Err(e) => return e.error_response(),
    };

    let mut expired_cookie = Cookie::build(STATE_COOKIE, "")
        .path("/api/v1/auth")
        .finish();
    expired_cookie.make_removal();

    match state.auth_handler.oauth_login(user_info).await {
        Ok(auth_response) => HttpResponse::Ok().cookie(expired_cookie).json(auth_response),
        Err(e) => e.error_response(),
    }
}

fn verify_state(request: &HttpRequest, returned_state: Option<&str>) -> Result<(), AuthError> {
    let cookie_state = request
        .cookie(STATE_COOKIE)
        .ok_or(AuthError::OAuthStateMismatch)?;

    match returned_state {
        Some(state) if state == cookie_state.value() && !state.is_empty() => Ok(()),
        _ => Err(AuthError::OAuthStateMismatch),
    }
}
