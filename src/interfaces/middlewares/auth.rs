use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path();
            let method = req.method().as_str();

            if is_public_route(path, method) {
                return service.call(req).await;
            }

            let claims = match get_valid_claims(&req) {
                Ok(claims) => claims,
                Err(AuthError::TokenExpired) => {
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Token has expired"
                    }))));
                }
                Err(_) => {
                    tracing::warn!("Missing or invalid credentials");
                    return Ok(custom_error_response(req, HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "Missing or invalid credentials"
                    }))));
                }
            };

            if let Err(forbidden_response) = enforce_admin_access(path, &claims) {
                return Ok(custom_error_response(req, forbidden_response));
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    // OAuth redirect/callback pairs live under /auth/{provider}/.
    if method == "GET"
        && path.starts_with("/api/v1/auth/")
        && (path.ends_with("/login") || path.ends_with("/callback"))
    {
        return true;
    }

    matches!(
        (path, method),
        ("/", "GET") |
        ("/api/v1/auth/register", "POST") |
        ("/api/v1/auth/login", "POST") |
        ("/api/v1/auth/refresh", "POST")
    )
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_valid_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let decoded = state.auth_handler.token_service.decode_jwt(&token)?;
    Ok(decoded.claims)
}

fn enforce_admin_access(path: &str, claims: &Claims) -> Result<(), HttpResponse> {
    if path.starts_with("/api/v1/admin") && !claims.admin {
        tracing::warn!("Admin access required for path: {}", path);
        return Err(
            HttpResponse::Forbidden().json(serde_json::json!({
                "error": "Admin access required"
            }))
        );
    }
    Ok(())
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oauth_redirects_are_public() {
        assert!(is_public_route("/api/v1/auth/google/login", "GET"));
        assert!(is_public_route("/api/v1/auth/kakao/callback", "GET"));
        assert!(!is_public_route("/api/v1/auth/google/login", "POST"));
    }

    #[test]
    fn protected_routes_are_not_public() {
        assert!(!is_public_route("/api/v1/experiences", "GET"));
        assert!(!is_public_route("/api/v1/admin/dashboard", "GET"));
        assert!(is_public_route("/api/v1/experiences", "OPTIONS"));
    }

    #[test]
    fn admin_paths_require_admin_claims() {
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "user@example.com".into(),
            admin: false,
            verified: true,
            exp: 0,
            iat: 0,
        };
        assert!(enforce_admin_access("/api/v1/admin/dashboard", &claims).is_err());
        assert!(enforce_admin_access("/api/v1/experiences", &claims).is_ok());
    }
}
