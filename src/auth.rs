use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::{
    body::{BoxBody, MessageBody},
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpRequest, HttpResponse, ResponseError,
};
use chrono::{DateTime, Utc};
use futures::future::{ok, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::{ApiError, AuthError};
use crate::models::validate_email;

pub const TOKEN_COOKIE: &str = "token";
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and checks HS256 tokens with one shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(email, Utc::now())
    }

    pub fn issue_at(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Checks signature and shape, then expiry against `now` with no leeway.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

fn token_cookie(value: String, max_age: CookieDuration) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(max_age)
        .finish()
}

/// Identity presented at `/jwt`. Any other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /jwt
/// Signs whatever identity is presented; there is no credential check.
pub async fn issue_token(
    data: web::Data<AppState>,
    identity: web::Json<TokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let identity = identity.into_inner();
    validate_email(&identity.email)?;

    let token = data
        .tokens
        .issue(&identity.email)
        .map_err(|e| ApiError::Internal(format!("signing token: {}", e)))?;
    info!("Issued token for {}", identity.email);

    Ok(HttpResponse::Ok()
        .cookie(token_cookie(token, CookieDuration::seconds(TOKEN_TTL_SECS)))
        .json(json!({ "success": true })))
}

/// POST /logout
pub async fn clear_token() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(token_cookie(String::new(), CookieDuration::ZERO))
        .json(json!({ "success": true }))
}

/// Claims the [`TokenGate`] attached to this request.
pub fn caller(req: &HttpRequest) -> Result<Claims, ApiError> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or(ApiError::Unauthorized(AuthError::MissingToken))
}

/// Middleware that admits a request only with a valid `token` cookie and
/// stores its [`Claims`] in the request extensions.
#[derive(Debug)]
pub struct TokenGate;

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = TokenGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(TokenGateMiddleware { service })
    }
}

pub struct TokenGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TokenGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match req.app_data::<web::Data<AppState>>() {
            Some(state) => match req.cookie(TOKEN_COOKIE) {
                Some(cookie) => state.tokens.verify(cookie.value()).map_err(ApiError::from),
                None => Err(ApiError::from(AuthError::MissingToken)),
            },
            None => Err(ApiError::Internal("application state not registered".to_string())),
        };

        match outcome {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                warn!("Rejected {} {}: {}", req.method(), req.path(), e);
                let (req_parts, _payload) = req.into_parts();
                let srv_resp = ServiceResponse::new(req_parts, e.error_response());
                return Box::pin(async move { Ok(srv_resp) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_boxed_body())
        })
    }
}
