use std::ops::Deref;

use actix_web::{body, dev, http::{self, header::ContentType, StatusCode}, web, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Verifies access tokens minted by the hosted auth provider
///
/// Tokens are HS256 signed with the project's JWT secret and carry the
/// caller's company and role next to the usual `sub` and `exp`.
pub struct Authority {
    jwt_key: DecodingKey,

    #[cfg(test)]
    signing_key: jsonwebtoken::EncodingKey,
}

impl Authority {
    pub fn new(jwt_key: &[u8]) -> Self {
        Self {
            jwt_key: DecodingKey::from_secret(jwt_key),

            #[cfg(test)]
            signing_key: jsonwebtoken::EncodingKey::from_secret(jwt_key),
        }
    }

    /// Issue a token for `principal` with 1 hour of expiration time, the way
    /// the auth provider would
    #[cfg(test)]
    pub fn issue_for(&self, principal: &Principal) -> Result<String, AuthError> {
        use chrono::{Duration, Local};
        use jsonwebtoken::{encode, Header};

        let claims = Claims {
            sub: principal.id,
            exp: (Local::now() + Duration::hours(1)).timestamp(),
            company_id: principal.company_id,
            app_role: principal.role,
        };

        Ok(encode(&Header::default(), &claims, &self.signing_key)?)
    }

    pub fn authorize(&self, token: impl AsRef<str>) -> Result<Principal, AuthError> {
        let payload = decode::<Claims>(token.as_ref(), &self.jwt_key, &Validation::default())?;

        Ok(Principal {
            id: payload.claims.sub,
            company_id: payload.claims.company_id,
            role: payload.claims.app_role,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
    company_id: Uuid,
    app_role: RoleType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Owner,
    Manager,
    Staff,
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub company_id: Uuid,
    pub role: RoleType,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authority error")]
    AuthorityError(#[from] jsonwebtoken::errors::Error),
}

impl actix_web::error::ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            AuthError::AuthorityError(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl FromRequest for Principal {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // Grabs the value after space ( ) from `Authorization` header
            // Example: Bearer sometoken
            //                 ^ grabs this value
            let Some(Ok(Some((_, token)))) = req.headers()
                .get("Authorization")
                .map(|v|
                    v.to_str()
                        .map(|str| str.split_once(" "))
                )
            else {
                return Err(actix_web::error::ErrorUnauthorized("unauthorized"))
            };

            let authority = req.app_data::<web::Data<Authority>>().expect("Authority must be attached");
            let principal = authority.authorize(token)?;

            Ok(principal)
        })
    }
}

/// Caller allowed to run and settle payroll
pub struct Manager(pub Principal);

impl Deref for Manager {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Manager {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let principal = Principal::from_request(&req, &mut dev::Payload::None).await?;

            if let RoleType::Staff = principal.role {
                return Err(actix_web::error::ErrorForbidden("forbidden"))
            }

            Ok(Self(principal))
        })
    }
}
