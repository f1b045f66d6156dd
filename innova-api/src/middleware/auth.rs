use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use innova_core::{Role, Session};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// JWT Claims
// ============================================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    /// ADMIN, RESIDENT or EMPLOYEE
    pub role: String,
    #[serde(default)]
    pub building_id: Option<String>,
    pub exp: usize,
}

impl SessionClaims {
    pub fn into_session(self, token: &str) -> Result<Session, AppError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| AppError::AuthorizationError(format!("Unknown role {}", self.role)))?;
        let mut session = Session::new(self.sub, role).with_token(token);
        if let Some(name) = self.name {
            session = session.with_display_name(name);
        }
        if let Some(building) = self.building_id {
            session = session.with_building(building);
        }
        Ok(session)
    }
}

// ============================================================================
// Session Middleware
// ============================================================================

/// Decodes the bearer token and makes the resulting [`Session`] available to handlers.
pub async fn session_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) =
        bearer.ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;
    let token = bearer.token();

    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::AuthenticationError(e.to_string()))?;

    let session = token_data.claims.into_session(token)?;
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
