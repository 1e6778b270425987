use axum::{
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use shoal_types::api::Claims;

/// Extract and validate the JWT from the Authorization header. An
/// unauthenticated call is rejected here, before any storage access.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::FORBIDDEN)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::FORBIDDEN)?;

    let secret = std::env::var("SHOAL_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::FORBIDDEN)?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}
