use axum::{
    body::{boxed, Body},
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use crate::models::access_token::{self, AccessToken};

pub async fn check_authentication<B>(
    State(db): State<PgPool>,
    mut req: Request<B>,
    next: Next<B>,
) -> Response {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return unauthorized(),
    };

    let access_token = match AccessToken::get_by_token(&db, &token).await {
        Ok(access_token) => access_token,
        Err(_) => return unauthorized(),
    };

    if access_token::is_expired(&access_token.expires_at) {
        return unauthorized();
    }

    req.extensions_mut().insert(access_token.user_id);

    next.run(req).await
}

fn bearer_token<B>(req: &Request<B>) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

fn unauthorized() -> Response {
    Response::builder()
        .status(401)
        .body(boxed(Body::from("Unauthorized")))
        .unwrap()
}
