//! Auth handlers: sign-in, logout, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, SignInResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /auth/signin
///
/// Returns the token in the body and also sets it as an HTTP-only cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<SignInRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SignInResponse>>), ApiError> {
    let result = state.auth_service.sign_in(&req.email, &req.password).await?;

    let auth = &state.config.auth;
    let cookie = Cookie::build((auth.cookie_name.clone(), result.token.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(auth.cookie_secure)
        .same_site(SameSite::Lax)
        .build();

    let body = SignInResponse {
        access_token: result.token.access_token,
        expires_at: result.token.expires_at,
        user: UserResponse::from(result.user),
    };

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok("Signed in successfully", body)),
    ))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let removal = Cookie::build(state.config.auth.cookie_name.clone())
        .path("/")
        .build();
    (
        jar.remove(removal),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service.current_user(&auth).await?;
    Ok(Json(ApiResponse::ok(
        "Authenticated user",
        UserResponse::from(user),
    )))
}
