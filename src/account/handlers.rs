use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    account::{
        dto::{
            AuthResponse, CheckUserRequest, CheckUserResponse, LoginRequest, ProfileResponse,
            ProfileUser, PublicUser, RegisterRequest,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        password, repo,
        validate::is_valid_phone,
    },
    error::ApiError,
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/check-user", post(check_user))
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(profile))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[instrument(skip(state, payload))]
async fn check_user(
    State(state): State<AppState>,
    Json(payload): Json<CheckUserRequest>,
) -> Result<Json<CheckUserResponse>, ApiError> {
    let phone = non_empty(payload.phone)
        .filter(|p| is_valid_phone(p))
        .ok_or_else(|| ApiError::Validation("Invalid phone number".into()))?;

    let exists = repo::find_by_phone(&state.db, &phone).await?.is_some();
    Ok(Json(CheckUserResponse {
        exists,
        requires_password: exists,
    }))
}

#[instrument(skip(state, payload))]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (phone, password) = match (non_empty(payload.phone), non_empty(payload.password)) {
        (Some(phone), Some(password)) => (phone, password),
        _ => {
            return Err(ApiError::Validation(
                "Phone and password are required".into(),
            ))
        }
    };

    // Unknown phone and wrong password get the same rejection.
    let user = match repo::find_by_phone(&state.db, &phone).await? {
        Some(user) if matches!(password::verify_password(&password, &user.password_hash), Ok(true)) => {
            user
        }
        _ => {
            warn!("login rejected");
            return Err(ApiError::Auth("Invalid phone or password".into()));
        }
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let reg = payload.validate()?;

    // Pre-checks give the friendly message; the unique indexes remain the
    // real guard and a raced insert below reports the same duplicates.
    if repo::find_by_phone(&state.db, &reg.phone).await?.is_some() {
        warn!("duplicate phone on register");
        return Err(ApiError::Conflict("Phone number already registered".into()));
    }
    if repo::find_by_email(&state.db, &reg.email).await?.is_some() {
        warn!("duplicate email on register");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = password::hash_password(&reg.password)?;
    let user = repo::create(
        &state.db,
        &reg.phone,
        &reg.full_name,
        &reg.email,
        reg.birth_date,
        &hash,
    )
    .await?;

    // The row is committed at this point; a signing failure does not roll
    // the account back.
    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

#[instrument(skip(state))]
async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    // A token whose subject no longer resolves reads the same as a bad one.
    let user = repo::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid token".into()))?;

    Ok(Json(ProfileResponse {
        user: ProfileUser::from(&user),
    }))
}
