use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{
    ValidatedJson, bearer_auth_middleware,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::avatar::{AVATAR_FIELD, AvatarForm, AvatarUpload};
use crate::error::{UserError, UserResult};
use crate::models::{
    AvatarUpdated, EmailRequest, History, LoggedIn, LoginRequest, Message, Profile,
    RefreshRequest, RegisterUser, Registered, SessionUser, Tokens, Verified,
};
use crate::repository::UserRepository;
use crate::service::AuthService;
use crate::session::SessionGuard;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        register,
        verify,
        resend_verification,
        login,
        refresh,
        current,
        logout,
        history,
        update_avatar,
    ),
    components(
        schemas(
            RegisterUser,
            LoginRequest,
            EmailRequest,
            RefreshRequest,
            Registered,
            Verified,
            LoggedIn,
            Profile,
            SessionUser,
            Message,
            Tokens,
            History,
            AvatarForm,
            AvatarUpdated
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Registration, email verification and sessions")
    )
)]
pub struct ApiDoc;

type AuthState<R> = Arc<AuthService<R>>;

/// Create the users router; `/current`, `/logout`, `/history` and
/// `/avatars` need a live session.
pub fn router<R: UserRepository>(service: AuthService<R>) -> Router {
    let guard = service.guard();

    let protected = Router::new()
        .route("/current", get(current))
        .route("/logout", post(logout::<R>))
        .route("/history", get(history::<R>))
        .route("/avatars", patch(update_avatar::<R>))
        .route_layer(from_fn_with_state(
            guard,
            bearer_auth_middleware::<SessionGuard<R>>,
        ));

    Router::new()
        .route("/register", post(register::<R>))
        .route("/verify/{token}", get(verify::<R>))
        .route("/verify", post(resend_verification::<R>))
        .route("/login", post(login::<R>))
        .route("/refresh", post(refresh::<R>))
        .merge(protected)
        .with_state(Arc::new(service))
}

/// Register a new account and send the verification email
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "Account created", body = Registered),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<impl IntoResponse> {
    let registered = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(registered)))
}

/// Confirm an email address with the emailed token
#[utoipa::path(
    get,
    path = "/verify/{token}",
    tag = "Users",
    params(
        ("token" = String, Path, description = "Verification token from the email")
    ),
    responses(
        (status = 200, description = "Verified and signed in", body = Verified),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn verify<R: UserRepository>(
    State(service): State<AuthState<R>>,
    Path(token): Path<String>,
) -> UserResult<Json<Verified>> {
    Ok(Json(service.verify(&token).await?))
}

/// Send the verification email again
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Users",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Email sent", body = Message),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn resend_verification<R: UserRepository>(
    State(service): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<EmailRequest>,
) -> UserResult<Json<Message>> {
    Ok(Json(service.resend_verification(&input.email).await?))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoggedIn),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<LoggedIn>> {
    Ok(Json(service.login(input).await?))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "Users",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = Tokens),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn refresh<R: UserRepository>(
    State(service): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> UserResult<Json<Tokens>> {
    Ok(Json(service.refresh(&input.refresh_token).await?.into()))
}

/// The signed-in user
#[utoipa::path(
    get,
    path = "/current",
    tag = "Users",
    responses(
        (status = 200, description = "Current profile", body = Profile),
        (status = 401, response = UnauthorizedResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn current(Extension(profile): Extension<Profile>) -> Json<Profile> {
    Json(profile)
}

/// End the current session
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Signed out", body = Message),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn logout<R: UserRepository>(
    State(service): State<AuthState<R>>,
    Extension(profile): Extension<Profile>,
) -> UserResult<Json<Message>> {
    Ok(Json(service.logout(&profile.id).await?))
}

/// Orders placed by the signed-in user, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "Users",
    responses(
        (status = 200, description = "`{history}`, or \"No orders in history\"", body = History),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn history<R: UserRepository>(
    State(service): State<AuthState<R>>,
    Extension(profile): Extension<Profile>,
) -> UserResult<Json<History>> {
    Ok(Json(service.history(&profile.id).await?))
}

/// Replace the avatar with an uploaded image (multipart field `avatar`)
#[utoipa::path(
    patch,
    path = "/avatars",
    tag = "Users",
    request_body(content = inline(AvatarForm), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar replaced", body = AvatarUpdated),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_avatar<R: UserRepository>(
    State(service): State<AuthState<R>>,
    Extension(profile): Extension<Profile>,
    mut multipart: Multipart,
) -> UserResult<Json<AvatarUpdated>> {
    let invalid = |e: axum::extract::multipart::MultipartError| UserError::InvalidAvatar(e.body_text());

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() != Some(AVATAR_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(invalid)?;
        let upload = AvatarUpload {
            content_type,
            bytes,
        };
        return Ok(Json(service.update_avatar(&profile.id, upload).await?));
    }

    Err(UserError::InvalidAvatar("\"avatar\" file is required".to_string()))
}
