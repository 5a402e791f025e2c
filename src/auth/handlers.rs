use axum::{
    extract::{FromRef, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{present, PublicUser, SigninForm, SignupForm},
        repo_types::User,
        services::{authenticate, create_user},
        session::{removal_cookie, CurrentUser, SessionKeys},
    },
    error::AppError,
    flash,
    state::AppState,
};

const MISSING_FIELDS: &str = "All fields are required.";
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/signout", post(signout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, jar, form))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let (Some(name), Some(email), Some(password)) = (
        present(&form.name),
        present(&form.email),
        present(&form.password),
    ) else {
        warn!("signup with missing fields");
        return Ok((flash::set(jar, MISSING_FIELDS), Redirect::to("/")));
    };

    let message = match create_user(&state.db, name, email, password).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "user registered");
            "Account created! Please sign in.".to_string()
        }
        Err(AppError::DuplicateEmail) => {
            warn!(email = %email, "email already registered");
            "Email already registered.".to_string()
        }
        Err(e) => return Err(e),
    };

    Ok((flash::set(jar, message), Redirect::to("/")))
}

#[instrument(skip(state, jar, form))]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SigninForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let (Some(email), Some(password)) = (present(&form.email), present(&form.password)) else {
        warn!("signin with missing fields");
        return Ok((flash::set(jar, MISSING_FIELDS), Redirect::to("/")));
    };

    let user = match authenticate(&state.db, email, password).await {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            warn!(email = %email, "signin rejected");
            return Ok((flash::set(jar, INVALID_CREDENTIALS), Redirect::to("/")));
        }
        Err(e) => return Err(e),
    };

    let keys = SessionKeys::from_ref(&state);
    let jar = jar.add(keys.cookie(user.id)?);

    info!(user_id = %user.id, email = %user.email, "user signed in");
    Ok((
        flash::set(jar, format!("Welcome back, {}!", user.name)),
        Redirect::to("/"),
    ))
}

#[instrument(skip(jar))]
pub async fn signout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(removal_cookie());
    (flash::set(jar, "You have been signed out."), Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "session names unknown user");
            AppError::Unauthorized
        })?;

    Ok(Json(PublicUser {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    /// `name=value` pairs from every Set-Cookie header.
    fn set_cookies(res: &Response<Body>) -> Vec<String> {
        res.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::to_owned)
            .collect()
    }

    fn cookie_value(res: &Response<Body>, name: &str) -> Option<String> {
        set_cookies(res)
            .into_iter()
            .find_map(|c| c.strip_prefix(&format!("{name}=")).map(str::to_owned))
    }

    async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
        app.clone().oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn signup_and_signin_flow() {
        let app = build_app(AppState::for_tests().await);

        let res = send(&app, form("/signup", "name=Ada&email=ada%40example.com&password=pw")).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/");
        let flash = cookie_value(&res, "flash").expect("flash cookie");
        assert!(flash.contains("Account"), "unexpected flash {flash}");

        let res = send(&app, form("/signin", "email=ada%40example.com&password=pw")).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let session = cookie_value(&res, "session").expect("session cookie");
        assert!(!session.is_empty());

        let res = send(
            &app,
            Request::builder()
                .uri("/me")
                .header(header::COOKIE, format!("session={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn duplicate_signup_is_a_flash_not_a_failure() {
        let app = build_app(AppState::for_tests().await);
        let body = "name=Ada&email=ada%40example.com&password=pw";

        let first = send(&app, form("/signup", body)).await;
        assert_eq!(first.status(), StatusCode::SEE_OTHER);

        let second = send(&app, form("/signup", body)).await;
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        let flash = cookie_value(&second, "flash").expect("flash cookie");
        assert!(flash.contains("already"), "unexpected flash {flash}");
    }

    #[tokio::test]
    async fn signup_requires_every_field() {
        let app = build_app(AppState::for_tests().await);
        let res = send(&app, form("/signup", "name=Ada&email=&password=pw")).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let flash = cookie_value(&res, "flash").expect("flash cookie");
        assert!(flash.contains("required"), "unexpected flash {flash}");
    }

    #[tokio::test]
    async fn signin_failure_is_generic_and_sets_no_session() {
        let app = build_app(AppState::for_tests().await);
        send(&app, form("/signup", "name=Ada&email=ada%40example.com&password=pw")).await;

        let wrong_password = send(&app, form("/signin", "email=ada%40example.com&password=nope")).await;
        let unknown_email = send(&app, form("/signin", "email=bob%40example.com&password=pw")).await;

        for res in [&wrong_password, &unknown_email] {
            assert_eq!(res.status(), StatusCode::SEE_OTHER);
            assert!(cookie_value(res, "session").is_none());
        }
        assert_eq!(
            cookie_value(&wrong_password, "flash"),
            cookie_value(&unknown_email, "flash")
        );
        let flash = cookie_value(&wrong_password, "flash").expect("flash cookie");
        assert!(flash.contains("Invalid"), "unexpected flash {flash}");
    }

    #[tokio::test]
    async fn me_requires_a_session() {
        let app = build_app(AppState::for_tests().await);
        let res = send(&app, Request::builder().uri("/me").body(Body::empty()).unwrap()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn signout_clears_the_session_cookie() {
        let app = build_app(AppState::for_tests().await);
        let res = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/signout")
                .header(header::COOKIE, "session=whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(cookie_value(&res, "session").as_deref(), Some(""));
    }
}
