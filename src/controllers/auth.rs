//! Controllers for authorization

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use common::{DbPool, Error, RedisConn};
use profile::{NewProfile, Profile};
use validator::Validate;

use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::schemas::profile::ProfileResponse;
use crate::{Config, Session};

#[instrument(skip_all)]
pub(crate) async fn register_profile(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(register_data): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	register_data.validate()?;

	let insertable_profile = NewProfile {
		username: register_data.username,
		email:    register_data.email,
		password: register_data.password,
		is_admin: false,
	};

	let conn = pool.get().await?;
	let new_profile = insertable_profile.insert(&conn).await?;

	let session = Session::create(
		config.access_token_lifetime,
		&new_profile.profile,
		&mut r_conn,
	)
	.await?;

	let access_token_cookie = session.to_access_token_cookie(
		config.access_token_name,
		config.access_token_lifetime,
		config.production,
	);

	let jar = jar.add(access_token_cookie);

	let profile = new_profile.update_last_login(&conn).await?;

	info!(
		"registered new profile id: {} username: {}",
		profile.profile.id, profile.profile.username
	);

	let response = ProfileResponse::from(profile);

	Ok((StatusCode::CREATED, jar, Json(response)))
}

#[instrument(skip_all)]
pub(crate) async fn login_profile(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(login_data): Json<LoginRequest>,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	let conn = pool.get().await?;
	let profile = Profile::get_by_email(login_data.email, &conn).await?;

	let password_hash = PasswordHash::new(&profile.profile.password_hash)?;

	Argon2::default()
		.verify_password(login_data.password.as_bytes(), &password_hash)?;

	let session = Session::create(
		config.access_token_lifetime,
		&profile.profile,
		&mut r_conn,
	)
	.await?;

	let access_token_cookie = session.to_access_token_cookie(
		config.access_token_name,
		config.access_token_lifetime,
		config.production,
	);

	let jar = jar.add(access_token_cookie);

	let profile = profile.update_last_login(&conn).await?;

	info!("logged in profile {}", profile.profile.id);

	Ok((jar, NoContent))
}

#[instrument(skip(r_conn, config, jar))]
pub(crate) async fn logout_profile(
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	session: Session,
) -> Result<(PrivateCookieJar, NoContent), Error> {
	Session::delete(&session.id, &mut r_conn).await?;

	let access_token = Cookie::build(config.access_token_name).path("/");

	let jar = jar.remove(access_token);

	info!("logged out profile {}", session.data.profile_id);

	Ok((jar, NoContent))
}
