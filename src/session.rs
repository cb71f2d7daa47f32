//! User sessions and tokens

use axum::RequestPartsExt;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use common::{Error, InternalServerError, RedisConn};
use primitive_profile::PrimitiveProfile;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use crate::AppState;

const SESSION_KEY_PREFIX: &str = "session";

/// The id of the session a request was authorized with, stored as a request
/// extension by the [`AuthLayer`](crate::middleware::AuthLayer)
#[derive(Clone, Debug)]
pub(crate) struct SessionId(pub(crate) String);

/// A session for any logged in user
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.profile_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub id:   String,
	pub data: SessionData,
}

/// A session for any admin user
#[derive(Clone, Debug)]
pub struct AdminSession {
	pub id:   String,
	pub data: SessionData,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub profile_id:       i32,
	pub profile_is_admin: bool,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(SessionId(session_id)) =
			parts.extensions.get::<SessionId>().cloned()
		else {
			return Err(InternalServerError::SessionWithoutAuthError.into());
		};

		let State(mut conn) = parts
			.extract_with_state::<State<RedisConn>, AppState>(state)
			.await
			.map_err(|_| Error::InternalServerError)?;

		let session = Self::get(&session_id, &mut conn).await?;

		let Some(session) = session else {
			return Err(Error::Infallible(
				"failed to retrieve session despite passing auth middleware"
					.to_string(),
			));
		};

		Ok(session)
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		if !session.data.profile_is_admin {
			warn!(
				"profile {} attempted to use an admin route",
				session.data.profile_id
			);

			return Err(Error::Forbidden);
		}

		Ok(Self { id: session.id, data: session.data })
	}
}

impl Session {
	fn key(id: &str) -> String { format!("{SESSION_KEY_PREFIX}:{id}") }

	/// Create and store a new [`Session`] for a given profile
	#[instrument(skip(conn))]
	pub async fn create(
		lifetime: Duration,
		profile: &PrimitiveProfile,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let id = Uuid::new_v4().to_string();

		let data = SessionData {
			profile_id:       profile.id,
			profile_is_admin: profile.is_admin,
		};

		// Add a buffer of 10 seconds to ensure the cached session doesn't
		// expire before the session cookie does
		let expiry = lifetime.whole_seconds() + 10;

		let value = serde_json::to_string(&data)?;

		let _: () = conn
			.set_ex(Self::key(&id), &value, expiry.unsigned_abs())
			.await?;

		debug!("stored session {id} in cache for profile {}", profile.id);

		Ok(Self { id, data })
	}

	/// Get a session from the cache
	#[instrument(skip(conn))]
	pub async fn get(
		id: &str,
		conn: &mut RedisConn,
	) -> Result<Option<Self>, Error> {
		let value: Option<String> = conn.get(Self::key(id)).await?;

		let Some(value) = value else {
			return Ok(None);
		};

		let data: SessionData = serde_json::from_str(&value)?;

		Ok(Some(Self { id: id.to_string(), data }))
	}

	/// Remove a session given its id
	#[instrument(skip(conn))]
	pub async fn delete(id: &str, conn: &mut RedisConn) -> Result<(), Error> {
		let _: i32 = conn.del(Self::key(id)).await?;

		Ok(())
	}

	/// Check if a session with this id exists
	#[instrument(skip(conn))]
	pub async fn exists(id: &str, conn: &mut RedisConn) -> Result<bool, Error> {
		let exists: bool = conn.exists(Self::key(id)).await?;

		Ok(exists)
	}

	/// Convert this [`Session`] into an access token cookie
	#[must_use]
	pub fn to_access_token_cookie(
		&self,
		name: String,
		lifetime: Duration,
		secure: bool,
	) -> Cookie<'static> {
		Cookie::build((name, self.id.clone()))
			.http_only(true)
			.max_age(lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(secure)
			.into()
	}
}
