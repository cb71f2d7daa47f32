#[macro_use]
extern crate tracing;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHasher};
use chrono::Utc;
use common::{DbConn, Error, LoginError};
use db::profile;
use diesel::prelude::*;
use primitive_profile::PrimitiveProfile;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Profile {
	pub profile: PrimitiveProfile,
}

impl Profile {
	/// Get a [`Profile`] given its id
	#[instrument(skip(conn))]
	pub async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.find(query_id)
					.select(PrimitiveProfile::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(Self { profile })
	}

	/// Get a [`Profile`] given its email
	#[instrument(skip(conn))]
	pub async fn get_by_email(
		query_email: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let search = query_email.clone();

		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.filter(email.eq(search))
					.select(PrimitiveProfile::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		match profile {
			Some(profile) => Ok(Self { profile }),
			None => Err(LoginError::UnknownEmail(query_email).into()),
		}
	}

	/// Hash a password using Argon2
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hashed_password = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hashed_password)
	}

	/// Set the `last_login_at` field to the current datetime for the given
	/// [`Profile`]
	#[instrument(skip(conn))]
	pub async fn update_last_login(self, conn: &DbConn) -> Result<Self, Error> {
		let self_id = self.profile.id;
		let now = Utc::now().naive_utc();

		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				diesel::update(profile.find(self_id))
					.set(last_login_at.eq(now))
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(Self { profile })
	}
}

#[derive(Clone, Deserialize, Serialize)]
pub struct NewProfile {
	pub username: String,
	pub email:    String,
	pub password: String,
	#[serde(default)]
	pub is_admin: bool,
}

impl std::fmt::Debug for NewProfile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NewProfile")
			.field("username", &self.username)
			.field("email", &self.email)
			.field("is_admin", &self.is_admin)
			.finish_non_exhaustive()
	}
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = profile)]
struct NewProfileHashed {
	username:      String,
	email:         String,
	password_hash: String,
	is_admin:      bool,
}

impl NewProfile {
	/// Insert this [`NewProfile`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Profile, Error> {
		let hash = Profile::hash_password(&self.password)?;

		let insertable = NewProfileHashed {
			username:      self.username,
			email:         self.email,
			password_hash: hash,
			is_admin:      self.is_admin,
		};

		let profile = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				diesel::insert_into(profile)
					.values(insertable)
					.returning(PrimitiveProfile::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created profile {} with id {}", profile.username, profile.id);

		Ok(Profile { profile })
	}
}
