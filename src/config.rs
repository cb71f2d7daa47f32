use axum_extra::extract::cookie::Key;
use common::{DbPool, RedisConn};
use deadpool_diesel::postgres::{Manager, Pool};
use models_common::MAX_BOOKING_LENGTH_MINUTES;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub redis_url:    String,
	pub production:   bool,
	pub bind_address: String,

	pub access_token_name:     String,
	pub access_token_lifetime: time::Duration,

	pub cookie_jar_key_file: Option<String>,

	pub max_booking_length: i64,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_var_or(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if a required environment variable is missing or a numeric
	/// variable can not be parsed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");

		let production = Self::get_env_var_or("PRODUCTION", "false")
			.parse::<bool>()
			.unwrap_or_else(|_| panic!("PRODUCTION must be true or false"));

		let bind_address = Self::get_env_var_or("BIND_ADDRESS", "0.0.0.0:80");

		let access_token_name = Self::get_env_var("ACCESS_TOKEN_NAME");
		let access_token_lifetime = time::Duration::minutes(
			Self::get_env_var("ACCESS_TOKEN_LIFETIME_MINUTES")
				.parse::<i64>()
				.unwrap_or_else(|_| {
					panic!("ACCESS_TOKEN_LIFETIME_MINUTES must be a number")
				}),
		);

		let cookie_jar_key_file = std::env::var("COOKIE_JAR_KEY_FILE").ok();

		let max_booking_length = Self::get_env_var_or(
			"MAX_BOOKING_LENGTH_MINUTES",
			&MAX_BOOKING_LENGTH_MINUTES.to_string(),
		)
		.parse::<i64>()
		.unwrap_or_else(|_| {
			panic!("MAX_BOOKING_LENGTH_MINUTES must be a number")
		});

		Self {
			database_url,
			redis_url,
			production,
			bind_address,
			access_token_name,
			access_token_lifetime,
			cookie_jar_key_file,
			max_booking_length,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().expect("COULD NOT CREATE DATABASE POOL")
	}

	/// Create a redis connection for the given config
	///
	/// # Panics
	/// Panics if connecting to redis fails
	pub async fn create_redis_connection(&self) -> RedisConn {
		let client = redis::Client::open(self.redis_url.as_str())
			.expect("COULD NOT CREATE REDIS CLIENT");

		client
			.get_multiplexed_async_connection()
			.await
			.expect("COULD NOT CONNECT TO REDIS")
	}

	/// Load the key used to encrypt private cookies
	///
	/// Outside of production a missing key file falls back to a freshly
	/// generated key, which invalidates all sessions on restart
	///
	/// # Panics
	/// Panics if the key file can not be read, or no key file was configured
	/// in production
	#[must_use]
	pub fn load_cookie_jar_key(&self) -> Key {
		match &self.cookie_jar_key_file {
			Some(path) => {
				Key::from(
					&std::fs::read(path).expect("COULD NOT READ COOKIE JAR KEY"),
				)
			},
			None if self.production => {
				panic!("COOKIE_JAR_KEY_FILE must be set in production")
			},
			None => {
				warn!("no cookie jar key file configured, generating one");

				Key::generate()
			},
		}
	}
}
