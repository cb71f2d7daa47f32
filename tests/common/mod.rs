use axum::http::StatusCode;
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use chrono::{Days, Local, NaiveDate};
use mock_redis::{RedisUrlGuard, RedisUrlProvider};
use uspot::schemas::auth::LoginRequest;
use uspot::schemas::building::BuildingResponse;
use uspot::schemas::room::RoomResponse;
use uspot::{AppState, Config, SeedBuilding, SeedProfile, Seeder, routes};

mod mock_db;
mod mock_redis;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

/// Seeded profiles, as `(email, password)`
#[allow(dead_code)]
pub const ADMIN: (&str, &str) = ("admin@uspot.app", "admin-password");
#[allow(dead_code)]
pub const ALICE: (&str, &str) = ("alice@virginia.edu", "alice-password");
#[allow(dead_code)]
pub const BOB: (&str, &str) = ("bob@virginia.edu", "bob-password");

#[allow(dead_code)]
pub struct TestEnv {
	pub app:         TestServer,
	pub db_guard:    DatabaseGuard,
	pub redis_guard: RedisUrlGuard,
}

impl TestEnv {
	/// Get a test environment with mocked resources for running tests
	///
	/// # Panics
	/// Panics if building a test server fails
	pub async fn new() -> Self {
		let config = Config::from_env();

		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool();

		{
			let conn = test_pool.get().await.unwrap();
			let seeder = Seeder::new(&conn);

			seeder
				.populate("seed/profiles.json", async |conn, profiles| {
					for profile in profiles {
						SeedProfile::insert(profile, conn).await?;
					}

					Ok(())
				})
				.await
				.populate("seed/buildings.json", async |conn, buildings| {
					for building in buildings {
						SeedBuilding::insert(building, conn).await?;
					}

					Ok(())
				})
				.await;
		}

		let redis_url_guard = RedisUrlProvider::acquire();
		let redis_connection = redis_url_guard.connect().await;

		let cookie_jar_key = Key::from(&[0u8; 64]);

		let state = AppState {
			config,
			database_pool: test_pool.clone(),
			redis_connection,
			cookie_jar_key,
		};
		let app = routes::get_app_router(state);

		let test_server =
			TestServer::builder().save_cookies().build(app).unwrap();

		TestEnv {
			app:         test_server,
			db_guard:    test_pool_guard,
			redis_guard: redis_url_guard,
		}
	}

	/// Log in as one of the seeded profiles, replacing any earlier session
	///
	/// # Panics
	/// Panics if logging in fails
	#[allow(dead_code)]
	pub async fn login(self, (email, password): (&str, &str)) -> Self {
		let response = self
			.app
			.post("/auth/login")
			.json(&LoginRequest {
				email:    email.to_string(),
				password: password.to_string(),
			})
			.await;

		assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

		self
	}

	/// Switch the session of this environment to another seeded profile
	#[allow(dead_code)]
	pub async fn switch_to(&self, (email, password): (&str, &str)) {
		let response = self
			.app
			.post("/auth/login")
			.json(&LoginRequest {
				email:    email.to_string(),
				password: password.to_string(),
			})
			.await;

		assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
	}

	/// Look up a seeded building by its name
	///
	/// # Panics
	/// Panics if no building with that name exists
	#[allow(dead_code)]
	pub async fn building(&self, name: &str) -> BuildingResponse {
		self.app
			.get("/buildings")
			.await
			.json::<Vec<BuildingResponse>>()
			.into_iter()
			.find(|b| b.name == name)
			.unwrap_or_else(|| panic!("no seeded building named {name}"))
	}

	/// Get the first room of a seeded building
	///
	/// # Panics
	/// Panics if the building does not exist or has no rooms
	#[allow(dead_code)]
	pub async fn room_in(&self, building: &str) -> RoomResponse {
		let building = self.building(building).await;

		self.app
			.get(&format!("/buildings/{}/rooms", building.id))
			.await
			.json::<Vec<RoomResponse>>()
			.into_iter()
			.next()
			.unwrap_or_else(|| panic!("{} has no rooms", building.name))
	}
}

/// A date a number of days from now
#[allow(dead_code)]
pub fn days_from_now(days: u64) -> NaiveDate {
	Local::now().date_naive().checked_add_days(Days::new(days)).unwrap()
}

/// A date a number of days ago
#[allow(dead_code)]
pub fn days_ago(days: u64) -> NaiveDate {
	Local::now().date_naive().checked_sub_days(Days::new(days)).unwrap()
}
