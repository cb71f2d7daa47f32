use std::path::PathBuf;

use building::NewBuilding;
use common::{DbConn, Error};
use profile::NewProfile;
use room::NewRoom;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub struct Seeder<'c> {
	connection: &'c DbConn,
}

impl<'c> Seeder<'c> {
	#[must_use]
	pub fn new(connection: &'c DbConn) -> Self { Self { connection } }

	/// Read a file into a series of deserializable items
	///
	/// # Panics
	/// Panics if reading or deserializing the file fails
	fn read_file_records<T, I>(filename: &str) -> I
	where
		T: DeserializeOwned,
		I: IntoIterator<Item = T> + DeserializeOwned,
	{
		let path = std::env::var("CARGO_MANIFEST_DIR")
			.map(PathBuf::from)
			.unwrap_or_default()
			.join(filename);

		let s = std::fs::read_to_string(path)
			.unwrap_or_else(|_| panic!("COULD NOT READ SEED FILE {filename}"));

		serde_json::from_str(&s)
			.unwrap_or_else(|_| panic!("COULD NOT MAP SEED FILE {filename}"))
	}

	/// Load a file and populate the database with it
	///
	/// # Panics
	/// Panics if reading the file or interacting with the database fails
	pub async fn populate<'s, T, F>(
		&'s self,
		filename: &str,
		loader: F,
	) -> &'s Self
	where
		T: DeserializeOwned + std::fmt::Debug,
		F: AsyncFnOnce(&DbConn, Vec<T>) -> Result<(), Error>,
	{
		let records = Self::read_file_records(filename);

		loader(self.connection, records).await.unwrap_or_else(|e| {
			panic!("COULD NOT LOAD RECORDS FOR {filename} -- {e:?}")
		});

		info!("seeded database from {filename}");

		self
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedProfile {
	pub username: String,
	pub password: String,
	pub email:    String,
	#[serde(default)]
	pub admin:    bool,
}

impl SeedProfile {
	/// Insert this [`SeedProfile`]
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let profile = NewProfile {
			username: self.username,
			email:    self.email,
			password: self.password,
			is_admin: self.admin,
		};

		profile.insert(conn).await?;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct SeedRoom {
	pub room_name: String,
	pub capacity:  i32,
	pub floor:     String,
	#[serde(default = "default_available")]
	pub available: bool,
}

const fn default_available() -> bool { true }

#[derive(Clone, Debug, Deserialize)]
pub struct SeedBuilding {
	pub name:      String,
	pub category:  String,
	pub sub_area:  String,
	pub latitude:  f64,
	pub longitude: f64,
	pub hours:     String,
	#[serde(default)]
	pub rooms:     Vec<SeedRoom>,
}

impl SeedBuilding {
	/// Insert this [`SeedBuilding`] along with its rooms
	pub async fn insert(self, conn: &DbConn) -> Result<(), Error> {
		let building = NewBuilding {
			name:      self.name,
			category:  self.category,
			sub_area:  self.sub_area,
			latitude:  self.latitude,
			longitude: self.longitude,
			hours:     self.hours,
		}
		.insert(conn)
		.await?;

		if self.rooms.is_empty() {
			return Ok(());
		}

		let rooms = self
			.rooms
			.into_iter()
			.map(|r| {
				NewRoom {
					building_id: building.id,
					room_name:   r.room_name,
					capacity:    r.capacity,
					floor:       r.floor,
					available:   r.available,
				}
			})
			.collect();

		NewRoom::bulk_insert(rooms, conn).await?;

		Ok(())
	}
}
