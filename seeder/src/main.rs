mod matching;
mod util;

use std::collections::HashMap;
use std::env;

use chrono::{Days, Local, NaiveDate};
use clap::{Error, Parser, Subcommand};
use common::DbConn;
use deadpool_diesel::postgres::{Manager, Pool};
use diesel::RunQueryDsl;
use event::NewEvent;
use fake::Fake;
use fake::faker::company::raw::{CatchPhrase, CompanyName};
use fake::faker::lorem::raw::{Paragraph, Sentence};
use fake::locales::EN;
use primitive_building::PrimitiveBuilding;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use room::Room;
use serde::Deserialize;
use uspot::SeedBuilding;

use crate::matching::match_building;
use crate::util::{batch_insert, io_error, read_records};

const EVENT_CATEGORIES: &[&str] =
	&["Social", "Academic", "Sports", "Entertainment", "Arts", "Other"];

#[derive(Parser, Debug)]
struct Opt {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Load buildings and their rooms from a JSON file
	Buildings { file: String },
	/// Load scraped events from a JSON file, placing each one in the
	/// building its location refers to
	Events { file: String },
	/// Generate fake events spread over the existing buildings
	FakeEvents {
		#[arg(default_value_t = 100)]
		count: usize,
	},
}

/// An event as produced by the event scraper
#[derive(Debug, Deserialize)]
struct ScrapedEvent {
	title:                    Option<String>,
	description:              Option<String>,
	date:                     Option<NaiveDate>,
	time_24h:                 Option<String>,
	category:                 Option<String>,
	location_name:            Option<String>,
	room:                     Option<String>,
	organization_name:        Option<String>,
	organization_description: Option<String>,
	#[serde(default)]
	links:                    Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
	let cli = Opt::parse();
	let conn = get_conn().await;

	match cli.command {
		Command::Buildings { file } => {
			println!("Seeding buildings from {file}…");
			let inserted = seed_buildings(&conn, &file).await?;
			println!("Inserted {inserted} buildings");
		},
		Command::Events { file } => {
			println!("Seeding events from {file}…");
			let inserted = seed_events(&conn, &file).await?;
			println!("Inserted {inserted} events");
		},
		Command::FakeEvents { count } => {
			println!("Seeding {count} fake events…");
			let inserted = seed_fake_events(&conn, count).await?;
			println!("Inserted {inserted} events");
		},
	}

	Ok(())
}

/// Get a database connection from the pool
async fn get_conn() -> DbConn {
	let database_url = env::var("DATABASE_URL").expect("DATABASE_URL missing");

	let manager = Manager::new(database_url, deadpool_diesel::Runtime::Tokio1);
	let pool = Pool::builder(manager).build().expect("Failed to create pool");

	pool.get().await.expect("Failed to get a database connection")
}

/// Seed buildings along with their rooms
async fn seed_buildings(conn: &DbConn, file: &str) -> Result<usize, Error> {
	let buildings: Vec<SeedBuilding> = read_records(file)?;
	let count = buildings.len();

	for building in buildings {
		building.insert(conn).await.map_err(io_error)?;
	}

	Ok(count)
}

/// Load all buildings and the names of their rooms
async fn load_buildings(
	conn: &DbConn,
) -> Result<(Vec<PrimitiveBuilding>, HashMap<i32, Vec<String>>), Error> {
	let buildings = PrimitiveBuilding::get_all(conn).await.map_err(io_error)?;

	if buildings.is_empty() {
		return Err(io_error("No buildings exist, seed buildings first"));
	}

	let ids = buildings.iter().map(|b| b.id).collect();
	let rooms = Room::for_buildings(ids, conn).await.map_err(io_error)?;

	let mut rooms_by_building: HashMap<i32, Vec<String>> = HashMap::new();

	for room in rooms {
		rooms_by_building
			.entry(room.building_id)
			.or_default()
			.push(room.room_name);
	}

	Ok((buildings, rooms_by_building))
}

/// Seed scraped events, matching their locations to known buildings
async fn seed_events(conn: &DbConn, file: &str) -> Result<usize, Error> {
	let scraped: Vec<ScrapedEvent> = read_records(file)?;
	let (buildings, rooms) = load_buildings(conn).await?;

	let mut rng = rng();
	let mut matched = 0;
	let mut skipped = 0;

	let mut events = Vec::with_capacity(scraped.len());

	for scraped in scraped {
		let (Some(title), Some(event_date)) = (scraped.title, scraped.date)
		else {
			skipped += 1;
			continue;
		};

		let location = scraped.location_name.unwrap_or_default();

		let building = match match_building(&location, &buildings) {
			Some(b) => {
				matched += 1;
				b
			},
			None => {
				buildings.choose(&mut rng).ok_or_else(|| {
					io_error("No buildings to place events in")
				})?
			},
		};

		let room = rooms
			.get(&building.id)
			.and_then(|r| r.choose(&mut rng))
			.cloned()
			.or(scraped.room)
			.unwrap_or_else(|| format!("Room {}", rng.random_range(100..400)));

		let (instagram_link, website_link, doorlist_link) =
			sort_links(scraped.links);

		events.push(NewEvent {
			title,
			description: scraped.description.unwrap_or_default(),
			location_name: building.name.clone(),
			room: Some(room),
			latitude: building.latitude,
			longitude: building.longitude,
			event_date,
			event_time: scraped.time_24h.unwrap_or_else(|| "12:00:00".into()),
			category: scraped.category.unwrap_or_else(|| "Other".into()),
			organization_name: scraped.organization_name,
			organization_description: scraped.organization_description,
			organization_logo: None,
			instagram_link,
			website_link,
			doorlist_link,
			image_url: None,
			created_by: None,
		});
	}

	println!(
		"Matched {matched} of {} events to a building, skipped {skipped}",
		events.len() + skipped
	);

	insert_events(conn, events).await
}

/// Split a list of links into an instagram, website and doorlist link
fn sort_links(
	links: Vec<String>,
) -> (Option<String>, Option<String>, Option<String>) {
	let mut instagram = None;
	let mut website = None;
	let mut doorlist = None;

	for link in links {
		let lower = link.to_lowercase();

		if lower.contains("instagram.com") {
			instagram.get_or_insert(link);
		} else if lower.contains("doorlist") || lower.contains("eventbrite") {
			doorlist.get_or_insert(link);
		} else {
			website.get_or_insert(link);
		}
	}

	(instagram, website, doorlist)
}

/// Seed randomly generated events over the existing buildings
async fn seed_fake_events(conn: &DbConn, count: usize) -> Result<usize, Error> {
	let (buildings, rooms) = load_buildings(conn).await?;
	let today = Local::now().date_naive();

	let mut rng = rng();
	let mut events = Vec::with_capacity(count);

	for _ in 0..count {
		let building = buildings
			.choose(&mut rng)
			.ok_or_else(|| io_error("No buildings to place events in"))?;

		let room = rooms
			.get(&building.id)
			.and_then(|r| r.choose(&mut rng))
			.cloned();

		let offset = rng.random_range(0..30);
		let event_date = today
			.checked_add_days(Days::new(offset))
			.unwrap_or(today);

		let hour: u32 = rng.random_range(8..22);
		let minute = if rng.random_bool(0.5) { 0 } else { 30 };

		let category = EVENT_CATEGORIES
			.choose(&mut rng)
			.copied()
			.unwrap_or("Other");

		events.push(NewEvent {
			title: CatchPhrase(EN).fake(),
			description: Paragraph(EN, 1..3).fake(),
			location_name: building.name.clone(),
			room,
			latitude: building.latitude,
			longitude: building.longitude,
			event_date,
			event_time: format!("{hour:02}:{minute:02}:00"),
			category: category.to_string(),
			organization_name: Some(CompanyName(EN).fake()),
			organization_description: Some(Sentence(EN, 4..10).fake()),
			organization_logo: None,
			instagram_link: None,
			website_link: None,
			doorlist_link: None,
			image_url: None,
			created_by: None,
		});
	}

	insert_events(conn, events).await
}

async fn insert_events(
	conn: &DbConn,
	events: Vec<NewEvent>,
) -> Result<usize, Error> {
	batch_insert(conn, events, 1 << 10, |conn, chunk| {
		use db::event::dsl::*;

		diesel::insert_into(event).values(chunk).execute(conn)
	})
	.await
}
