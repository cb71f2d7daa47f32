use axum::http::StatusCode;
use booking::NewBooking;
use chrono::{NaiveDate, NaiveTime};
use db::BookingStatus;
use primitive_booking::TimeRange;
use primitive_room::PrimitiveRoom;
use serde_json::Value;
use uspot::schemas::booking::{
	BookingResponse,
	CreateBookingRequest,
	UpdateBookingStatusRequest,
};
use uspot::schemas::profile::ProfileResponse;
use uspot::schemas::room::{RoomResponse, UpdateRoomRequest};

mod common;

use crate::common::{
	ADMIN,
	ALICE,
	BOB,
	TestEnv,
	days_ago,
	days_from_now,
};

fn time(s: &str) -> NaiveTime { s.parse().unwrap() }

fn request(
	room_id: i32,
	date: NaiveDate,
	start: &str,
	end: &str,
) -> CreateBookingRequest {
	CreateBookingRequest {
		room_id,
		booking_date: date,
		start_time: time(start),
		end_time: time(end),
		notes: None,
	}
}

async fn book(
	env: &TestEnv,
	room: &RoomResponse,
	date: NaiveDate,
	start: &str,
	end: &str,
) -> (StatusCode, Value) {
	let response = env
		.app
		.post("/bookings")
		.json(&request(room.id, date, start, end))
		.await;

	(response.status_code(), response.json::<Value>())
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let response = env
		.app
		.post("/bookings")
		.json(&CreateBookingRequest {
			notes: Some("group project".to_string()),
			..request(room.id, date, "09:00:00", "10:30:00")
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<BookingResponse>();

	assert_eq!(body.room_id, room.id);
	assert_eq!(body.building_id, room.building_id);
	assert_eq!(body.booking_date, date);
	assert_eq!(body.duration_minutes, 90);
	assert_eq!(body.status, BookingStatus::Confirmed);
	assert_eq!(body.notes.as_deref(), Some("group project"));
	assert_eq!(body.room.map(|r| r.id), Some(room.id));
	assert_eq!(
		body.building.map(|b| b.name).as_deref(),
		Some("Clemons Library")
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_booking_requires_login() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	env.app.post("/auth/logout").await;

	let response = env
		.app
		.post("/bookings")
		.json(&request(room.id, days_from_now(1), "09:00:00", "10:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn overlapping_bookings_conflict() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, _) = book(&env, &room, date, "09:00:00", "10:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	for (start, end) in [
		("09:30:00", "10:30:00"),
		("08:30:00", "09:30:00"),
		("09:15:00", "09:45:00"),
		("08:00:00", "10:00:00"),
		("09:00:00", "10:00:00"),
	] {
		let (status, body) = book(&env, &room, date, start, end).await;

		assert_eq!(status, StatusCode::CONFLICT, "{start} - {end}");
		assert_eq!(body["code"], 15);
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn overlapping_bookings_of_other_profiles_conflict() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, _) = book(&env, &room, date, "13:00:00", "14:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	env.switch_to(BOB).await;

	let (status, _) = book(&env, &room, date, "13:30:00", "14:30:00").await;
	assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test(flavor = "multi_thread")]
async fn back_to_back_bookings_are_allowed() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, _) = book(&env, &room, date, "09:00:00", "10:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, _) = book(&env, &room, date, "10:00:00", "11:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, _) = book(&env, &room, date, "08:00:00", "09:00:00").await;
	assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn same_time_in_other_room_or_date_is_allowed() {
	let env = TestEnv::new().await.login(ALICE).await;

	let clemons = env.room_in("Clemons Library").await;
	let shannon = env.room_in("Shannon Library").await;

	let (status, _) =
		book(&env, &clemons, days_from_now(3), "09:00:00", "10:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, _) =
		book(&env, &shannon, days_from_now(3), "09:00:00", "10:00:00").await;
	assert_eq!(status, StatusCode::CREATED);

	let (status, _) =
		book(&env, &clemons, days_from_now(4), "09:00:00", "10:00:00").await;
	assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_length_is_limited() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, body) = book(&env, &room, date, "09:00:00", "11:30:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], 11);

	let (status, _) = book(&env, &room, date, "09:00:00", "11:00:00").await;

	assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_must_end_after_it_starts() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, body) = book(&env, &room, date, "10:00:00", "09:00:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], 10);

	let (status, _) = book(&env, &room, date, "10:00:00", "10:00:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_in_the_past_is_rejected() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let (status, body) =
		book(&env, &room, days_ago(1), "09:00:00", "10:00:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], 12);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_a_closed_room_is_rejected() {
	let env = TestEnv::new().await.login(ADMIN).await;

	let room = env.room_in("Clemons Library").await;

	env.app
		.patch(&format!("/rooms/{}", room.id))
		.json(&UpdateRoomRequest {
			is_open: Some(false),
			..Default::default()
		})
		.await;

	let (status, body) =
		book(&env, &room, days_from_now(3), "09:00:00", "10:00:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], 13);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_a_missing_room_is_not_found() {
	let env = TestEnv::new().await.login(ALICE).await;

	let response = env
		.app
		.post("/bookings")
		.json(&request(99999, days_from_now(3), "09:00:00", "10:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_must_fit_opening_hours() {
	let env = TestEnv::new().await.login(ALICE).await;

	// Rice Hall is open from 8 AM until 10 PM
	let room = env.room_in("Rice Hall").await;
	let date = days_from_now(3);

	let (status, body) = book(&env, &room, date, "07:00:00", "08:00:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], 14);

	let (status, _) = book(&env, &room, date, "21:30:00", "22:30:00").await;

	assert_eq!(status, StatusCode::BAD_REQUEST);

	let (status, _) = book(&env, &room, date, "08:00:00", "09:00:00").await;

	assert_eq!(status, StatusCode::CREATED);

	let (status, _) = book(&env, &room, date, "21:00:00", "22:00:00").await;

	assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn booking_until_midnight() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (status, body) = book(&env, &room, date, "23:00:00", "00:00:00").await;

	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(body["durationMinutes"], 60);

	let (status, _) = book(&env, &room, date, "23:30:00", "00:00:00").await;

	assert_eq!(status, StatusCode::CONFLICT);

	// The next day starts with a clean slate
	let (status, _) =
		book(&env, &room, days_from_now(4), "00:00:00", "01:00:00").await;

	assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn notes_are_limited_in_length() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let response = env
		.app
		.post("/bookings")
		.json(&CreateBookingRequest {
			notes: Some("a".repeat(501)),
			..request(room.id, days_from_now(3), "09:00:00", "10:00:00")
		})
		.await;

	assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_booking() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let (_, body) =
		book(&env, &room, days_from_now(3), "09:00:00", "10:00:00").await;
	let id = body["id"].as_i64().unwrap();

	let response = env.app.get(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let booking = response.json::<BookingResponse>();

	assert_eq!(booking.room.unwrap().room_name, room.room_name);

	env.switch_to(BOB).await;

	let response = env.app.get(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.switch_to(ADMIN).await;

	let response = env.app.get(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_booking_frees_the_slot() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let date = days_from_now(3);

	let (_, body) = book(&env, &room, date, "09:00:00", "10:00:00").await;
	let id = body["id"].as_i64().unwrap();

	let response = env.app.post(&format!("/bookings/{id}/cancel")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<BookingResponse>().status,
		BookingStatus::Cancelled
	);

	let (status, _) = book(&env, &room, date, "09:00:00", "10:00:00").await;

	assert_eq!(status, StatusCode::CREATED);

	// Cancelled bookings stay cancelled
	let response = env.app.post(&format!("/bookings/{id}/cancel")).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
	assert_eq!(response.json::<Value>()["code"], 16);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_booking_of_other_profile() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let (_, body) =
		book(&env, &room, days_from_now(3), "09:00:00", "10:00:00").await;
	let id = body["id"].as_i64().unwrap();

	env.switch_to(BOB).await;

	let response = env.app.post(&format!("/bookings/{id}/cancel")).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.switch_to(ADMIN).await;

	let response = env.app.post(&format!("/bookings/{id}/cancel")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_booking_status() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let (_, body) =
		book(&env, &room, days_from_now(3), "09:00:00", "10:00:00").await;
	let id = body["id"].as_i64().unwrap();

	let response = env
		.app
		.patch(&format!("/bookings/{id}/status"))
		.json(&UpdateBookingStatusRequest { status: BookingStatus::Completed })
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.switch_to(ADMIN).await;

	let response = env
		.app
		.patch(&format!("/bookings/{id}/status"))
		.json(&UpdateBookingStatusRequest { status: BookingStatus::NoShow })
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<Value>()["status"], "no-show");

	let response = env
		.app
		.patch(&format!("/bookings/{id}/status"))
		.json(&UpdateBookingStatusRequest { status: BookingStatus::Confirmed })
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_booking() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;

	let (_, body) =
		book(&env, &room, days_from_now(3), "09:00:00", "10:00:00").await;
	let id = body["id"].as_i64().unwrap();

	let response = env.app.delete(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	env.switch_to(ADMIN).await;

	let response = env.app.delete(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let response = env.app.delete(&format!("/bookings/{id}")).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_own_bookings_by_scope() {
	let env = TestEnv::new().await.login(ALICE).await;

	let room = env.room_in("Clemons Library").await;
	let profile =
		env.app.get("/profile/me").await.json::<ProfileResponse>();

	let (_, later) =
		book(&env, &room, days_from_now(5), "09:00:00", "10:00:00").await;
	let (_, sooner) =
		book(&env, &room, days_from_now(2), "09:00:00", "10:00:00").await;
	let (_, cancelled) =
		book(&env, &room, days_from_now(2), "12:00:00", "13:00:00").await;

	env.app
		.post(&format!("/bookings/{}/cancel", cancelled["id"]))
		.await;

	// Bookings can not be made in the past through the api
	{
		let pool = env.db_guard.create_pool();
		let conn = pool.get().await.unwrap();

		let room = PrimitiveRoom::get_by_id(room.id, &conn).await.unwrap();
		let range =
			TimeRange::from_times(time("09:00:00"), time("10:00:00")).unwrap();

		NewBooking::new(profile.id, &room, days_ago(3), range, None)
			.insert(&conn)
			.await
			.unwrap();
	}

	// Another profile's bookings never show up
	env.switch_to(BOB).await;
	book(&env, &room, days_from_now(2), "15:00:00", "16:00:00").await;
	env.switch_to(ALICE).await;

	let ids = |scope: &'static str| {
		let request = env.app.get("/profile/me/bookings");

		async move {
			request
				.add_query_param("scope", scope)
				.await
				.json::<Vec<BookingResponse>>()
				.into_iter()
				.map(|b| (b.id, b.booking_date))
				.collect::<Vec<_>>()
		}
	};

	let upcoming = ids("upcoming").await;

	assert_eq!(
		upcoming.iter().map(|(id, _)| i64::from(*id)).collect::<Vec<_>>(),
		vec![sooner["id"].as_i64().unwrap(), later["id"].as_i64().unwrap()]
	);

	let past = ids("past").await;

	assert_eq!(past.len(), 1);
	assert_eq!(past[0].1, days_ago(3));

	let all = ids("all").await;

	assert_eq!(all.len(), 4);
	assert!(all.windows(2).all(|w| w[0].1 <= w[1].1));
}
