//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Name of the exclusion constraint that keeps confirmed bookings of a room
/// from overlapping
pub const BOOKING_OVERLAP_CONSTRAINT: &str = "booking_no_overlap";

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Invalid pagination options
	#[error(transparent)]
	PaginationError(#[from] PaginationError),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Any error related to creating or changing a booking
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// Codes only ever increase, a code is never reused once it has been
	/// assigned
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::NotFound(_) => 5,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownEmail(_) => 6,
					LoginError::InvalidPassword => 7,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 8,
					TokenError::MissingSession => 9,
				}
			},
			Self::BookingError(e) => {
				match e {
					BookingError::InvalidTimeRange { .. } => 10,
					BookingError::TooLong(_) => 11,
					BookingError::InPast(_) => 12,
					BookingError::RoomClosed(_) => 13,
					BookingError::OutsideHours { .. } => 14,
					BookingError::Conflict => 15,
					BookingError::InvalidTransition { .. } => 16,
				}
			},
			Self::ValidationError(_) => 17,
			Self::PaginationError(e) => {
				match e {
					PaginationError::OffsetTooLarge => 18,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownEmail(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::InvalidTimeRange { start, end } => {
						Some(
							serde_json::json!({"start": start, "end": end})
								.to_string(),
						)
					},
					BookingError::TooLong(max) => {
						Some(serde_json::json!({"max": max}).to_string())
					},
					BookingError::InPast(date) => {
						Some(serde_json::json!({"date": date}).to_string())
					},
					BookingError::RoomClosed(room) => {
						Some(serde_json::json!({"room": room}).to_string())
					},
					BookingError::OutsideHours { open, close } => {
						Some(
							serde_json::json!({"open": open, "close": close})
								.to_string(),
						)
					},
					BookingError::InvalidTransition { from, to } => {
						Some(
							serde_json::json!({"from": from, "to": to})
								.to_string(),
						)
					},
					BookingError::Conflict => None,
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) | Self::BookingError(BookingError::Conflict) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::BookingError(_) | Self::PaginationError(_) => {
				StatusCode::BAD_REQUEST
			},
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no profile with email '{0}' was found")]
	UnknownEmail(String),
	#[error("invalid password")]
	InvalidPassword,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing or invalid access token")]
	MissingAccessToken,
	#[error("missing session")]
	MissingSession,
}

/// Any error related to creating or changing a booking
#[derive(Debug, Error)]
pub enum BookingError {
	/// The end of the booking does not come after its start
	#[error("the booking must end after it starts")]
	InvalidTimeRange { start: NaiveTime, end: NaiveTime },
	/// The booking is longer than the maximum booking length in minutes
	#[error("the booked amount of time was too long")]
	TooLong(i64),
	/// The booking date lies before today
	#[error("bookings can not be made in the past")]
	InPast(NaiveDate),
	/// The room is not open for bookings
	#[error("this room is closed")]
	RoomClosed(i32),
	/// The booking does not fit inside the building's operating hours
	#[error("the booking falls outside the building's opening hours")]
	OutsideHours { open: String, close: String },
	/// Another confirmed booking already covers part of the requested time
	#[error("this room is already booked for part of that time")]
	Conflict,
	/// The booking can not move from its current status to the requested one
	#[error("invalid booking status transition")]
	InvalidTransition { from: String, to: String },
}

#[derive(Debug, Error)]
pub enum PaginationError {
	#[error("the offset is too large for the amount of data")]
	OffsetTooLarge,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of unique constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("profile_username_key", "username"),
			("profile_email_key", "email"),
			("building_name_key", "name"),
			("room_building_id_room_name_key", "room name"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// A concurrent booking won the race for the same slot
			diesel::result::Error::DatabaseError(_, info)
				if info.constraint_name() == Some(BOOKING_OVERLAP_CONSTRAINT) =>
			{
				BookingError::Conflict.into()
			},
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::SerializationFailure,
				_,
			) => BookingError::Conflict.into(),
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let field = info
					.constraint_name()
					.and_then(|name| CONSTRAINT_TO_COLUMN.get(name));

				match field {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}
