use std::fmt::Display;

use clap::Error;
use clap::error::ErrorKind;
use common::DbConn;
use diesel::PgConnection;

/// Turn any displayable failure into a [`clap::Error`]
pub fn io_error(err: impl Display) -> Error {
	Error::raw(ErrorKind::Io, format!("{err}\n"))
}

/// Read a JSON file into a list of records
pub fn read_records<T>(path: &str) -> Result<Vec<T>, Error>
where
	T: serde::de::DeserializeOwned,
{
	let contents = std::fs::read_to_string(path).map_err(io_error)?;

	serde_json::from_str(&contents).map_err(io_error)
}

/// Generic batch insertion function using closure-based approach
pub async fn batch_insert<T, F>(
	conn: &DbConn,
	mut items: Vec<T>,
	chunk_size: usize,
	inserter: F,
) -> Result<usize, Error>
where
	T: Send + 'static,
	F: Fn(&mut PgConnection, &[T]) -> Result<usize, diesel::result::Error>
		+ Send
		+ Copy
		+ 'static,
{
	let size = items.len();
	let mut total = 0;

	while !items.is_empty() {
		let chunk =
			items.drain(..chunk_size.min(items.len())).collect::<Vec<_>>();
		let chunk_len = chunk.len();

		let insert_len = conn
			.interact(move |c| inserter(c, &chunk))
			.await
			.map_err(io_error)?
			.map_err(io_error)?;

		total += insert_len;

		println!("Inserted {total}/{size} items");

		if insert_len != chunk_len {
			return Err(io_error(format!(
				"Inserted {insert_len} items but expected {chunk_len}"
			)));
		}
	}

	Ok(total)
}
