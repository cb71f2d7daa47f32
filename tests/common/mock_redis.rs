use std::sync::{LazyLock, Mutex, MutexGuard, TryLockError};

use redis::aio::MultiplexedConnection;
use redis::cmd;

/// Number of logical databases a default redis server exposes
const REDIS_DATABASES: usize = 16;

/// One lock per logical redis database, so concurrent tests never share one
static REDIS_DATABASE_URLS: LazyLock<Vec<Mutex<String>>> =
	LazyLock::new(|| {
		let redis_url = std::env::var("REDIS_URL").unwrap();
		let redis_url = redis_url.trim_end_matches('/');

		(0..REDIS_DATABASES)
			.map(|db| Mutex::new(format!("{redis_url}/{db}")))
			.collect()
	});

pub struct RedisUrlProvider;

/// Exclusive access to a single logical redis database, flushed on drop
pub struct RedisUrlGuard(MutexGuard<'static, String>);

impl RedisUrlProvider {
	/// Lock the first free logical database, waiting until one frees up
	pub fn acquire() -> RedisUrlGuard {
		loop {
			for mutex in REDIS_DATABASE_URLS.iter() {
				match mutex.try_lock() {
					Ok(lock) => return RedisUrlGuard(lock),
					// A panicking test still flushed its database on drop
					Err(TryLockError::Poisoned(e)) => {
						return RedisUrlGuard(e.into_inner());
					},
					Err(TryLockError::WouldBlock) => (),
				}
			}

			std::thread::yield_now();
		}
	}
}

impl RedisUrlGuard {
	pub async fn connect(&self) -> MultiplexedConnection {
		let client = redis::Client::open(self.0.as_str()).unwrap();
		client.get_multiplexed_async_connection().await.unwrap()
	}
}

impl Drop for RedisUrlGuard {
	fn drop(&mut self) {
		futures::executor::block_on(async {
			let mut conn = self.connect().await;

			let _: () = cmd("FLUSHDB").query_async(&mut conn).await.unwrap();
		});
	}
}
