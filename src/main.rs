#[macro_use]
extern crate tracing;

use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;
use uspot::{AppState, Config, routes};

#[tokio::main]
async fn main() {
	// Set up the tracing subscriber.
	// This will print out all logs to the console.
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::INFO)
		.init();

	// Load the configuration from the environment,
	// and create a database pool.
	let config = Config::from_env();
	let database_pool = config.create_database_pool();
	let redis_connection = config.create_redis_connection().await;

	let cookie_jar_key = config.load_cookie_jar_key();

	let bind_address = config.bind_address.clone();

	// Create the app router and listener.
	let router = routes::get_app_router(AppState {
		config,
		database_pool,
		redis_connection,
		cookie_jar_key,
	});

	let listener = TcpListener::bind(&bind_address)
		.await
		.expect("COULD NOT BIND LISTENER");

	// Start the server.
	info!("listening on {bind_address}");
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.expect("SERVER ERROR");
}

/// Gracefully shutdown the server on SIGINT or SIGTERM.
async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}
}
