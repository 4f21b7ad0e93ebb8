use std::time::Duration;

use crate::{
    backend::SlotRegistry, configuration::Configuration,
    configuration_handler::ConfigurationHandler, database_interface::DatabaseInterface,
    http::create_app, local_slots::LocalSlots,
};
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_slots;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[derive(Clone)]
struct AppState<T: SlotRegistry, C: Configuration> {
    registry: T,
    configuration: C,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("####################");
    println!("# Car Wash Booking #");
    println!("####################");

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessible at:\n{}", address.clone());
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let registry = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(registry) => {
                    info!("Successfully connected to database");
                    break registry;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart without a database (impersistent slots).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(registry, configuration)
    } else {
        create_app(LocalSlots::default(), configuration)
    };

    axum::serve(listener, app).await.unwrap();
}
