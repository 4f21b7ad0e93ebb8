use crate::configuration::Configuration;
use clap::Parser;

const DEFAULT_ADMIN_PASSWORD: &str = "123";

/// Command line configuration, with environment fallbacks (via `.env`) for
/// the values usually kept out of the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "car_wash_api", about = "Car wash appointment booking API")]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on
    #[arg(long, default_value = "3000")]
    port: String,

    /// PostgreSQL connection URL; omit to keep slots in memory (impersistent)
    #[arg(long)]
    database_url: Option<String>,

    /// Password expected in the x-admin-password header on admin routes
    #[arg(long)]
    admin_password: Option<String>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        let mut configuration = Self::parse();
        if configuration.database_url.is_none() {
            configuration.database_url = std::env::var("DATABASE_URL").ok();
        }
        if configuration.admin_password.is_none() {
            configuration.admin_password = std::env::var("ADMIN_PASSWORD").ok();
        }
        configuration
    }
}

impl Configuration for ConfigurationHandler {
    fn admin_password(&self) -> String {
        self.admin_password
            .clone()
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.into())
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }
}
