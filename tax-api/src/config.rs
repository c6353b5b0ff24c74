use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tax_core::db::DbConfig;

use crate::auth::AdminCredentials;

/// HTTP service computing single-filer personal income tax.
///
/// Every flag can also be set through the environment variable shown in
/// `--help`.
#[derive(Debug, Clone, Parser)]
#[command(name = "tax-api")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces).
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Database backend to use.
    #[arg(long, env = "DB_BACKEND", default_value = "sqlite")]
    pub backend: String,

    /// Database connection string, e.g. `sqlite:tax.db?mode=rwc` or `:memory:`.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:tax.db?mode=rwc")]
    pub database_url: String,

    /// Username accepted on `/admin` routes.
    #[arg(long, env = "ADMIN_USERNAME", default_value = "adminTax")]
    pub admin_username: String,

    /// Password accepted on `/admin` routes.
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin!", hide_env_values = true)]
    pub admin_password: String,

    /// Also append log output to this file.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.backend.clone(),
            connection_string: self.database_url.clone(),
        }
    }

    pub fn admin_credentials(&self) -> AdminCredentials {
        AdminCredentials::new(&self.admin_username, &self.admin_password)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
