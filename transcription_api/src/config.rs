use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file holding the `transcriptions` and `segments`
    /// tables.
    pub database_path: PathBuf,

    /// Directory uploaded files are written into.
    pub upload_dir: PathBuf,

    /// Directory the frontend page is served from.
    pub static_dir: PathBuf,

    pub frontend_file: String,

    pub host: String,

    pub port: u16,

    /// Comma-separated list of origins allowed to make CORS requests.
    pub cors_allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("transcriptions.db"),
            upload_dir: PathBuf::from("uploads"),
            static_dir: PathBuf::from("."),
            frontend_file: "index.html".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_allowed_origins: String::new(),
        }
    }
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let host: IpAddr = self.host.parse()?;

        Ok(SocketAddr::from((host, self.port)))
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
