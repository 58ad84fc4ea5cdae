use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Settings for the collector service. Any field left out of the YAML file
/// falls back to the defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Durable reading log shared with the display.
    pub data_file: PathBuf,
    /// Interface the upload endpoint binds to.
    pub host: String,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("radar_data.csv"),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServiceConfig {
    /// Loads settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config file {}", path.as_ref().display()))?;
        let config = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.as_ref().display()))?;
        Ok(config)
    }

    /// Merges an optional config file with command line overrides. Flags win
    /// over the file, the file wins over defaults.
    pub fn resolve(
        path: Option<&Path>,
        data_file: Option<PathBuf>,
        port: Option<u16>,
    ) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(data_file) = data_file {
            config.data_file = data_file;
        }
        if let Some(port) = port {
            config.port = port;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("parsing bind host '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
