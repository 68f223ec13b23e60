use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use mongodb::bson::{DateTime, doc};
use serde::Deserialize;

use super::{Error, Result};

pub const CREDENTIALS_FILE: &str = "mongo-credentials.json";
const HEALTH_COLLECTION: &str = "_health_check";

#[derive(Clone, Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

#[derive(Clone)]
pub struct Config {
    host: String,
    port: u16,
    db: String,
    credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 27017,
            db: String::from("huddle"),
            credentials: None,
        }
    }
}

impl Config {
    pub fn env() -> Result<Self> {
        let default = Self::default();

        let host = env::var("MONGO_HOST").unwrap_or(default.host);
        let port = match env::var("MONGO_PORT") {
            Ok(p) => p.parse()?,
            Err(_) => default.port,
        };
        let db = env::var("MONGO_DB").unwrap_or(default.db);

        let explicit = env::var("MONGO_CREDENTIALS_FILE").ok().map(PathBuf::from);
        let credentials = locate_credentials(explicit, Path::new(CREDENTIALS_FILE))?;

        Ok(Self {
            host,
            port,
            db,
            credentials,
        })
    }

    pub fn db(&self) -> &str {
        &self.db
    }

    pub fn connect(&self) -> Result<mongodb::Database> {
        let credential = self.credentials.as_ref().map(|c| {
            mongodb::options::Credential::builder()
                .username(c.username.clone())
                .password(c.password.clone())
                .build()
        });

        let options = mongodb::options::ClientOptions::builder()
            .hosts(vec![mongodb::options::ServerAddress::Tcp {
                host: self.host.clone(),
                port: Some(self.port),
            }])
            .credential(credential)
            .server_selection_timeout(Some(Duration::from_secs(2)))
            .connect_timeout(Some(Duration::from_secs(5)))
            .build();

        let db = mongodb::Client::with_options(options).map(|client| client.database(&self.db))?;

        Ok(db)
    }
}

/// Probes the explicit path first, then the default file in the working
/// directory. An explicit path that leads nowhere is fatal; without one the
/// client simply connects unauthenticated.
fn locate_credentials(explicit: Option<PathBuf>, default: &Path) -> Result<Option<Credentials>> {
    let required = explicit.is_some();
    let candidates: Vec<PathBuf> = explicit
        .into_iter()
        .chain(std::iter::once(default.to_path_buf()))
        .collect();

    match candidates.iter().find(|p| p.exists()) {
        Some(path) => {
            debug!("reading mongo credentials from {}", path.display());
            let raw = std::fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&raw)?))
        }
        None if required => Err(Error::MissingCredentials(candidates)),
        None => {
            warn!("no mongo credentials configured, connecting without authentication");
            Ok(None)
        }
    }
}

pub async fn ping(db: &mongodb::Database) -> Result<()> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Connectivity check used by the health endpoint.
#[async_trait]
pub trait Probe {
    async fn is_connected(&self) -> bool;
}

#[async_trait]
impl Probe for mongodb::Database {
    async fn is_connected(&self) -> bool {
        let res = self
            .collection::<mongodb::bson::Document>(HEALTH_COLLECTION)
            .update_one(
                doc! { "_id": "test" },
                doc! { "$set": { "timestamp": DateTime::now() } },
            )
            .upsert(true)
            .await;

        match res {
            Ok(_) => true,
            Err(e) => {
                warn!("health probe failed: {e}");
                false
            }
        }
    }
}
