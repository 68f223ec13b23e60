use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::{fs::File, net::SocketAddr};

use axum::http::HeaderValue;
use dotenv::dotenv;
use log::{LevelFilter, warn};
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin};

pub mod db;

/// Served when `STATIC_ROOT` is unset; kept apart from `.env` and credentials.
pub const STATIC_ROOT: &str = "static";

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq)]
pub enum Env {
    Local,
    Dev,
    Stage,
    Production,
}

impl Env {
    pub fn addr(&self) -> SocketAddr {
        match self {
            Env::Local => SocketAddr::from(([127, 0, 0, 1], 5000)),
            Env::Dev | Env::Stage | Env::Production => SocketAddr::from(([0, 0, 0, 0], 5000)),
        }
    }

    pub fn allow_origin(&self) -> AllowOrigin {
        match self {
            Env::Local | Env::Dev => AllowOrigin::any(),
            Env::Stage | Env::Production => {
                let origins = env::var("ALLOW_ORIGIN")
                    .unwrap_or_default()
                    .split(',')
                    .filter(|o| !o.trim().is_empty())
                    .filter_map(|o| match HeaderValue::from_str(o.trim()) {
                        Ok(v) => Some(v),
                        Err(e) => {
                            warn!("skipping invalid ALLOW_ORIGIN value {o}: {e}");
                            None
                        }
                    })
                    .collect::<Vec<HeaderValue>>();
                AllowOrigin::list(origins)
            }
        }
    }

    pub fn allow_methods(&self) -> AllowMethods {
        AllowMethods::any()
    }

    pub fn allow_headers(&self) -> AllowHeaders {
        AllowHeaders::any()
    }
}

impl FromStr for Env {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Env::Local),
            "dev" => Ok(Env::Dev),
            "stg" => Ok(Env::Stage),
            "prod" => Ok(Env::Production),
            _ => Err(Error::UnknownEnv(s.to_owned())),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub env: Env,
    pub mongo: db::Config,
    pub static_root: PathBuf,
}

impl Config {
    pub fn env() -> Result<Self> {
        dotenv().ok();

        let env = match env::var("ENV") {
            Ok(e) => e.parse()?,
            Err(_) => Env::Local,
        };

        let static_root = env::var("STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(STATIC_ROOT));

        Ok(Self {
            env,
            mongo: db::Config::env()?,
            static_root,
        })
    }
}

/// Terminal plus file logging, level taken from `RUST_LOG`.
pub fn init_logger() -> Result<()> {
    dotenv().ok();

    let rust_log = env::var("RUST_LOG").unwrap_or("info".into());
    let level = LevelFilter::from_str(&rust_log).unwrap_or(LevelFilter::Info);
    let log_file = env::var("SERVICE_NAME")
        .map(|pkg| format!("{pkg}.log"))
        .unwrap_or("service.log".into());

    CombinedLogger::init(vec![
        TermLogger::new(
            level,
            simplelog::Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(level, simplelog::Config::default(), File::create(log_file)?),
    ])?;

    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid environment: {0}")]
    UnknownEnv(String),
    #[error("mongo credentials not found, tried: {0:?}")]
    MissingCredentials(Vec<PathBuf>),

    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
    #[error(transparent)]
    _ParseInt(#[from] std::num::ParseIntError),
    #[error(transparent)]
    _ParseJson(#[from] serde_json::Error),
    #[error(transparent)]
    _Io(#[from] std::io::Error),
    #[error(transparent)]
    _Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_parse_env() {
        assert_eq!("local".parse::<Env>().unwrap(), Env::Local);
        assert_eq!("stg".parse::<Env>().unwrap(), Env::Stage);
        assert!(matches!(
            "staging".parse::<Env>(),
            Err(Error::UnknownEnv(e)) if e == "staging"
        ));
    }

    #[test]
    fn should_bind_locally_only_in_local_env() {
        assert_eq!(Env::Local.addr(), SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert_eq!(Env::Dev.addr(), SocketAddr::from(([0, 0, 0, 0], 5000)));
    }
}
