use config::ConfigError;
use serde::Deserialize;

/// Resolved uploads directory, handed to handlers as a request extension.
#[derive(Debug, Clone)]
pub struct UploadsDir(pub String);

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct PgConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub poolminsize: u32,
    pub poolmaxsize: u32,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: Option<ServerConfig>,
    pub pg: Option<PgConfig>,
    pub uploads_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("uploads_dir", "public/uploads")?
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn database_url(&self) -> String {
        let pg = self.pg.as_ref().expect("missing [pg] configuration");
        format!(
            "postgres://{}:{}@{}:{}/{}",
            pg.user, pg.password, pg.host, pg.port, pg.dbname
        )
    }
}
