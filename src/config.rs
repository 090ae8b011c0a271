use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Directory holding `generation.csv` and `emissions.csv`.
    pub data_dir: PathBuf,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    Ok(Config {
        port: std::env::var("NEIS_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .unwrap_or(8080),
        data_dir: std::env::var("NEIS_DATA_DIR")
            .unwrap_or_else(|_| "data".into())
            .into(),
    })
}
