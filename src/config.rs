use crate::storage::resolve_data_dir;
use crate::summary::SummaryGlyphs;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub glyphs: SummaryGlyphs,
}

impl Config {
    pub async fn from_env() -> Result<Self, std::io::Error> {
        let port = parse_port(env::var("PORT").ok().as_deref());
        let data_dir = resolve_data_dir()?;
        let glyphs = match env::var("APP_GLYPHS_PATH") {
            Ok(path) => load_glyphs(Path::new(&path)).await,
            Err(_) => SummaryGlyphs::default(),
        };

        Ok(Self {
            port,
            data_dir,
            glyphs,
        })
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub async fn load_glyphs(path: &Path) -> SummaryGlyphs {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(glyphs) => {
                info!("loaded summary glyphs from {}", path.display());
                glyphs
            }
            Err(err) => {
                error!("failed to parse glyph file: {err}");
                SummaryGlyphs::default()
            }
        },
        Err(err) => {
            error!("failed to read glyph file {}: {err}", path.display());
            SummaryGlyphs::default()
        }
    }
}
