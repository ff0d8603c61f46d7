use common::StorageConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Process secret reserved for session signing.
    pub secret_key: String,
    /// Maximum accepted size of an upload request body.
    pub max_upload_bytes: usize,
}

pub const DEFAULT_IMAGE_CONTAINER: &str = "gallery-images";
pub const DEFAULT_THUMBNAIL_CONTAINER: &str = "gallery-thumbnails";

/// Where originals and thumbnails live.
#[derive(Debug, Deserialize, Clone)]
pub struct GalleryConfig {
    pub image_container: String,
    pub thumbnail_container: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_container: DEFAULT_IMAGE_CONTAINER.into(),
            thumbnail_container: DEFAULT_THUMBNAIL_CONTAINER.into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Self::defaults()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            .add_source(Self::environment())
            .build()?;

        s.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.secret_key", "default-key")?
            .set_default("server.max_upload_bytes", 16 * 1024 * 1024)?
            .set_default("gallery.image_container", DEFAULT_IMAGE_CONTAINER)?
            .set_default("gallery.thumbnail_container", DEFAULT_THUMBNAIL_CONTAINER)
    }

    /// Overrides from the environment (e.g., GALLERY__STORAGE__S3__ENDPOINT).
    fn environment() -> Environment {
        Environment::with_prefix("GALLERY").separator("__")
    }
}
