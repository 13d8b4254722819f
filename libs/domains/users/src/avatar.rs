//! Avatar uploads: type checks and a local directory served as static files.

use async_trait::async_trait;
use axum::body::Bytes;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use std::path::PathBuf;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{UserError, UserResult};

pub const AVATAR_FIELD: &str = "avatar";

/// Form accepted by `PATCH /users/avatars`
#[derive(ToSchema)]
pub struct AvatarForm {
    /// jpeg, png, gif or webp image
    #[schema(value_type = String, format = Binary)]
    pub avatar: Vec<u8>,
}

/// An uploaded `avatar` form field
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl AvatarUpload {
    /// File extension for the upload, or `InvalidAvatar` when it is not a
    /// supported image.
    pub fn extension(&self) -> UserResult<&'static str> {
        if self.bytes.is_empty() {
            return Err(UserError::InvalidAvatar("Avatar file is empty".to_string()));
        }

        match self.content_type.as_deref() {
            Some("image/jpeg") => Ok("jpg"),
            Some("image/png") => Ok("png"),
            Some("image/gif") => Ok("gif"),
            Some("image/webp") => Ok("webp"),
            _ => Err(UserError::InvalidAvatar(
                "Avatar must be a jpeg, png, gif or webp image".to_string(),
            )),
        }
    }
}

/// Where avatars are kept. Returns the public URL of the stored file.
#[async_trait]
pub trait AvatarStore: Send + Sync + 'static {
    async fn save(&self, user_id: &str, upload: AvatarUpload) -> UserResult<String>;
}

/// Local avatar storage.
///
/// Loaded from environment variables:
/// - `AVATAR_DIR` (default `public/avatars`)
/// - `AVATAR_PUBLIC_URL` (default `{BASE_URL}/avatars`)
#[derive(Clone, Debug)]
pub struct AvatarConfig {
    pub dir: PathBuf,
    pub public_url: String,
}

impl AvatarConfig {
    pub const DEFAULT_DIR: &'static str = "public/avatars";

    pub fn new(dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl FromEnv for AvatarConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let dir = env_or_default("AVATAR_DIR", Self::DEFAULT_DIR);
        let public_url = match std::env::var("AVATAR_PUBLIC_URL") {
            Ok(url) => url,
            Err(_) => format!("{}/avatars", env_required("BASE_URL")?.trim_end_matches('/')),
        };
        Ok(Self::new(dir, public_url))
    }
}

/// Writes avatars into [`AvatarConfig::dir`]; the app serves that
/// directory under `/avatars`.
#[derive(Clone, Debug)]
pub struct LocalAvatarStore {
    config: AvatarConfig,
}

impl LocalAvatarStore {
    pub fn new(config: AvatarConfig) -> Self {
        Self { config }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.config.dir
    }
}

#[async_trait]
impl AvatarStore for LocalAvatarStore {
    #[tracing::instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    async fn save(&self, user_id: &str, upload: AvatarUpload) -> UserResult<String> {
        let extension = upload.extension()?;
        let file_name = format!("{user_id}-{}.{extension}", Uuid::new_v4().simple());

        tokio::fs::create_dir_all(&self.config.dir).await?;
        tokio::fs::write(self.config.dir.join(&file_name), &upload.bytes).await?;

        tracing::debug!(file_name = %file_name, "Avatar stored");
        Ok(format!("{}/{file_name}", self.config.public_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> AvatarUpload {
        AvatarUpload {
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        }
    }

    #[test]
    fn test_only_images_are_accepted() {
        assert_eq!(png().extension().unwrap(), "png");

        let text = AvatarUpload {
            content_type: Some("text/plain".to_string()),
            ..png()
        };
        assert!(matches!(text.extension(), Err(UserError::InvalidAvatar(_))));

        let untyped = AvatarUpload {
            content_type: None,
            ..png()
        };
        assert!(untyped.extension().is_err());

        let empty = AvatarUpload {
            bytes: Bytes::new(),
            ..png()
        };
        assert!(empty.extension().is_err());
    }

    #[tokio::test]
    async fn test_local_store_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAvatarStore::new(AvatarConfig::new(
            dir.path().join("avatars"),
            "http://localhost:8080/avatars/",
        ));

        let url = store.save("u1", png()).await.unwrap();
        assert!(url.starts_with("http://localhost:8080/avatars/u1-"));
        assert!(url.ends_with(".png"));

        let file_name = url.rsplit('/').next().unwrap();
        let written = std::fs::read(dir.path().join("avatars").join(file_name)).unwrap();
        assert_eq!(written, b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_config_defaults_to_base_url() {
        temp_env::with_vars(
            [
                ("BASE_URL", Some("https://market.example.com/")),
                ("AVATAR_DIR", None),
                ("AVATAR_PUBLIC_URL", None),
            ],
            || {
                let config = AvatarConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("public/avatars"));
                assert_eq!(config.public_url, "https://market.example.com/avatars");
            },
        );
    }

    #[test]
    fn test_config_override() {
        temp_env::with_vars(
            [
                ("BASE_URL", None),
                ("AVATAR_DIR", Some("/var/avatars")),
                ("AVATAR_PUBLIC_URL", Some("https://cdn.example.com/a")),
            ],
            || {
                let config = AvatarConfig::from_env().unwrap();
                assert_eq!(config.dir, PathBuf::from("/var/avatars"));
                assert_eq!(config.public_url, "https://cdn.example.com/a");
            },
        );
    }
}
