use crate::prelude::*;
use std::env::VarError;
use std::fmt;

const TOKEN_VAR: &str = "BOT_TOKEN";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("BOT_TOKEN environment variable not found")]
    MissingToken,

    #[error("BOT_TOKEN environment variable contains invalid unicode")]
    NonUnicodeToken,

    #[error("Failed to load the `.env` file")]
    DotEnv(#[from] dotenvy::Error),

    #[error("The system temp directory is not a valid UTF-8 path: {0:?}")]
    NonUtf8TempDir(std::path::PathBuf),
}

pub(crate) struct BotConfig {
    pub(crate) token: String,
}

// Keep the token out of the logs
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl BotConfig {
    /// Reads the config from the process environment. A `.env` file in the
    /// current directory or any of its parents is loaded first if it exists.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        Self::from_token_var(std::env::var(TOKEN_VAR))
    }

    fn from_token_var(var: Result<String, VarError>) -> Result<Self, ConfigError> {
        let token = match var {
            Ok(token) => token.trim().to_owned(),
            Err(VarError::NotPresent) => return Err(ConfigError::MissingToken),
            Err(VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeToken),
        };

        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        Ok(Self { token })
    }
}

/// `<system temp dir>/tgtrim`
pub(crate) fn default_work_dir() -> Result<Utf8PathBuf, ConfigError> {
    let temp_dir = std::env::temp_dir();
    let temp_dir = Utf8PathBuf::from_path_buf(temp_dir).map_err(ConfigError::NonUtf8TempDir)?;

    Ok(temp_dir.join(env!("CARGO_PKG_NAME")))
}
