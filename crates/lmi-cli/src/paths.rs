//! Host configuration file location.

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_QUALIFIER: &str = "dev";
const APP_ORGANIZATION: &str = "lmi";
const APP_NAME: &str = "lmi";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not resolve user config directory")]
    MissingConfigDir,
}

/// Default path of the host configuration document.
pub fn config_file() -> Result<PathBuf, Error> {
    let dirs =
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or(Error::MissingConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILENAME))
}
