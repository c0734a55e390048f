#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod args;
pub mod file;

use std::{
    path::{Path, PathBuf},
    sync::atomic::AtomicBool,
};

use args::ArgsConfig;
use error_stack::{Result, ResultExt};
use url::Url;

use self::file::{ConfigFile, SocketConfig};

/// Config file debug mode status.
///
/// Parse the config file before reading this value.
pub static RUNNING_IN_DEBUG_MODE: GlobalDebugFlag = GlobalDebugFlag {
    debug: AtomicBool::new(false),
};

pub struct GlobalDebugFlag {
    debug: AtomicBool,
}

impl GlobalDebugFlag {
    pub fn value(&self) -> bool {
        self.debug.load(std::sync::atomic::Ordering::Relaxed)
    }
}

pub use self::file::ConfigFileError;

#[derive(thiserror::Error, Debug)]
pub enum GetConfigError {
    #[error("Get working directory error")]
    GetWorkingDir,
    #[error("File loading failed")]
    LoadFileError,
}

#[derive(Debug, Clone)]
pub struct Config {
    file: ConfigFile,

    /// Semver version of the backend.
    backend_semver_version: String,

    /// Directory where the SQLite database is stored.
    data_dir: PathBuf,
    sqlite_in_ram: bool,
}

impl Config {
    /// Directory where SQLite databases and other files are stored.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn socket(&self) -> &SocketConfig {
        &self.file.socket
    }

    /// Externally reachable base URL used to build the post-creation
    /// redirect target on the submission form page.
    pub fn public_base_url(&self) -> &Url {
        &self.file.web.public_base_url
    }

    /// Swagger UI is enabled and unhandled errors are
    /// visible in API responses when debug mode is enabled.
    pub fn debug_mode(&self) -> bool {
        self.file.general.debug.unwrap_or(false)
    }

    pub fn sqlite_in_ram(&self) -> bool {
        self.sqlite_in_ram
    }

    pub fn backend_semver_version(&self) -> &str {
        &self.backend_semver_version
    }

    /// Config for tests. Uses in RAM SQLite and does not touch
    /// the file system.
    pub fn minimal_config_with_in_ram_database() -> Self {
        let file: ConfigFile = toml::from_str(file::DEFAULT_CONFIG_FILE_TEXT)
            .expect("Default config file text is invalid");
        Self {
            file,
            backend_semver_version: String::new(),
            data_dir: PathBuf::new(),
            sqlite_in_ram: true,
        }
    }
}

pub fn get_config(
    args: ArgsConfig,
    backend_semver_version: String,
) -> Result<Config, GetConfigError> {
    let current_dir = std::env::current_dir().change_context(GetConfigError::GetWorkingDir)?;
    let file = ConfigFile::load(current_dir).change_context(GetConfigError::LoadFileError)?;

    let data_dir = args.server.data_dir.unwrap_or_else(|| file.data.dir.clone());

    if file.general.debug.unwrap_or(false) {
        RUNNING_IN_DEBUG_MODE
            .debug
            .store(true, std::sync::atomic::Ordering::Relaxed);
    }

    Ok(Config {
        file,
        backend_semver_version,
        data_dir,
        sqlite_in_ram: args.server.sqlite_in_ram,
    })
}
