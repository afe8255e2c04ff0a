use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The state kept between runs of the program
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Prefs {
    pub(crate) high_score: u32,
    pub(crate) muted: bool,
}

impl Prefs {
    /// Return the default preferences file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("prefs.json"))
    }

    /// Read preferences from `path`.  A file that does not exist yet yields
    /// the defaults.
    pub(crate) fn load(path: &Path) -> Result<Prefs, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Prefs::default()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    /// Write preferences to `path`, creating parent directories as needed
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(self).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// Where (and whether) preferences are kept on disk.  With no path, the
/// preferences live in memory only.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PrefsStore {
    path: Option<PathBuf>,
    prefs: Prefs,
}

impl PrefsStore {
    pub(crate) fn new(path: Option<PathBuf>) -> PrefsStore {
        PrefsStore {
            path,
            prefs: Prefs::default(),
        }
    }

    pub(crate) fn prefs(&self) -> Prefs {
        self.prefs
    }

    /// Read the stored preferences.  On failure the in-memory defaults are
    /// kept so that play can go on.
    pub(crate) fn load(&mut self) -> Result<Prefs, LoadError> {
        if let Some(ref path) = self.path {
            self.prefs = Prefs::load(path)?;
            tracing::debug!(
                path = %path.display(),
                high_score = self.prefs.high_score,
                "Loaded preferences"
            );
        }
        Ok(self.prefs)
    }

    pub(crate) fn save_high_score(&mut self, high_score: u32) -> Result<(), SaveError> {
        self.prefs.high_score = high_score;
        self.save()
    }

    pub(crate) fn clear_high_score(&mut self) -> Result<(), SaveError> {
        self.save_high_score(0)
    }

    pub(crate) fn save_muted(&mut self, muted: bool) -> Result<(), SaveError> {
        self.prefs.muted = muted;
        self.save()
    }

    fn save(&self) -> Result<(), SaveError> {
        match self.path {
            Some(ref path) => self.prefs.save(path),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save preferences to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize preferences")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write preferences file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read preferences from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read preferences file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize preferences")]
    Deserialize(#[source] serde_json::Error),
}
