use std::{env, fs, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "seachat";
const LOG_FILE_NAME: &str = "seachat.log";

/// Where the client keeps its local files. Only logs are written; chat data
/// is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub state_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let state_base = env::var_os("XDG_STATE_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve state base directory (XDG_STATE_HOME/HOME)".into(),
            })?;

        Ok(Self {
            state_dir: state_base.join(APP_DIR_NAME),
        })
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.state_dir).map_err(|source| AppError::StorageDirCreate {
            path: self.state_dir.clone(),
            source,
        })
    }

    pub fn log_file_name(&self) -> &'static str {
        LOG_FILE_NAME
    }

    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_lock;

    #[test]
    fn honours_xdg_state_home() {
        let _guard = env_lock();
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let old_state = env::var_os("XDG_STATE_HOME");
        // SAFETY: env is guarded by process-wide test mutex.
        unsafe { env::set_var("XDG_STATE_HOME", dir.path()) };

        let layout = StorageLayout::resolve().expect("layout should resolve");
        layout.ensure_dirs().expect("dirs should be created");

        match old_state {
            // SAFETY: restoring env while guard is held.
            Some(value) => unsafe { env::set_var("XDG_STATE_HOME", value) },
            // SAFETY: restoring env while guard is held.
            None => unsafe { env::remove_var("XDG_STATE_HOME") },
        }

        assert_eq!(layout.state_dir, dir.path().join("seachat"));
        assert!(layout.state_dir.is_dir());
        assert!(layout.log_file().starts_with(&layout.state_dir));
    }
}
