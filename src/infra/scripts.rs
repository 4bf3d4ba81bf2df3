//! Directory-backed `ScriptStore` — script ids are file names under a
//! configured local directory, kept in sync by an external process.
//! The id comes from the controller, so it is validated before it
//! touches the filesystem.

use std::path::{Path, PathBuf};

use crate::application::ports::ScriptStore;
use crate::domain::error::ScriptError;

pub struct DirScriptStore {
    root: PathBuf,
}

impl DirScriptStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ScriptStore for DirScriptStore {
    fn resolve(&self, script_id: &str) -> Result<PathBuf, ScriptError> {
        if script_id.is_empty() || script_id.contains(['/', '\\']) || script_id.contains("..") {
            return Err(ScriptError::InvalidId(script_id.to_string()));
        }
        let path = self.root.join(script_id);
        if !path.is_file() {
            return Err(ScriptError::NotFound {
                id: script_id.to_string(),
                dir: self.root.clone(),
            });
        }
        Ok(path)
    }
}
