use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{HarnessError, HarnessResult};

const ANIMATION_DIR: &str = match option_env!("GOLDENFRAME_ANIMATION_DIR") {
    Some(dir) => dir,
    None => "resources/animation",
};
const PICTURE_DIR: &str = match option_env!("GOLDENFRAME_PICTURE_DIR") {
    Some(dir) => dir,
    None => "resources/svg",
};
const ANIMATION_BASELINE_DIR: &str = match option_env!("GOLDENFRAME_ANIMATION_BASELINE_DIR") {
    Some(dir) => dir,
    None => "baseline/animation",
};
const PICTURE_BASELINE_DIR: &str = match option_env!("GOLDENFRAME_PICTURE_BASELINE_DIR") {
    Some(dir) => dir,
    None => "baseline/svg",
};

/// Directory layout of one harness run.
///
/// Defaults are baked in at build time (see the `GOLDENFRAME_*_DIR` variables);
/// a JSON file may override any subset of fields.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Source `.json` animation documents.
    pub animation_dir: PathBuf,
    /// Source `.svg` documents.
    pub picture_dir: PathBuf,
    /// Baselines for animation frames.
    pub animation_baseline_dir: PathBuf,
    /// Baselines for static pictures.
    pub picture_baseline_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            animation_dir: PathBuf::from(ANIMATION_DIR),
            picture_dir: PathBuf::from(PICTURE_DIR),
            animation_baseline_dir: PathBuf::from(ANIMATION_BASELINE_DIR),
            picture_baseline_dir: PathBuf::from(PICTURE_BASELINE_DIR),
        }
    }
}

impl HarnessConfig {
    /// Read a JSON override file. Missing fields keep their build-time defaults.
    pub fn from_json_file(path: &Path) -> HarnessResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| HarnessError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        let dirs = [
            ("animation_dir", &self.animation_dir),
            ("picture_dir", &self.picture_dir),
            ("animation_baseline_dir", &self.animation_baseline_dir),
            ("picture_baseline_dir", &self.picture_baseline_dir),
        ];
        for (name, dir) in dirs {
            if dir.as_os_str().is_empty() {
                return Err(HarnessError::config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
