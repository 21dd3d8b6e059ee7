//! Model path resolution.
//!
//! Resolution order: CLI argument → environment variable → XDG config dir.

use std::path::{Path, PathBuf};

/// Environment variable naming the model document path.
const ENV_MODEL_PATH: &str = "NBAYES_MODEL";

/// Standard model file name inside the config directory.
const MODEL_FILENAME: &str = "model.json";

/// Application name for XDG directories.
const APP_NAME: &str = "nbayes";

/// Where a model document was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,
}

impl std::fmt::Display for ModelSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSource::CliArgument => write!(f, "CLI argument"),
            ModelSource::Environment => write!(f, "environment variable"),
            ModelSource::XdgConfig => write!(f, "XDG config"),
        }
    }
}

/// Resolve the model document path.
///
/// Resolution order:
/// 1. Explicit CLI path, returned as-given so a missing file surfaces as a
///    load error instead of silently falling through
/// 2. NBAYES_MODEL environment variable (must exist)
/// 3. XDG config directory (~/.config/nbayes/model.json, must exist)
pub fn resolve_model_path(cli_path: Option<&Path>) -> Option<(PathBuf, ModelSource)> {
    if let Some(path) = cli_path {
        return Some((path.to_path_buf(), ModelSource::CliArgument));
    }

    if let Ok(env_path) = std::env::var(ENV_MODEL_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Some((path, ModelSource::Environment));
        }
    }

    let candidate = xdg_config_dir().join(APP_NAME).join(MODEL_FILENAME);
    if candidate.exists() {
        return Some((candidate, ModelSource::XdgConfig));
    }

    None
}

/// XDG config home, with the conventional ~/.config fallback.
fn xdg_config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_path_wins_even_when_missing() {
        let cli = PathBuf::from("/definitely/not/there/model.json");
        let (path, source) = resolve_model_path(Some(&cli)).expect("CLI path is returned");
        assert_eq!(path, cli);
        assert_eq!(source, ModelSource::CliArgument);
    }

    #[test]
    fn source_display_names() {
        assert_eq!(ModelSource::CliArgument.to_string(), "CLI argument");
        assert_eq!(ModelSource::Environment.to_string(), "environment variable");
        assert_eq!(ModelSource::XdgConfig.to_string(), "XDG config");
    }
}
