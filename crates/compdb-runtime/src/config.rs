use crate::filter::TaskFilter;
use crate::{Error, Result};
use compdb_engine::{ClassifierOptions, DEFAULT_EXECUTABLE_MARKER, ExecutableStrategy};
use compdb_store::StoreMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "compile_commands.json";

/// Logger configuration.
///
/// Layered by the driver: defaults, then an optional TOML file, then logger
/// parameters (`path:...;task:...;mode:...`), then explicit CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_path: PathBuf,
    pub mode: StoreMode,
    /// Extra task-name substring accepted besides the compiler task.
    pub task_marker: Option<String>,
    pub executable_marker: String,
    pub strategy: ExecutableStrategy,
    /// Base for relative compiler paths; the process working directory when unset.
    pub working_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            mode: StoreMode::default(),
            task_marker: None,
            executable_marker: DEFAULT_EXECUTABLE_MARKER.to_string(),
            strategy: ExecutableStrategy::default(),
            working_dir: None,
        }
    }
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply a `;`-separated logger parameter string.
    ///
    /// Recognized: `path:<file>`, `task:<substring>`, `mode:<merge|stream>`.
    /// Anything else is rejected.
    pub fn apply_parameters(&mut self, parameters: &str) -> Result<()> {
        for parameter in parameters.split(';').map(str::trim) {
            if parameter.is_empty() {
                continue;
            }

            let Some((key, value)) = parameter.split_once(':') else {
                return Err(Error::Config(format!(
                    "unrecognized logger parameter '{}'",
                    parameter
                )));
            };
            let value = value.trim();

            match key.trim() {
                "path" => {
                    if value.is_empty() {
                        return Err(Error::Config("'path:' requires a file path".to_string()));
                    }
                    self.output_path = PathBuf::from(value);
                }
                "task" => {
                    self.task_marker = (!value.is_empty()).then(|| value.to_string());
                }
                "mode" => {
                    self.mode = value.parse().map_err(Error::Config)?;
                }
                _ => {
                    return Err(Error::Config(format!(
                        "unrecognized logger parameter '{}'",
                        parameter
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn classifier_options(&self) -> Result<ClassifierOptions> {
        let working_dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(ClassifierOptions {
            executable_marker: self.executable_marker.clone(),
            strategy: self.strategy,
            working_dir: working_dir.to_string_lossy().into_owned(),
        })
    }

    pub fn task_filter(&self) -> TaskFilter {
        TaskFilter::new(self.task_marker.clone())
    }
}
