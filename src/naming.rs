//! Autosave file name modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::constants::PROJECT_TOKEN;
use crate::core::AutosaveError;
use crate::probe::next_free_serial;
use crate::utils::format_decimal;

/// How autosaved images are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileNameMode {
    /// Project name plus the next free number found in the target directory
    #[default]
    Serial,
    /// Project name plus date and time
    Date,
    /// Project name, render engine and render time
    Render,
    /// User supplied template
    Custom,
}

impl FileNameMode {
    /// File name template for this mode, still containing variables.
    ///
    /// `Serial` lists `dir` to find the next free number, so `dir` must exist.
    /// The other modes never touch the filesystem. `Render` embeds
    /// `render_time` as bare seconds (`12.35`), without the `s` of `{duration}`.
    pub fn template(
        self,
        custom: &str,
        dir: &Path,
        project: &str,
        extensions: &[&str],
        render_time: f64,
    ) -> Result<String, AutosaveError> {
        Ok(match self {
            FileNameMode::Serial => {
                format!("{PROJECT_TOKEN}-{}", next_free_serial(dir, project, extensions)?)
            }
            FileNameMode::Date => format!("{PROJECT_TOKEN} {{date}} {{time}}"),
            FileNameMode::Render => {
                format!("{PROJECT_TOKEN} {{renderengine}} {}", format_decimal(render_time))
            }
            FileNameMode::Custom => custom.to_string(),
        })
    }
}

impl fmt::Display for FileNameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileNameMode::Serial => "SERIAL",
            FileNameMode::Date => "DATE",
            FileNameMode::Render => "RENDER",
            FileNameMode::Custom => "CUSTOM",
        };
        f.write_str(name)
    }
}

impl FromStr for FileNameMode {
    type Err = AutosaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SERIAL" => Ok(FileNameMode::Serial),
            "DATE" => Ok(FileNameMode::Date),
            "RENDER" => Ok(FileNameMode::Render),
            "CUSTOM" => Ok(FileNameMode::Custom),
            _ => Err(AutosaveError::Other {
                message: format!(
                    "Unknown file name mode '{s}' (expected SERIAL, DATE, RENDER or CUSTOM)"
                ),
            }),
        }
    }
}
