//! Constants shared across the crate.
//!
//! Token spellings, default templates and file names live here so the
//! resolver, the CLI and the configuration defaults agree on them.

/// Minimum width of a formatted serial number; wider values are not truncated.
pub const SERIAL_WIDTH: usize = 4;

/// Minimum width of a formatted frame number.
pub const FRAME_WIDTH: usize = 4;

/// The serial placeholder. Never resolved from ambient state.
pub const SERIAL_TOKEN: &str = "{serial}";

/// Project name placeholder, also honoured by the render time log name.
pub const PROJECT_TOKEN: &str = "{project}";

/// Image extensions recognised when probing a directory for existing serials.
pub const IMAGE_EXTENSIONS: &[&str] =
    &["bmp", "rgb", "png", "jpg", "jp2", "tga", "cin", "dpx", "exr", "hdr", "tif", "webp"];

/// Placeholder used when the active item, material or node is missing.
pub const NONE_VALUE: &str = "None";

/// Value used for engine properties we cannot describe.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Default custom autosave file name for a project.
pub const DEFAULT_FILE_NAME_CUSTOM: &str = "{project}-{serial}-{renderengine}-{rendertime}";

/// Default custom autosave file name for the global override.
pub const DEFAULT_FILE_NAME_CUSTOM_GLOBAL: &str = "{project}-{serial}";

/// Default autosave location; one character or less means "next to the project".
pub const DEFAULT_FILE_LOCATION: &str = "/";

/// Default name of the external render time log.
pub const DEFAULT_LOG_NAME: &str = "{project}-TotalRenderTime.txt";

/// Prefix written in front of the accumulated time in the render time log.
pub const LOG_TITLE: &str = "Total Render Time: ";

/// Project settings file, looked up next to the project file.
pub const PROJECT_SETTINGS_FILE: &str = "autosave.toml";

/// Suffix of the per-project state file (`<project>.autosave-state.toml`).
pub const PROJECT_STATE_SUFFIX: &str = ".autosave-state.toml";

/// Directory under the home directory holding global configuration and state.
pub const GLOBAL_DIR_NAME: &str = ".autosave-render";

/// Global preferences file name.
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Global state file name (holds the global serial counter).
pub const GLOBAL_STATE_FILE: &str = "state.toml";

/// Blender-style prefix for paths relative to the project directory.
pub const PROJECT_RELATIVE_PREFIX: &str = "//";
