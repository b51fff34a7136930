//! Default config template embedded at compile time.

use crate::error::{Result, SentinelError};
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;

/// Embedded templates directory.
static TEMPLATES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// File name of the bundled config template.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Raw bytes of the bundled config template.
pub fn default_config_bytes() -> &'static [u8] {
    TEMPLATES_DIR
        .get_file(CONFIG_FILE_NAME)
        .map(|f| f.contents())
        .unwrap_or_default()
}

/// Write the bundled template to `path`, creating parent directories.
///
/// The written file is byte-identical to the embedded template. Any failure
/// is reported as [`SentinelError::ConfigCreation`].
pub fn materialize_default(path: &Path) -> Result<()> {
    let creation_error = |source| SentinelError::ConfigCreation {
        path: path.to_path_buf(),
        source,
    };

    let contents = TEMPLATES_DIR
        .get_file(CONFIG_FILE_NAME)
        .ok_or_else(|| {
            creation_error(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "bundled config template is missing",
            ))
        })?
        .contents();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(creation_error)?;
        }
    }

    fs::write(path, contents).map_err(creation_error)?;
    tracing::info!("Generated default config at {}", path.display());
    Ok(())
}
