use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::TOOL_NAME;
use crate::error::{ProgError, ProgResult};

/// Platform specific executable file name for avrdude
pub fn exe_name(os: &str) -> String {
    if os == "windows" {
        format!("{TOOL_NAME}.exe")
    } else {
        TOOL_NAME.to_owned()
    }
}

/// Candidate executable locations under `root`, most specific first:
/// `<os>_<arch>/bin`, `<os>/bin`, `bin`, then `root` itself.
pub fn candidates(root: &Path, os: &str, arch: &str) -> Vec<PathBuf> {
    let exe = exe_name(os);
    vec![
        root.join(format!("{os}_{arch}")).join("bin").join(&exe),
        root.join(os).join("bin").join(&exe),
        root.join("bin").join(&exe),
        root.join(&exe),
    ]
}

/// Find the avrdude executable below `root` for the running platform
pub fn locate_tool(root: &Path) -> ProgResult<PathBuf> {
    locate_tool_for(root, std::env::consts::OS, std::env::consts::ARCH)
}

/// Same as [`locate_tool`] with an explicit platform
pub fn locate_tool_for(root: &Path, os: &str, arch: &str) -> ProgResult<PathBuf> {
    for candidate in candidates(root, os, arch) {
        debug!("Probing {}", candidate.display());
        if candidate.is_file() {
            ensure_executable(&candidate);
            return Ok(candidate);
        }
    }

    Err(ProgError::ExecutableNotFound {
        root: root.to_path_buf(),
    })
}

#[cfg(unix)]
fn ensure_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    use tracing::warn;

    // Best effort, the spawn will report it if the bit is still missing
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)) {
        warn!("Could not mark {} executable: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn ensure_executable(_path: &Path) {}
