use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProgError {
    #[error(
        "avrdude executable not found in {}; please place avrdude under {}/<os>/bin",
        .root.display(),
        .root.display()
    )]
    ExecutableNotFound { root: PathBuf },

    #[error("failed to start avrdude: {0}")]
    Launch(String),

    #[error("avrdude finished with error: {0}")]
    ProcessExit(String),

    #[error("Could not enumerate serial ports: {0}")]
    PortEnumeration(String),
}

pub type ProgResult<T> = std::result::Result<T, ProgError>;
