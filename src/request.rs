use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_BAUD, DEFAULT_CHIP, DEFAULT_PROGRAMMER, DEFAULT_VERBOSITY, FLASH_READ_PREFIX,
    FLASH_WRITE_PREFIX, HEX_FORMAT_SUFFIX, TOOL_ROOT,
};

/// What avrdude is asked to do with the target's flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Flash a hex file into the chip
    Write,

    /// Dump the chip's flash into a hex file
    Read,

    /// Chip erase, driven purely by the `-e` global flag
    Erase,
}

impl Operation {
    /// Format the `-U` memory operation for this kind, embedding `target`.
    /// Erase has no memory operation of its own.
    pub fn flash_token(&self, target: &str) -> Option<String> {
        let prefix = match self {
            Operation::Write => FLASH_WRITE_PREFIX,
            Operation::Read => FLASH_READ_PREFIX,
            Operation::Erase => return None,
        };

        Some(format!("{prefix}{target}{HEX_FORMAT_SUFFIX}"))
    }
}

/// Everything the user picked for a single avrdude invocation.
///
/// Built fresh for every run and never persisted. Empty strings mean
/// "not set" and simply drop the corresponding arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub port: Option<String>,
    pub programmer: String,
    pub chip: String,
    pub hex_file: Option<PathBuf>,
    pub config_override: Option<PathBuf>,

    /// Directory holding avrdude; the default config lives here too
    pub tool_root: PathBuf,

    pub force: bool,
    pub disable_verify: bool,
    pub disable_erase: bool,
    pub erase_eeprom: bool,
    pub do_not_write: bool,

    /// When false the hex file is replaced by stdin/stdout
    pub use_file: bool,

    /// "0" to "4"; anything else yields no `-v`
    pub verbosity: String,

    /// Passed through verbatim, no numeric validation
    pub baud: String,
}

impl OperationRequest {
    /// Request carrying the stock programmer, chip and baud defaults
    pub fn new(operation: Operation) -> Self {
        OperationRequest {
            operation,
            port: None,
            programmer: DEFAULT_PROGRAMMER.to_owned(),
            chip: DEFAULT_CHIP.to_owned(),
            hex_file: None,
            config_override: None,
            tool_root: PathBuf::from(TOOL_ROOT),
            force: false,
            disable_verify: false,
            disable_erase: false,
            erase_eeprom: false,
            do_not_write: false,
            use_file: true,
            verbosity: DEFAULT_VERBOSITY.to_owned(),
            baud: DEFAULT_BAUD.to_owned(),
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_hex_file(mut self, path: impl AsRef<Path>) -> Self {
        self.hex_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_tool_root(mut self, root: impl AsRef<Path>) -> Self {
        self.tool_root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_verbosity(mut self, verbosity: impl Into<String>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    pub fn with_baud(mut self, baud: impl Into<String>) -> Self {
        self.baud = baud.into();
        self
    }

    /// Erase always asks avrdude for a chip erase and never touches a file
    pub fn effective_erase_eeprom(&self) -> bool {
        self.erase_eeprom || self.operation == Operation::Erase
    }

    /// Hex file path as avrdude should see it, `None` when unset or empty
    pub fn hex_target(&self) -> Option<String> {
        if self.operation == Operation::Erase || !self.use_file {
            return None;
        }

        self.hex_file
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
    }
}
