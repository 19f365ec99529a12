/// Directory probed for the avrdude executable and its default config
pub const TOOL_ROOT: &str = "avrdude";
pub const TOOL_NAME: &str = "avrdude";
pub const DEFAULT_CONFIG_FILE: &str = "avrdude.conf";

pub const DEFAULT_PROGRAMMER: &str = "stk500v1";
pub const DEFAULT_CHIP: &str = "at89s51";
pub const DEFAULT_BAUD: &str = "19200";
pub const DEFAULT_VERBOSITY: &str = "0";

/// Placeholder shown when serial port enumeration comes back empty
pub const NO_PORTS_FOUND: &str = "<no ports found>";

/// Stands in for a file path when avrdude should use stdin/stdout
pub const STDIO_SENTINEL: &str = "-";

pub(crate) const FLASH_WRITE_PREFIX: &str = "-Uflash:w:";
pub(crate) const FLASH_READ_PREFIX: &str = "-Uflash:r:";
pub(crate) const HEX_FORMAT_SUFFIX: &str = ":i";

pub const OUTPUT_MAX_CHARS: usize = 200_000;
pub const OUTPUT_RETAIN_CHARS: usize = 180_000;

pub(crate) const PIPE_READ_CHUNK: usize = 1024;
pub(crate) const SPINNER_TICK_MS: u64 = 120;
