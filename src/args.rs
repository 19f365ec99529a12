use std::path::Path;

use tracing::debug;

use crate::constants::{DEFAULT_CONFIG_FILE, NO_PORTS_FOUND, STDIO_SENTINEL};
use crate::request::OperationRequest;

/// Path passed to `-C` when the user did not pick a config file
pub fn default_config_path(tool_root: &Path) -> String {
    tool_root
        .join(DEFAULT_CONFIG_FILE)
        .to_string_lossy()
        .into_owned()
}

/// Number of `-v` tokens for a verbosity selection; unknown values give none
fn verbosity_level(verbosity: &str) -> usize {
    match verbosity {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        "4" => 4,
        _ => 0,
    }
}

/// Translate a request into the avrdude argument vector.
///
/// Never fails: missing or malformed inputs just leave their tokens out.
/// Token order is `-C`, `-v`..., `-F -V -D -e -n`, `-P`, `-b`, `-c`, `-p`
/// and finally the `-U` memory operation.
pub fn build_args(request: &OperationRequest) -> Vec<String> {
    let config = request
        .config_override
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| default_config_path(&request.tool_root));

    let mut args = vec!["-C".to_owned(), config];

    args.extend(std::iter::repeat_n(
        "-v".to_owned(),
        verbosity_level(&request.verbosity),
    ));

    let flags = [
        (request.force, "-F"),
        (request.disable_verify, "-V"),
        (request.disable_erase, "-D"),
        (request.effective_erase_eeprom(), "-e"),
        (request.do_not_write, "-n"),
    ];
    args.extend(
        flags
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, flag)| (*flag).to_owned()),
    );

    if let Some(port) = request
        .port
        .as_deref()
        .filter(|p| !p.is_empty() && *p != NO_PORTS_FOUND)
    {
        args.push("-P".to_owned());
        args.push(port.to_owned());
    }

    if !request.baud.is_empty() {
        args.push("-b".to_owned());
        args.push(request.baud.clone());
    }

    if !request.programmer.is_empty() {
        args.push("-c".to_owned());
        args.push(request.programmer.clone());
    }
    if !request.chip.is_empty() {
        args.push("-p".to_owned());
        args.push(request.chip.clone());
    }

    let target = request
        .hex_target()
        .unwrap_or_else(|| STDIO_SENTINEL.to_owned());
    if let Some(token) = request.operation.flash_token(&target) {
        args.push(token);
    }

    debug!("Built avrdude arguments {:?}", args);
    args
}
