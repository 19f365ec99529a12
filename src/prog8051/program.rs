use std::path::PathBuf;
use std::sync::mpsc;

use clap::Args;
use prog8051::{
    Operation, OperationRequest, build_args,
    console::ConsoleView,
    constants::{DEFAULT_BAUD, DEFAULT_CHIP, DEFAULT_PROGRAMMER, DEFAULT_VERBOSITY, TOOL_ROOT},
    error::ProgResult,
    ports::{list_ports, normalize_port},
    spawn_tool,
};
use tracing::warn;

/// Options shared by every avrdude operation
#[derive(Args, Debug, Clone)]
pub(crate) struct CommonOptions {
    /// Serial port
    #[clap(short = 'P', long)]
    port: Option<String>,

    /// Programmer id
    #[clap(short = 'c', long, default_value = DEFAULT_PROGRAMMER)]
    programmer: String,

    /// Chip id
    #[clap(short = 'p', long, default_value = DEFAULT_CHIP)]
    chip: String,

    /// Baud rate, passed to avrdude as is
    #[clap(short, long, default_value = DEFAULT_BAUD)]
    baud: String,

    /// Custom avrdude.conf
    #[clap(short = 'C', long)]
    config: Option<PathBuf>,

    /// avrdude verbosity, 0 to 4
    #[clap(short, long, default_value = DEFAULT_VERBOSITY)]
    verbosity: String,

    /// Force (-F)
    #[clap(short = 'F', long, default_value_t = false)]
    force: bool,

    /// Disable verify (-V)
    #[clap(short = 'V', long, default_value_t = false)]
    no_verify: bool,

    /// Disable flash erase (-D)
    #[clap(short = 'D', long, default_value_t = false)]
    no_erase: bool,

    /// Erase flash and EEPROM (-e)
    #[clap(short = 'e', long, default_value_t = false)]
    erase_eeprom: bool,

    /// Do not write (-n)
    #[clap(short = 'n', long, default_value_t = false)]
    no_write: bool,

    /// Directory holding avrdude and its default config
    #[clap(long, default_value = TOOL_ROOT)]
    tool_root: PathBuf,
}

impl CommonOptions {
    fn request(&self, operation: Operation) -> OperationRequest {
        OperationRequest {
            operation,
            port: normalize_port(self.port.clone()),
            programmer: self.programmer.clone(),
            chip: self.chip.clone(),
            hex_file: None,
            config_override: self.config.clone(),
            tool_root: self.tool_root.clone(),
            force: self.force,
            disable_verify: self.no_verify,
            disable_erase: self.no_erase,
            erase_eeprom: self.erase_eeprom,
            do_not_write: self.no_write,
            use_file: true,
            verbosity: self.verbosity.clone(),
            baud: self.baud.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct WriteOptions {
    /// Hex file to flash; stdin when omitted
    #[clap(value_name = "HEX")]
    hex_file: Option<PathBuf>,

    /// Read the hex image from stdin even if a file was given
    #[clap(long, default_value_t = false)]
    stdin: bool,

    #[command(flatten)]
    common: CommonOptions,
}

impl WriteOptions {
    pub(crate) fn to_request(&self) -> OperationRequest {
        let mut request = self.common.request(Operation::Write);
        request.hex_file = self.hex_file.clone();
        request.use_file = !self.stdin;
        request
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ReadOptions {
    /// Where to store the flash dump; stdout when omitted
    #[clap(value_name = "HEX")]
    hex_file: Option<PathBuf>,

    /// Dump to stdout even if a file was given
    #[clap(long, default_value_t = false)]
    stdout: bool,

    #[command(flatten)]
    common: CommonOptions,
}

impl ReadOptions {
    pub(crate) fn to_request(&self) -> OperationRequest {
        let mut request = self.common.request(Operation::Read);
        request.hex_file = self.hex_file.clone();
        request.use_file = !self.stdout;
        request
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EraseOptions {
    #[command(flatten)]
    common: CommonOptions,
}

impl EraseOptions {
    pub(crate) fn to_request(&self) -> OperationRequest {
        self.common.request(Operation::Erase)
    }
}

/// Run avrdude for `request` and stream its output to the terminal.
///
/// avrdude failures only show up in the output, the command itself succeeds.
pub(crate) fn handle_request(request: OperationRequest) -> ProgResult<()> {
    let args = build_args(&request);
    let (tx, rx) = mpsc::channel();

    let handle = spawn_tool(&request.tool_root, &args, tx);
    let outcome = ConsoleView::new().consume(rx);

    if let Some(handle) = handle {
        handle.join();
    }

    match outcome.success {
        Some(true) => {}
        Some(false) => warn!("{:?} did not complete", request.operation),
        None => warn!("avrdude was not started"),
    }

    Ok(())
}

pub(crate) fn handle_ports() -> ProgResult<()> {
    for port in list_ports() {
        println!("{port}");
    }

    Ok(())
}
