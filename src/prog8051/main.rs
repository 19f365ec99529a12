use clap::Parser;
use prog8051::error::ProgResult;
use program::{EraseOptions, ReadOptions, WriteOptions, handle_ports, handle_request};

mod program;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
enum Cli {
    /// Flash a hex file into the chip
    #[command(name = "write", alias = "w")]
    Write(WriteOptions),

    /// Read the chip's flash into a hex file
    #[command(name = "read", alias = "r")]
    Read(ReadOptions),

    /// Erase flash and EEPROM
    #[command(name = "erase", alias = "e")]
    Erase(EraseOptions),

    /// List serial ports a programmer could be attached to
    #[command(name = "ports", alias = "l")]
    Ports,
}

fn main() -> ProgResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli {
        Cli::Write(opts) => handle_request(opts.to_request()),
        Cli::Read(opts) => handle_request(opts.to_request()),
        Cli::Erase(opts) => handle_request(opts.to_request()),
        Cli::Ports => handle_ports(),
    }
}
