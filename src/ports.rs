use tracing::debug;

use crate::constants::NO_PORTS_FOUND;
use crate::error::{ProgError, ProgResult};

/// Names of the serial ports currently present on the system
pub fn available_port_names() -> ProgResult<Vec<String>> {
    serialport::available_ports()
        .map(|ports| ports.into_iter().map(|p| p.port_name).collect())
        .map_err(|e| ProgError::PortEnumeration(format!("{:?}", e)))
}

/// Port choices to offer the user. Falls back to the single
/// `<no ports found>` placeholder when nothing could be listed.
pub fn list_ports() -> Vec<String> {
    let ports = match available_port_names() {
        Ok(ports) => ports,
        Err(e) => {
            debug!("{}", e);
            Vec::new()
        }
    };

    with_placeholder(ports)
}

pub(crate) fn with_placeholder(ports: Vec<String>) -> Vec<String> {
    if ports.is_empty() {
        vec![NO_PORTS_FOUND.to_owned()]
    } else {
        ports
    }
}

/// Selecting the placeholder means no port was chosen
pub fn normalize_port(port: Option<String>) -> Option<String> {
    port.filter(|p| !p.is_empty() && p != NO_PORTS_FOUND)
}
