//! Port probes

use std::collections::BTreeSet;
use std::net::{Ipv4Addr, TcpListener};

use crate::domain::ports::PortProbe;

/// Considers a port free when a listener can be bound on all interfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpPortProbe;

impl PortProbe for TcpPortProbe {
    fn is_free(&self, port: u16) -> bool {
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)) {
            Ok(_listener) => true,
            Err(e) => {
                tracing::debug!(port, error = %e, "port is busy on this host");
                false
            }
        }
    }
}

/// Probe with a fixed set of busy ports; every other port is free.
///
/// With no busy ports this disables host probing entirely.
#[derive(Debug, Default, Clone)]
pub struct StaticPortProbe {
    busy: BTreeSet<u16>,
}

impl StaticPortProbe {
    pub fn all_free() -> Self {
        Self::default()
    }

    pub fn with_busy(ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            busy: ports.into_iter().collect(),
        }
    }
}

impl PortProbe for StaticPortProbe {
    fn is_free(&self, port: u16) -> bool {
        !self.busy.contains(&port)
    }
}
