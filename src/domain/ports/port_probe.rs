//! PortProbe port - checks whether a host port can be bound

pub trait PortProbe: Send + Sync {
    fn is_free(&self, port: u16) -> bool;
}
