//! Host port extraction from compose port mappings

/// Host side of a short-syntax compose port mapping.
///
/// `"3307:3306"` and `"127.0.0.1:3307:3306"` both yield `3307`; a bare
/// container port, a range or anything unparsable yields `None`.
pub fn host_port(mapping: &str) -> Option<u16> {
    let mapping = mapping.trim();
    let mapping = mapping.split('/').next().unwrap_or(mapping);
    let parts: Vec<&str> = mapping.split(':').collect();

    let host = match parts.as_slice() {
        [host, _container] => host,
        [_ip, host, _container] => host,
        _ => return None,
    };

    host.trim().parse::<u16>().ok()
}
