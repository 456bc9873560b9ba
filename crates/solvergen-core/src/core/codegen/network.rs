use crate::core::models::project::ServerSettings;

/// Socket address string the generated server binds to.
///
/// IPv6 literals are wrapped in brackets so the result parses as a `SocketAddr`.
pub fn socket_address(server: &ServerSettings) -> String {
    let host = server.bind_address.trim();
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, server.port)
    } else {
        format!("{}:{}", host, server.port)
    }
}

/// Emits the statements that bind the solver's UDP socket.
///
/// Read and write timeouts are disabled: the server blocks until a request arrives.
pub fn emit_network_bootstrap(server: &ServerSettings) -> String {
    let address = socket_address(server);
    format!(
        "    let socket = UdpSocket::bind({address:?}).expect(\"could not bind solver socket\");
    socket
        .set_read_timeout(None)
        .expect(\"set_read_timeout call failed\");
    socket
        .set_write_timeout(None)
        .expect(\"set_write_timeout call failed\");
    println!(\"Server started and listening at {{}}\", {address:?});
"
    )
}
