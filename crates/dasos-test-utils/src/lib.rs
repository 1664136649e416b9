//! dasos-test-utils: Scripted fakes and fixture builders shared by the
//! workspace's tests.

pub mod fixtures;
pub mod scripted;

pub use scripted::{ApiCall, Reply, ScriptedApi, ScriptedCatalog};

/// A `http://127.0.0.1:{port}` URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
