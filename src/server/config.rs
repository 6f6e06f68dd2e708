//! Server configuration

/// Configuration for the HTTP surface
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub bind_address: String,
    /// Port for the API server
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8900,
        }
    }
}

impl ServerConfig {
    /// Socket address string, e.g. `127.0.0.1:8900`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}
