// Runtime configuration handed from infrastructure to the other layers

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub scanner_token: Option<String>,
    pub public_base_url: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub holders_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrRenderConfig {
    pub module_size: u32,
    pub dark_color: [u8; 3],
    pub light_color: [u8; 3],
}

impl Default for QrRenderConfig {
    fn default() -> Self {
        Self {
            module_size: 10,
            dark_color: [0x71, 0x00, 0x14],
            light_color: [0xff, 0xff, 0xff],
        }
    }
}
