use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Gateway configuration
///
/// Loaded once at startup and treated as immutable afterwards. Values
/// layer as: serde defaults, then an optional `image-gate` config file,
/// then `IMAGE_GATE_*` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upload destination bucket (required)
    #[serde(default)]
    pub bucket: String,

    /// Key prefix for both the image object and its result object
    #[serde(default)]
    pub key_prefix: String,

    /// AWS region; falls back to the ambient AWS environment when unset
    #[serde(default)]
    pub region: Option<String>,

    /// Custom S3 endpoint, for S3-compatible stores like MinIO
    #[serde(default)]
    pub s3_endpoint: Option<String>,

    /// Custom Rekognition endpoint
    #[serde(default)]
    pub rekognition_endpoint: Option<String>,

    /// Serve the static upload form on `GET /`
    #[serde(default)]
    pub view_index: bool,

    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Maximum accepted request body size in MB
    #[serde(default = "default_max_upload_size_mb")]
    pub max_upload_size_mb: usize,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            bucket: String::new(),
            key_prefix: String::new(),
            region: None,
            s3_endpoint: None,
            rekognition_endpoint: None,
            view_index: false,
            log_level: default_log_level(),
            max_upload_size_mb: default_max_upload_size_mb(),
        }
    }
}

impl GateConfig {
    /// Load configuration from the optional config file and environment
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("image-gate").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("IMAGE_GATE").separator("__"));

        let config: GateConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the gateway cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bucket.is_empty() {
            anyhow::bail!("bucket is required (set IMAGE_GATE_BUCKET)");
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get max upload size in bytes
    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_upload_size_mb() -> usize {
    10
}
