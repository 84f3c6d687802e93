use clap::Parser;

/// Operator console for the match simulation service
#[derive(Parser, Debug, Clone)]
#[command(name = "match-console", version, about)]
pub struct Config {
    /// Base URL of the simulation backend's admin API
    #[arg(
        long,
        env = "BACKEND_API_URL",
        default_value = "http://localhost:8080/api"
    )]
    pub backend_api_url: String,

    /// Bearer token attached to every backend request (issued by the session layer)
    #[arg(long, env = "ADMIN_API_TOKEN")]
    pub admin_api_token: Option<String>,

    /// Console listen address
    #[arg(long, env = "CONSOLE_ADDR", default_value = "0.0.0.0:8090")]
    pub console_addr: String,

    /// Per-request timeout for backend calls, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.backend_api_url.starts_with("http://")
            && !self.backend_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "backend_api_url must be an http(s) URL, got '{}'",
                self.backend_api_url
            );
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }
}
