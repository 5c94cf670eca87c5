use clap::Parser;
use std::net::SocketAddr;

/// IPL win-probability predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Path to the trained pipeline artifact (JSON)
    #[arg(long, env = "MODEL_PATH", default_value = "models/pipe.json")]
    pub model_path: String,

    /// Address the prediction form is served on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8501")]
    pub listen_addr: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.model_path.trim().is_empty() {
            anyhow::bail!("model_path must not be empty");
        }
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr is not a valid socket address: {}", self.listen_addr);
        }
        Ok(())
    }
}
