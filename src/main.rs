use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;
use userbase::{Config, Server, users::Users};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("userbase: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> userbase::error::Result<()> {
    let app = userbase::app(&Users::new());
    Server::bind(config.addr)
        .await?
        .with_grace_period(config.grace_period)
        .serve(app)
        .await
}
