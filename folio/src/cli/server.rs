use std::process::ExitCode;

pub async fn run() -> ExitCode {
    match server::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("server stopped: {e}");
            eprintln!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}
