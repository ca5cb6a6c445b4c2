use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::bail;
use engine_logging::{engine_error, engine_info, LogDestination};
use postforge_engine::{ApiSettings, EngineConfig, EngineEvent, EngineHandle};

const DEFAULT_API_ROOT: &str = "http://127.0.0.1:8000/api/v1";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Service doctor: pings `/health` through the same transport the UI
/// flows use and reports the service status.
fn main() -> anyhow::Result<()> {
    engine_logging::initialize(LogDestination::Both);

    let api_root =
        std::env::var("POSTFORGE_API_ROOT").unwrap_or_else(|_| DEFAULT_API_ROOT.to_string());
    let download_dir = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("downloads");

    let api = ApiSettings {
        api_root: api_root.clone(),
        ..ApiSettings::default()
    };
    let engine = match EngineHandle::new(EngineConfig { api, download_dir }) {
        Ok(engine) => engine,
        Err(err) => bail!("failed to start engine: {err}"),
    };

    engine_info!("checking service health at {}", api_root);
    engine.check_health();

    let deadline = Instant::now() + HEALTH_TIMEOUT;
    loop {
        if let Some(event) = engine.try_recv() {
            if let EngineEvent::HealthChecked { result } = event {
                match result {
                    Ok(payload) => {
                        let status = payload
                            .get("status")
                            .and_then(|value| value.as_str())
                            .unwrap_or("unknown");
                        println!("service status: {status}");
                        return Ok(());
                    }
                    Err(err) => {
                        engine_error!("health check failed: {}", err);
                        bail!("health check failed: {}", err.message);
                    }
                }
            }
        }
        if Instant::now() >= deadline {
            bail!("health check timed out after {HEALTH_TIMEOUT:?}");
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}
