mod config;
mod logging;
mod error;
mod http;

mod sun;
mod camera;

use std::{ process::ExitCode, sync::Arc };

use log::{ error, info };

use camera::CameraClient;
use config::Config;
use error::Error;
use http::{ Fetch, HttpFetch };
use logging::Scope;
use sun::SunClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("loading config failed. {e}");
            return ExitCode::FAILURE;
        },
    };

    // initializing logger
    if let Err(e) = logging::init(&config.logging) {
        eprintln!("initializing logger failed. {e}");
        return ExitCode::FAILURE;
    }

    let fetch: Arc<dyn Fetch> = match HttpFetch::new(config.general.timeout) {
        Ok(f) => Arc::new(f),
        Err(e) => {
            error!("{e} ({:?})", e.kind());
            return ExitCode::FAILURE;
        },
    };

    match run(&config, fetch).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e} ({:?})", e.kind());
            ExitCode::FAILURE
        },
    }
}

async fn run(config: &Config, fetch: Arc<dyn Fetch>) -> Result<(), Error> {
    info!("syncing {} with the sun at latitude={} longitude={}", config.camera.host, config.location.latitude, config.location.longitude);

    let camera = CameraClient::new(
        fetch.clone(),
        Scope::new("asecam").with("adapter", "asecam"),
        &config.camera.host,
        &config.camera.username,
        &config.camera.hashed_password,
    )?;
    let sun = SunClient::new(
        fetch,
        config.general.sun_api.clone(),
        Scope::new("sun").with("adapter", config.general.sun_api.host_str().unwrap_or_default()),
    );

    let timings = sun.fetch_timings(&config.location).await?;
    camera.update_day_timings(timings.sunrise, timings.sunset).await?;

    info!("done.");
    Ok(())
}
