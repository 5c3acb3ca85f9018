/**
 * This is the main entrypoint for the `transcription_api` service.
 *
 * The service accepts audio uploads, records a placeholder transcription for
 * each one and exposes the transcriptions and their segments for reading.
 * Recognition itself happens elsewhere; whatever performs it fills in the
 * `segments` table.
 */
mod config;
mod context;
mod db;
mod error;
#[cfg(test)]
mod fakes;
mod files;
mod handlers;
mod routes;

use config::Config;
use context::AppContext;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    th_app::init_tracing();

    let ctx = th_app::create_app_context::<AppContext, Config>().await?;

    let addr = ctx.config.bind_addr()?;
    let origins = ctx.config.allowed_origins();

    let app = th_axum::with_common_layers(routes::router(ctx), &origins)?;

    th_axum::run_app(app, addr).await?;

    Ok(())
}
