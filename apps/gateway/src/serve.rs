//! Gateway serve entrypoint: build clients, provision, bind, serve.

use crate::{GatewayConfig, router::router, state::AppState};
use anyhow::Result;
use julep::{Julep, Platform};
use std::{future::IntoFuture, io, sync::Arc, time::Duration};
use tokio::{sync::oneshot, task::JoinHandle};
use weather::{OpenWeather, Weather};

/// A running tour gateway.
///
/// Provisioning has already happened by the time this exists. Dropping the
/// handle leaves the server running until the runtime stops; call
/// [`shutdown`](Self::shutdown) to drain in-flight tours first.
pub struct ServeHandle {
    /// The port the gateway is listening on.
    pub port: u16,
    stop: oneshot::Sender<()>,
    server: JoinHandle<io::Result<()>>,
}

impl ServeHandle {
    /// Stop accepting requests and wait for in-flight tours to finish.
    pub async fn shutdown(self) -> Result<()> {
        // The server may already have exited on its own.
        let _ = self.stop.send(());
        self.server.await??;
        Ok(())
    }
}

/// Build the weather client and Julep client, then provision the tour
/// agent and task.
pub async fn build_state(config: &GatewayConfig) -> Result<AppState<OpenWeather, Julep>> {
    let weather_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.weather.timeout_secs))
        .build()?;
    let weather = OpenWeather::custom(
        weather_client,
        &config.weather.api_key,
        &config.weather.endpoint,
    )
    .with_units(&config.weather.units);

    let julep = Julep::custom(
        reqwest::Client::new(),
        &config.julep.api_key,
        &config.julep.base_url,
    )?;
    let provisioned = tour::provision(&julep, &config.julep.model).await?;
    tracing::info!(
        "tours run as agent {} with task {}",
        provisioned.agent.id,
        provisioned.task.id
    );

    Ok(AppState::new(
        weather,
        Arc::new(julep),
        provisioned,
        config.poll_policy(),
    ))
}

/// Provision from config and start serving on the configured address.
pub async fn serve_with_config(config: &GatewayConfig) -> Result<ServeHandle> {
    let state = build_state(config).await?;
    serve(state, &config.bind_address()).await
}

/// Bind the axum server and start serving `state`.
///
/// The server runs in a spawned task; call `handle.shutdown()` to stop it.
pub async fn serve<W: Weather + 'static, P: Platform + 'static>(
    state: AppState<W, P>,
    bind: &str,
) -> Result<ServeHandle> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("gateway listening on {bind} (port {port})");

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stopped.await;
                tracing::info!("stopping gateway, draining in-flight tours");
            })
            .into_future(),
    );

    Ok(ServeHandle { port, stop, server })
}
