use axum::{
    body::Body,
    http::{
        header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
        HeaderValue, Request,
    },
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Wraps a router with the layers every service shares: request tracing,
/// CORS for the given origins and response compression.
///
/// An origin of `*` allows every origin.
///
/// # Errors
///
/// Returns an error if one of the origins is not a valid header value.
pub fn with_common_layers(
    app: Router,
    allowed_origins: &[String],
) -> Result<Router, axum::http::header::InvalidHeaderValue> {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;

        AllowOrigin::list(origins)
    };

    let trace_layer = TraceLayer::new_for_http().on_request(
        |request: &Request<Body>, _: &tracing::Span| {
            tracing::info!(
                "received request: {method} {uri}",
                method = request.method(),
                uri = request.uri()
            );
        },
    );

    let cors_layer = CorsLayer::new()
        .allow_headers([
            ACCEPT,
            ACCEPT_ENCODING,
            AUTHORIZATION,
            CONTENT_TYPE,
            ORIGIN,
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_origin(allow_origin);

    let compression_layer = CompressionLayer::new().gzip(true).deflate(true);

    Ok(app
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(compression_layer))
}

/// Serves the router on `addr` until Ctrl+C or SIGTERM is received.
///
/// # Errors
///
/// Returns an error if the listener cannot bind to `addr` or the server
/// fails while accepting connections.
pub async fn run_app(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::warn!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let origins = vec!["bad\norigin".to_string()];

        assert!(with_common_layers(app(), &origins).is_err());
    }

    #[tokio::test]
    async fn test_allowed_origin_is_echoed() {
        let origins = vec!["http://localhost:5173".to_string()];
        let app = with_common_layers(app(), &origins).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_wildcard_origin_allows_any_origin() {
        let origins = vec!["http://localhost:5173".to_string(), "*".to_string()];
        let app = with_common_layers(app(), &origins).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(ORIGIN, "http://anywhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_cors_header() {
        let app = with_common_layers(app(), &[]).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ping")
                    .header(ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
