//! jobtracker-server

use anyhow::{anyhow, Result};

use axum::{http::HeaderName, routing::get, Router};
use axum_server::Handle;
use clap::{Parser, Subcommand};
use jobtracker_server::{
    app_state::AppState,
    db, import,
    docs::ApiDoc,
    middleware::{self, request_ulid::MakeRequestUlid, runtime},
    router,
    routes::fallback::notfound_404,
    settings::{Settings, StorageBackend},
    setups::{
        local::{InMemoryApplicationStore, LocalSetup},
        prod::{PgApplicationStore, ProdSetup},
        ServerSetup,
    },
    telemetry::{setup_metrics_recorder, setup_tracing},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{
    future::ready,
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    process::exit,
    time::Duration,
};
use tokio::signal::{
    self,
    unix::{signal, SignalKind},
};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer, ServiceBuilderExt,
};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Request identifier field.
const REQUEST_ID: &str = "x-request-id";

#[derive(Debug, Parser)]
#[command(name = "jobtracker-server", about = "Track job applications over HTTP")]
struct Cli {
    /// Path to the settings file
    #[arg(long)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Load a JSON export of job applications into storage
    Import {
        /// The export file
        file: PathBuf,
    },
    /// Classify a JSON export of emails and store the job-related ones
    ImportEmails {
        /// The export file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (stdout_writer, _stdout_guard) = tracing_appender::non_blocking(io::stdout());

    let settings = Settings::load(cli.config_path)?;

    setup_tracing(stdout_writer, settings.server.environment)?;

    info!(
        subject = "app_settings",
        category = "init",
        "starting with settings: {:?}",
        settings,
    );

    let command = cli.command.unwrap_or(Command::Serve);

    match settings.storage.backend {
        StorageBackend::Postgres => {
            let db_pool =
                db::pool(&settings.database.url, settings.database.connect_timeout).await?;
            db::ensure_schema(&db_pool).await?;

            run::<ProdSetup>(command, settings, PgApplicationStore::new(db_pool)).await
        }
        StorageBackend::Memory => {
            run::<LocalSetup>(command, settings, InMemoryApplicationStore::default()).await
        }
    }
}

async fn run<S: ServerSetup>(
    command: Command,
    settings: Settings,
    store: S::ApplicationStore,
) -> Result<()> {
    match command {
        Command::Serve => serve_all::<S>(settings, store).await,
        Command::Import { file } => {
            let imported = import::import_file(&store, &file).await?;
            info!(
                subject = "import",
                category = "cli",
                imported,
                "imported job applications from {}",
                file.display()
            );
            Ok(())
        }
        Command::ImportEmails { file } => {
            let today = chrono::Local::now().date_naive();
            let imported = import::import_email_file(&store, &file, today).await?;
            info!(
                subject = "import",
                category = "cli",
                imported,
                "imported job applications from emails in {}",
                file.display()
            );
            Ok(())
        }
    }
}

async fn serve_all<S: ServerSetup>(settings: Settings, store: S::ApplicationStore) -> Result<()> {
    let recorder_handle = setup_metrics_recorder()?;
    let cancellation_token = CancellationToken::new();

    let metrics_server = tokio::spawn(serve_metrics(
        recorder_handle,
        settings.clone(),
        cancellation_token.clone(),
    ));

    let app_server = tokio::spawn(serve_app::<S>(
        settings,
        AppState::new(store),
        cancellation_token.clone(),
    ));

    tokio::spawn(async move {
        capture_sigterm().await;

        cancellation_token.cancel();
        println!("\nCtrl+C received, shutting down. Press Ctrl+C again to force shutdown.");

        capture_sigterm().await;

        exit(130)
    });

    let (metrics, app) = tokio::try_join!(metrics_server, app_server)?;

    if let Err(e) = metrics {
        error!("metrics server crashed: {}", e);
    }

    if let Err(e) = app {
        error!("app server crashed: {}", e);
    }

    Ok(())
}

async fn serve_metrics(
    recorder_handle: PrometheusHandle,
    settings: Settings,
    token: CancellationToken,
) -> Result<()> {
    let metrics_router = Router::new()
        .route("/metrics", get(move || ready(recorder_handle.render())))
        .fallback(notfound_404);

    let router = metrics_router.layer(CatchPanicLayer::custom(runtime::catch_panic));

    let (server, _) = serve("Metrics", router, settings.server.metrics_port).await?;

    token.cancelled().await;
    server.graceful_shutdown(None);

    Ok(())
}

async fn serve_app<S: ServerSetup>(
    settings: Settings,
    app_state: AppState<S>,
    token: CancellationToken,
) -> Result<()> {
    let req_id = HeaderName::from_static(REQUEST_ID);

    let router = router::setup_app_router(app_state)
        .route_layer(axum::middleware::from_fn(middleware::metrics::track))
        .layer(TraceLayer::new_for_http())
        // Set and propagate "x-request-id" (as a ulid) per request.
        .layer(
            ServiceBuilder::new()
                .set_request_id(req_id.clone(), MakeRequestUlid)
                .propagate_request_id(req_id),
        )
        .layer(TimeoutLayer::new(Duration::from_millis(
            settings.server.timeout_ms,
        )))
        // Catches runtime panics and converts them into
        // `500 Internal Server` responses.
        .layer(CatchPanicLayer::custom(runtime::catch_panic))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let (server, _) = serve("Application", router, settings.server.port).await?;

    token.cancelled().await;
    server.graceful_shutdown(Some(Duration::from_secs(10)));

    Ok(())
}

async fn serve(name: &str, app: Router, port: u16) -> Result<(Handle, SocketAddr)> {
    let bind_addr: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
    info!(
        subject = "app_start",
        category = "init",
        "{} server listening on {}",
        name,
        bind_addr
    );

    let handle = Handle::new();

    tokio::spawn({
        let handle = handle.clone();
        async move {
            axum_server::bind(bind_addr)
                .handle(handle)
                .serve(app.into_make_service_with_connect_info::<SocketAddr>())
                .await
        }
    });

    let addr = handle
        .listening()
        .await
        .ok_or_else(|| anyhow!("{name} server failed to bind {bind_addr}"))?;

    Ok((handle, addr))
}

/// Captures and waits for system signals.
async fn capture_sigterm() {
    #[cfg(unix)]
    let term = async {
        signal(SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await
    };

    #[cfg(not(unix))]
    let term = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        _ = term => {}
    };
}
