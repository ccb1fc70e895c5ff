use std::net::SocketAddr;
use std::sync::Arc;

use abelana::config::Config;
use abelana::db::{create_pool, MemoryPhotoStore, PgPhotoStore, PhotoStore};
use abelana::google_auth::GoogleTokenVerifier;
use abelana::middleware::{AuthLayer, NotificationLayer, NOTIFICATION_PATH};
use abelana::proto::abelana_server::AbelanaServer;
use abelana::services::{AbelanaServiceImpl, ServiceSettings};
use abelana::storage::{GcsBackend, StorageBackend};
use abelana::token::TokenIssuer;
use abelana::FILE_DESCRIPTOR_SET;

use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abelana=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting abelana gRPC server...");

    let store: Arc<dyn PhotoStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let pool = create_pool(url).await?;
            tracing::info!("Database connection established");
            Arc::new(PgPhotoStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryPhotoStore::new())
        }
    };

    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        config.token_issuer.clone(),
        config.jwt_expiration_secs,
    );

    let notifications = NotificationLayer::new(store.clone(), config.notification_secret.clone());
    match &config.notification_secret {
        Some(_) => {
            tracing::info!("Resized image notifications enabled: path={}", NOTIFICATION_PATH)
        }
        None => tracing::warn!("NOTIFICATION_SECRET not set, photos only publish via AUTO_PUBLISH"),
    }

    let mut service =
        AbelanaServiceImpl::new(store, tokens.clone(), ServiceSettings::from_config(&config));

    if let Some(bucket) = &config.upload_bucket {
        match GcsBackend::new(bucket.clone()).await {
            Ok(backend) => {
                tracing::info!("GCS uploads enabled: bucket={}", backend.bucket());
                service = service.with_storage(Arc::new(backend));
            }
            Err(e) => tracing::error!("Failed to create GCS client: {}", e),
        }
    } else {
        tracing::info!("UPLOAD_BUCKET not set, uploads are disabled");
    }

    match &config.google_client_id {
        Some(client_id) => {
            service = service
                .with_identity_verifier(Arc::new(GoogleTokenVerifier::new(client_id.clone())));
        }
        None => tracing::warn!("GOOGLE_CLIENT_ID not set, sign-in is disabled"),
    }

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any);

    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(TraceLayer::new_for_grpc())
        .layer(cors)
        // Plain HTTP route; sits outside the gRPC-Web translation
        .layer(notifications)
        .layer(tonic_web::GrpcWebLayer::new())
        .layer(AuthLayer::new(tokens))
        .add_service(reflection_service)
        .add_service(AbelanaServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
