//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use admatch::config::ServiceConfig;
use admatch::http::HttpServer;
use admatch::lifecycle::Shutdown;
use admatch::PlatformCatalog;
use tokio::net::TcpListener;

pub const ADMIN_KEY: &str = "integration-admin-key";

pub const FEED: &str = "Яндекс.Директ:/ru\n\
    Ревдинский рабочий:/ru/svrd/revda,/ru/svrd/pervik\n\
    Газета уральских москвичей:/ru/msk,/ru/permobl,/ru/chelobl\n\
    Крутая реклама:/ru/svrd\n";

pub struct TestServer {
    pub base_url: String,
    pub catalog: Arc<PlatformCatalog>,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        let _ = self.handle.await;
    }
}

/// A config with admin enabled, suitable for tests.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.into();
    config
}

/// Start a server on an ephemeral port.
pub async fn spawn_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    let catalog = Arc::new(PlatformCatalog::new());
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(config, Arc::clone(&catalog));

    let handle = tokio::spawn(async move {
        server.run(listener, receiver).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        catalog,
        shutdown,
        handle,
    }
}
