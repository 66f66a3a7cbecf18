//! In-process stand-ins for the third-party services.

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Path prefix the fake MapServer is mounted under
pub const MAP_SERVER_PATH: &str = "/arcgis/rest/services/Planning/MapServer";

/// Number of requests an upstream has received
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Serve `router` on an ephemeral local port; returns its base URL.
pub async fn spawn_upstream(router: Router) -> (String, Hits) {
    let hits = Hits::default();
    let counter = hits.clone();
    let router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
        let counter = counter.clone();
        async move {
            counter.0.fetch_add(1, Ordering::SeqCst);
            next.run(req).await
        }
    }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test upstream");
    let addr = listener.local_addr().expect("test upstream address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    (format!("http://{}", addr), hits)
}
