//! In-process stub server for exercising [`ApiClient`](crate::ApiClient)
//! against real HTTP.

use axum::Router;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral loopback port and returns the API base
/// address (`http://127.0.0.1:<port>/api`). Routes must include the `/api`
/// prefix.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub listener address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{addr}/api")
}
