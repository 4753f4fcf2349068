use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use slack_httpcat::application::{config::RuntimeConfig, startup};
use tokio::{
    net::TcpListener,
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::timeout,
};

pub(crate) struct ServerHandle {
    pub(crate) addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl ServerHandle {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub(crate) async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = self.join.await;
    }
}

pub(crate) async fn spawn_server(slack_api_base_url: String) -> ServerHandle {
    spawn_server_with(slack_api_base_url, |_: &mut RuntimeConfig| {}).await
}

pub(crate) async fn spawn_server_with(
    slack_api_base_url: String,
    configure: impl FnOnce(&mut RuntimeConfig),
) -> ServerHandle {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("listener should bind");
    let addr = listener
        .local_addr()
        .expect("listener should expose local addr");

    let mut config = RuntimeConfig::for_test(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        addr.port(),
        slack_api_base_url,
    );
    configure(&mut config);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        let _ = startup::run_with_listener(listener, config, async {
            let _ = shutdown_rx.await;
        })
        .await;
    });

    ServerHandle {
        addr,
        shutdown: Some(shutdown_tx),
        join,
    }
}

/// A `chat.postMessage` call captured by [`MockSlack`].
#[derive(Debug)]
pub(crate) struct PostedMessage {
    pub(crate) authorization: Option<String>,
    pub(crate) body: Value,
}

pub(crate) struct MockSlack {
    pub(crate) base_url: String,
    posted: mpsc::UnboundedReceiver<PostedMessage>,
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
}

impl MockSlack {
    pub(crate) async fn next_message(&mut self) -> PostedMessage {
        timeout(Duration::from_secs(2), self.posted.recv())
            .await
            .expect("chat.postMessage request should arrive")
            .expect("mock slack channel should stay open")
    }

    pub(crate) async fn assert_no_message(&mut self) {
        let next = timeout(Duration::from_millis(300), self.posted.recv()).await;
        assert!(next.is_err(), "unexpected chat.postMessage: {next:?}");
    }

    pub(crate) async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = self.join.await;
    }
}

pub(crate) async fn spawn_mock_slack() -> MockSlack {
    spawn_mock_slack_with_status(StatusCode::OK).await
}

pub(crate) async fn spawn_mock_slack_with_status(status: StatusCode) -> MockSlack {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("mock listener should bind");
    let addr = listener
        .local_addr()
        .expect("mock listener should expose local addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let (posted_tx, posted_rx) = mpsc::unbounded_channel::<PostedMessage>();

    let app = Router::new().route(
        "/api/chat.postMessage",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let posted_tx = posted_tx.clone();
            async move {
                let authorization = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned);
                let _ = posted_tx.send(PostedMessage {
                    authorization,
                    body,
                });
                (status, Json(json!({ "ok": status.is_success() })))
            }
        }),
    );
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    MockSlack {
        base_url: format!("http://{addr}/api"),
        posted: posted_rx,
        shutdown: Some(shutdown_tx),
        join,
    }
}

pub(crate) fn mention_event(channel: &str, text: &str) -> Value {
    json!({
        "token": "verification-token",
        "team_id": "T123",
        "type": "event_callback",
        "event_id": "Ev123",
        "event": {
            "type": "app_mention",
            "user": "U999",
            "channel": channel,
            "text": format!("<@U123> {text}"),
            "blocks": [{
                "type": "rich_text",
                "block_id": "b1",
                "elements": [{
                    "type": "rich_text_section",
                    "elements": [
                        { "type": "user", "user_id": "U123" },
                        { "type": "text", "text": text }
                    ]
                }]
            }]
        }
    })
}
