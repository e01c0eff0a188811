use std::net::SocketAddr;
use std::sync::Once;
use techspace_shorts::{AggregatorError, FeedRetriever, FetchConfig, Fetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::info;

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .try_init()
            .ok();
    });
}

const FEED: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"rockets when:1d" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Booster caught by tower - Orbit Weekly</title>
      <link>https://news.google.com/rss/articles/orb1</link>
      <pubDate>Sat, 17 Oct 2026 06:00:00 GMT</pubDate>
      <source url="https://www.orbitweekly.test">Orbit Weekly</source>
    </item>
  </channel>
</rss>"##;

/// Serve one HTTP/1.1 response without a Content-Length, closing the connection after the body.
async fn serve_once(status_line: &'static str, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/rss+xml\r\nConnection: close\r\n\r\n",
                status_line
            );
            // The client may hang up early on errors
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(body.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    addr
}

fn fetcher_for(addr: SocketAddr, max_feed_size_mb: usize) -> Fetcher {
    let config = FetchConfig {
        base_url: format!("http://{}/rss/search", addr),
        timeout_seconds: 5,
        max_feed_size_mb,
        ..FetchConfig::default()
    };
    Fetcher::new(config).unwrap()
}

#[tokio::test]
async fn test_retrieve_parses_served_feed() {
    init_tracing();

    let addr = serve_once("200 OK", FEED.to_string()).await;
    let items = fetcher_for(addr, 10).retrieve("rockets").await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Booster caught by tower - Orbit Weekly");
    assert_eq!(items[0].source.as_deref(), Some("Orbit Weekly"));
    info!("Retrieved {:?}", items[0]);
}

#[tokio::test]
async fn test_error_status_fails_the_topic() {
    init_tracing();

    let addr = serve_once("503 Service Unavailable", "try later".to_string()).await;
    let err = fetcher_for(addr, 10).retrieve("rockets").await.unwrap_err();

    match err {
        AggregatorError::FetchFailed { query, reason } => {
            assert_eq!(query, "rockets");
            assert!(reason.contains("503"), "unexpected reason: {}", reason);
        }
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_feed_body_fails_the_topic() {
    init_tracing();

    let page = "<html><body>Our systems have detected unusual traffic</body></html>";
    let addr = serve_once("200 OK", page.to_string()).await;
    let err = fetcher_for(addr, 10).retrieve("rockets").await.unwrap_err();

    assert!(err.is_fetch_error());
    match err {
        AggregatorError::FetchFailed { reason, .. } => assert!(reason.contains("not an RSS or Atom feed")),
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_body_over_size_limit_without_content_length() {
    init_tracing();

    let body = format!("<rss>{}</rss>", " ".repeat(1024 * 1024 + 512));
    let addr = serve_once("200 OK", body).await;
    let err = fetcher_for(addr, 1).retrieve("rockets").await.unwrap_err();

    assert!(matches!(err, AggregatorError::FeedTooLarge { size_mb: 1 }), "got {:?}", err);
}
