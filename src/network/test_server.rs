//! In-process HTTP stub for client and actor tests

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned answer for requests whose request line starts with `prefix`
#[derive(Clone)]
pub struct Route {
    pub prefix: &'static str,
    pub status: &'static str,
    pub body: &'static str,
}

pub fn route(prefix: &'static str, status: &'static str, body: &'static str) -> Route {
    Route { prefix, status, body }
}

/// Raw requests seen by the stub, in arrival order
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Serve `routes` until the test ends. Unknown requests get a 404.
pub async fn serve(routes: Vec<Route>) -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));

    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            let log = task_log.clone();
            tokio::spawn(async move {
                handle(socket, &routes, &log).await;
            });
        }
    });

    (format!("http://{}/api", addr), log)
}

/// Lines like `GET /api/words HTTP/1.1`, in arrival order
pub fn request_lines(log: &RequestLog) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .map(|r| r.lines().next().unwrap_or_default().to_string())
        .collect()
}

async fn handle(mut socket: TcpStream, routes: &[Route], log: &RequestLog) {
    let raw = read_request(&mut socket).await;
    let line = raw.lines().next().unwrap_or_default().to_string();
    log.lock().unwrap().push(raw);

    let (status, body) = routes
        .iter()
        .find(|r| line.starts_with(r.prefix))
        .map(|r| (r.status, r.body))
        .unwrap_or(("404 Not Found", ""));

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let content_length = text[..head_end]
                .lines()
                .find_map(|l| {
                    l.to_ascii_lowercase()
                        .strip_prefix("content-length:")
                        .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);
            if raw.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&raw).to_string()
}
