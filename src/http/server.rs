//! Connection loop.
//!
//! # Responsibilities
//! - Accept one connection at a time
//! - Drive parse → route → handle → respond → close for it
//! - Convert every failure into a response or a silent close
//! - Stop accepting when the shutdown signal fires
//!
//! # Design Decisions
//! - Strictly sequential: the next accept waits until the current
//!   connection is closed, so the store needs no locking
//! - Shutdown is only observed while waiting in accept; an in-flight
//!   connection always completes
//! - Empty, truncated and I/O-failed requests get no response because
//!   the framing is already lost

use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tracing::Instrument;

use crate::config::ServerConfig;
use crate::handlers;
use crate::http::error::ParseError;
use crate::http::parser::read_request;
use crate::http::{Request, Response};
use crate::net::{Connection, ConnectionState, Listener};
use crate::observability::metrics;
use crate::routing::{Endpoint, Router};
use crate::store::RecordStore;

/// Back-off after a failed accept so a persistent error does not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// HTTP server for player records.
#[derive(Debug)]
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    store: Box<dyn RecordStore>,
}

impl HttpServer {
    /// Create a server owning `store` for its whole lifetime.
    pub fn new(config: ServerConfig, store: Box<dyn RecordStore>) -> Self {
        Self {
            config,
            router: Router::players(),
            store,
        }
    }

    /// Run the loop until `shutdown` fires. The store is dropped on return.
    pub async fn run(
        mut self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown requested, no longer accepting");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => self.serve_connection(stream, peer).await,
                    Err(e) => {
                        tracing::warn!(error = %e, "Accept failed");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Process one connection from accept to close.
    pub async fn serve_connection(&mut self, stream: TcpStream, peer: SocketAddr) {
        metrics::record_connection();
        let mut conn = Connection::accepted(peer);
        let span = tracing::info_span!("connection", id = %conn.id(), peer = %peer);

        self.handle_connection(&mut conn, stream).instrument(span).await;
    }

    async fn handle_connection(&mut self, conn: &mut Connection, stream: TcpStream) {
        let start = Instant::now();
        let mut reader = BufReader::new(stream);

        advance(conn, ConnectionState::Parsing);
        let request = match read_request(&mut reader, &self.config.limits).await {
            Ok(request) => request,
            Err(e) => {
                if let Some(response) = error_response(&e) {
                    tracing::warn!(error = %e, status = response.status.code(), "Rejecting request");
                    advance(conn, ConnectionState::Responding);
                    send(reader.get_mut(), &response).await;
                    metrics::record_request("-", "rejected", response.status.code(), start);
                } else {
                    match &e {
                        ParseError::EmptyRequest => tracing::debug!("Peer closed without a request"),
                        _ => tracing::warn!(error = %e, "Dropping connection"),
                    }
                    metrics::record_dropped(e.reason());
                }
                conn.close();
                return;
            }
        };

        advance(conn, ConnectionState::Routing);
        let endpoint = self.router.lookup(&request.method, &request.path);
        tracing::info!(
            method = %request.method,
            path = %request.path,
            route = endpoint.name(),
            "Request received"
        );

        advance(conn, ConnectionState::Handling);
        let response = self.dispatch(endpoint, &request).await;

        advance(conn, ConnectionState::Responding);
        send(reader.get_mut(), &response).await;
        metrics::record_request(
            request.method.label(),
            endpoint.name(),
            response.status.code(),
            start,
        );

        advance(conn, ConnectionState::Closed);
    }

    async fn dispatch(&mut self, endpoint: Endpoint, request: &Request) -> Response {
        match endpoint {
            Endpoint::StaticPage => {
                handlers::static_page(&self.config.static_files.index_path).await
            }
            Endpoint::ListPlayers => handlers::list_players(&*self.store),
            Endpoint::CreatePlayer => handlers::create_player(&mut *self.store, request),
            Endpoint::NotFound => handlers::not_found(),
        }
    }
}

/// The response owed for a parse failure, if the framing still allows one.
fn error_response(error: &ParseError) -> Option<Response> {
    match error {
        ParseError::MalformedRequestLine(_)
        | ParseError::MalformedHeader { .. }
        | ParseError::HeadTooLarge { .. } => Some(Response::bad_request()),
        ParseError::BodyTooLarge { .. } => Some(Response::payload_too_large()),
        ParseError::EmptyRequest | ParseError::TruncatedBody { .. } | ParseError::Io(_) => None,
    }
}

fn advance(conn: &mut Connection, next: ConnectionState) {
    if let Err(e) = conn.transition(next) {
        tracing::warn!(error = %e, "Unexpected connection state change");
    }
}

/// Best-effort write followed by a write-side shutdown.
async fn send(stream: &mut TcpStream, response: &Response) {
    if let Err(e) = response.write_to(stream).await {
        tracing::warn!(error = %e, "Failed to write response");
        return;
    }
    if let Err(e) = stream.shutdown().await {
        tracing::debug!(error = %e, "Shutdown after response failed");
    }
}
