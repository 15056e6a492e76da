use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::{Bytes, Frame, Incoming};
use hyper::header::{HeaderMap, HeaderValue, USER_AGENT};
use hyper::server::conn::http2;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

use crate::adapters::sinks;
use crate::entities::{CaptureStore, HarnessConfig, Message, ServiceKind};
use crate::error::HarnessError;
use crate::use_cases::ports::{EventSink, Gateway, Instance};
use crate::use_cases::RequestRecorder;

type GrpcBody = BoxBody<Bytes, Infallible>;

/// One mock telemetry service listening on its own port.
///
/// An instance moves through a fixed lifecycle: `bind` claims the port,
/// `serve` starts accepting calls, `shutdown` stops accepting and drains
/// in-flight connections, and `stopped` waits for the drain to finish.
/// Capture inspection is available at every stage through [`captures`].
///
/// [`captures`]: ServiceInstance::captures
pub struct ServiceInstance {
    kind: ServiceKind,
    endpoint: String,
    captures: Arc<CaptureStore>,
    recorder: RequestRecorder,
    listener: Option<TcpListener>,
    shutdown: watch::Sender<bool>,
    serve_task: Option<JoinHandle<()>>,
}

impl ServiceInstance {
    /// Claims the listen port for one service kind. The instance is not
    /// serving yet; requests are only answered after [`serve`].
    ///
    /// [`serve`]: ServiceInstance::serve
    pub async fn bind(
        kind: ServiceKind,
        host: &str,
        port: u16,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, HarnessError> {
        let listener = TcpListener::bind((host, port)).await.map_err(|err| {
            HarnessError::BindError(format!("{kind} listener on {host}:{port}: {err}"))
        })?;
        let endpoint = listener
            .local_addr()
            .map_err(|err| HarnessError::BindError(format!("{kind} listener address: {err}")))?
            .to_string();

        tracing::debug!(service = %kind, endpoint = %endpoint, "listener bound");

        let captures = Arc::new(CaptureStore::new());
        let recorder = RequestRecorder::new(kind, captures.clone(), sink);
        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            kind,
            endpoint,
            captures,
            recorder,
            listener: Some(listener),
            shutdown,
            serve_task: None,
        })
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// The address the instance is bound to, as `host:port`. With a
    /// configured port of 0 this is where the operating system actually
    /// placed the listener.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Handle to the store holding every request this instance captured.
    pub fn captures(&self) -> Arc<CaptureStore> {
        self.captures.clone()
    }

    /// Starts answering calls on the bound port. Calling this more than
    /// once has no effect.
    pub fn serve(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        let recorder = self.recorder.clone();
        let shutdown = self.shutdown.subscribe();
        let kind = self.kind;
        self.serve_task = Some(tokio::spawn(async move {
            accept_loop(listener, recorder, shutdown).await;
            tracing::debug!(service = %kind, "accept loop exited");
        }));
    }

    /// Asks the instance to stop: no new connections are accepted and
    /// in-flight calls are allowed to finish. Idempotent, and safe to call
    /// before [`serve`].
    ///
    /// [`serve`]: ServiceInstance::serve
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    /// Waits until the accept loop and every connection it spawned have
    /// finished. Returns immediately when the instance never served.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.serve_task.take() {
            let _ = task.await;
        }
    }
}

/// Gateway that realizes each mock service as a raw HTTP/2 listener
/// speaking just enough gRPC for real exporter clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcGateway;

#[async_trait]
impl Gateway for GrpcGateway {
    type Instance = ServiceInstance;

    async fn bind(
        &self,
        kind: ServiceKind,
        config: &HarnessConfig,
    ) -> Result<ServiceInstance, HarnessError> {
        let sink = sinks::for_config(config, kind)?;
        ServiceInstance::bind(kind, &config.host, config.port_for(kind), sink).await
    }
}

#[async_trait]
impl Instance for ServiceInstance {
    fn kind(&self) -> ServiceKind {
        ServiceInstance::kind(self)
    }

    fn endpoint(&self) -> &str {
        ServiceInstance::endpoint(self)
    }

    fn captures(&self) -> Arc<CaptureStore> {
        ServiceInstance::captures(self)
    }

    fn serve(&mut self) {
        ServiceInstance::serve(self)
    }

    fn shutdown(&self) {
        ServiceInstance::shutdown(self)
    }

    async fn stopped(&mut self) {
        ServiceInstance::stopped(self).await
    }
}

async fn accept_loop(
    listener: TcpListener,
    recorder: RequestRecorder,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();
    // A shutdown requested before serving started drains immediately.
    if !*shutdown.borrow() {
        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        connections.spawn(serve_connection(
                            stream,
                            recorder.clone(),
                            shutdown.clone(),
                        ));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "could not accept connection");
                    }
                },
                _ = shutdown.changed() => break,
            }
        }
    }
    drop(listener);
    while connections.join_next().await.is_some() {}
}

async fn serve_connection(
    stream: TcpStream,
    recorder: RequestRecorder,
    mut shutdown: watch::Receiver<bool>,
) {
    let io = TokioIo::new(stream);
    let service = service_fn(move |request| {
        let recorder = recorder.clone();
        async move { handle_request(recorder, request).await }
    });

    let connection = http2::Builder::new(TokioExecutor::new()).serve_connection(io, service);
    tokio::pin!(connection);

    let mut draining = *shutdown.borrow();
    if draining {
        connection.as_mut().graceful_shutdown();
    }
    loop {
        tokio::select! {
            result = connection.as_mut() => {
                if let Err(err) = result {
                    tracing::debug!(error = %err, "connection closed with error");
                }
                break;
            }
            _ = shutdown.changed(), if !draining => {
                draining = true;
                connection.as_mut().graceful_shutdown();
            }
        }
    }
}

async fn handle_request(
    recorder: RequestRecorder,
    request: Request<Incoming>,
) -> Result<Response<GrpcBody>, hyper::Error> {
    let path = request.uri().path().to_string();
    let caller_identity = caller_identity(request.headers());
    let body = request.into_body().collect().await?.to_bytes();

    // gRPC messages are prefixed with 5 bytes: 1 byte compression flag + 4 bytes length
    let payload = if body.len() > 5 {
        Message::new(body[5..].to_vec())
    } else {
        Message::empty()
    };

    if path != recorder.kind().rpc_path() {
        return Ok(status_response(12, "unknown method")); // UNIMPLEMENTED
    }

    Ok(grpc_response(recorder.record(payload, caller_identity)))
}

/// Joins every `user-agent` header value with `;`, in the order the caller
/// sent them. Empty when the call carried none.
fn caller_identity(headers: &HeaderMap) -> String {
    headers
        .get_all(USER_AGENT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join(";")
}

fn grpc_response(message: Message) -> Response<GrpcBody> {
    // Length-prefix the message, then close the stream with the gRPC
    // status trailer a tonic-style client insists on.
    let mut framed = Vec::with_capacity(5 + message.data.len());
    framed.push(0); // No compression
    framed.extend_from_slice(&(message.data.len() as u32).to_be_bytes());
    framed.extend_from_slice(&message.data);

    let mut trailers = HeaderMap::new();
    trailers.insert("grpc-status", HeaderValue::from_static("0"));

    let frames = vec![
        Ok::<_, Infallible>(Frame::data(Bytes::from(framed))),
        Ok(Frame::trailers(trailers)),
    ];
    Response::builder()
        .status(200)
        .header("content-type", "application/grpc")
        .body(StreamBody::new(stream::iter(frames)).boxed())
        .unwrap()
}

fn status_response(code: u32, message: &str) -> Response<GrpcBody> {
    Response::builder()
        .status(200)
        .header("content-type", "application/grpc")
        .header("grpc-status", code.to_string())
        .header("grpc-message", message)
        .body(Empty::<Bytes>::new().boxed())
        .unwrap()
}
