//! Channel construction for the emulator control endpoint.
//!
//! Mirrors how the emulator expects clients to find it: an explicit
//! address wins, then the newest discovery advertisement, then the
//! conventional `localhost:8554` (gRPC sits 3000 ports above the
//! default console port 5554). When a token is known, every outgoing
//! request carries it as `authorization: Bearer <token>` metadata.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::interceptor::InterceptedService;
use tonic::service::Interceptor;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tracing::{debug, warn};

use crate::config::Config;
use crate::discovery;
use crate::error::ChannelError;
use crate::proto::emulator_controller_client::EmulatorControllerClient;

/// Conventional gRPC address of an emulator on the default console port.
pub const DEFAULT_ADDR: &str = "localhost:8554";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A connected `EmulatorController` stub with auth metadata attached.
pub type ControllerClient =
    EmulatorControllerClient<InterceptedService<Channel, AuthInterceptor>>;

// ── Endpoint resolution ─────────────────────────────────────────

/// A resolved connection target, not yet connected.
#[derive(Debug)]
pub struct EndpointInfo {
    pub addr: String,
    pub token: Option<SecretString>,
    pub avd_name: Option<String>,
}

/// Figure out where the emulator is, without connecting.
///
/// An explicitly configured token always wins over a discovered one.
pub fn resolve(config: &Config) -> EndpointInfo {
    if let Some(addr) = &config.grpc.addr {
        return EndpointInfo {
            addr: addr.clone(),
            token: config.grpc.token.clone(),
            avd_name: None,
        };
    }

    if let Some(port) = config.grpc.port {
        return EndpointInfo {
            addr: format!("localhost:{port}"),
            token: config.grpc.token.clone(),
            avd_name: None,
        };
    }

    let dir = config.discovery.dir.clone().or_else(discovery::default_dir);
    if let Some(dir) = dir {
        if let Some(emulator) = discovery::discover(&dir).into_iter().next() {
            debug!(source = %emulator.source.display(), "using discovered emulator");
            return EndpointInfo {
                addr: format!("localhost:{}", emulator.grpc_port),
                token: config.grpc.token.clone().or(emulator.grpc_token),
                avd_name: emulator.avd_name,
            };
        }
    }

    warn!("no running emulator discovered, falling back to {DEFAULT_ADDR}");
    EndpointInfo {
        addr: DEFAULT_ADDR.to_string(),
        token: config.grpc.token.clone(),
        avd_name: None,
    }
}

// ── Connection ──────────────────────────────────────────────────

/// Open a channel to the resolved endpoint and wrap the stub so every
/// call carries the auth metadata.
pub async fn connect(endpoint: &EndpointInfo) -> Result<ControllerClient, ChannelError> {
    let channel = Endpoint::from_shared(format!("http://{}", endpoint.addr))
        .map_err(|source| ChannelError::InvalidAddress {
            addr: endpoint.addr.clone(),
            source,
        })?
        .connect_timeout(CONNECT_TIMEOUT)
        .connect()
        .await
        .map_err(|source| ChannelError::Connect {
            addr: endpoint.addr.clone(),
            source,
        })?;

    let auth = AuthInterceptor::new(endpoint.token.as_ref())?;
    Ok(EmulatorControllerClient::with_interceptor(channel, auth))
}

/// Attaches `authorization: Bearer <token>` to every outgoing request.
#[derive(Clone)]
pub struct AuthInterceptor {
    bearer: Option<MetadataValue<Ascii>>,
}

impl AuthInterceptor {
    fn new(token: Option<&SecretString>) -> Result<Self, ChannelError> {
        let bearer: Option<MetadataValue<Ascii>> = token
            .map(|token| {
                format!("Bearer {}", token.expose_secret())
                    .parse()
                    .map_err(|_| ChannelError::InvalidToken)
            })
            .transpose()?;
        Ok(Self { bearer })
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(bearer) = &self.bearer {
            request.metadata_mut().insert("authorization", bearer.clone());
        }
        Ok(request)
    }
}
