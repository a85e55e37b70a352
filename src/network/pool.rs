//! Session Pool
//!
//! Hands out ready sessions to concurrent callers.

use std::io;
use std::net::TcpStream;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::protocol::ProtocolVersion;

use super::session::Session;
use super::Transport;

/// Opens a fresh transport when the pool needs another session
pub type ConnectFn<S> = Box<dyn Fn() -> io::Result<S> + Send + Sync>;

/// A set of sessions sharing one immutable set of credentials
///
/// ## Concurrency Model
///
/// - The idle set is guarded by a mutex; no I/O happens under the lock
/// - `acquire` moves a session out of the idle set, so each session has
///   exactly one user at a time
/// - Callers wait on a condition variable when every session is in use and
///   no more may be opened
/// - Authentication runs lazily on the acquiring thread
/// - A credential rejection is remembered; later acquisitions fail with the
///   same `Authentication` error without touching the network
pub struct Pool<S> {
    /// Presented by every session during authentication
    credentials: Option<Credentials>,

    /// Version advertised by new sessions
    version: ProtocolVersion,

    /// Opens new connections on demand (None = fixed set of connections)
    connector: Option<ConnectFn<S>>,

    /// Upper bound on sessions opened through `connector`
    max_sessions: usize,

    inner: Mutex<PoolInner<S>>,

    /// Signalled whenever a session is returned or discarded
    available: Condvar,

    next_id: AtomicU64,
}

struct PoolInner<S> {
    idle: Vec<Session<S>>,

    /// Sessions currently owned by the pool, idle or lent out
    open: usize,

    closed: bool,

    /// Server message from the first credential rejection
    rejected: Option<String>,
}

impl<S: Transport> Pool<S> {
    /// Create a pool over a single existing connection, without credentials
    pub fn new(stream: S) -> Self {
        Self::builder().connection(stream).build()
    }

    pub fn builder() -> PoolBuilder<S> {
        PoolBuilder::default()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Number of sessions owned by the pool (idle or lent out)
    pub fn open_sessions(&self) -> usize {
        self.inner.lock().open
    }

    /// Number of sessions waiting in the idle set
    pub fn idle_sessions(&self) -> usize {
        self.inner.lock().idle.len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Add another physical connection to the idle set
    pub fn add_connection(&self, stream: S) -> Result<()> {
        let session = self.new_session(stream);

        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(Error::PoolClosed);
        }
        inner.open += 1;
        inner.idle.push(session);
        drop(inner);

        self.available.notify_one();
        Ok(())
    }

    /// Borrow a ready session
    ///
    /// Blocks while every session is lent out and no more may be opened. The
    /// session is returned to the pool when the guard is dropped.
    pub fn acquire(&self) -> Result<PooledSession<'_, S>> {
        let mut session = self.checkout()?;

        if let Err(e) = session.ensure_ready(self.credentials.as_ref()) {
            if let Error::Authentication(message) = &e {
                let mut inner = self.inner.lock();
                if inner.rejected.is_none() {
                    inner.rejected = Some(message.clone());
                }
                drop(inner);
                self.available.notify_all();
            }
            self.discard(session);
            return Err(e);
        }

        Ok(PooledSession {
            pool: self,
            session: Some(session),
        })
    }

    /// Run the version handshake on one session and return it to the pool
    ///
    /// Sessions that already handshook or went straight to work return
    /// immediately.
    pub fn handshake(&self) -> Result<()> {
        let mut session = self.checkout()?;

        match session.handshake() {
            Ok(()) => {
                self.release(session);
                Ok(())
            }
            Err(e) => {
                self.discard(session);
                Err(e)
            }
        }
    }

    /// Close the pool: idle sessions are disconnected and later acquisitions
    /// fail with `PoolClosed`
    ///
    /// Sessions lent out at the time are dropped when they come back.
    pub fn close(&self) {
        let idle = {
            let mut inner = self.inner.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;
            let idle = std::mem::take(&mut inner.idle);
            inner.open -= idle.len();
            idle
        };
        self.available.notify_all();

        tracing::debug!("Closing pool with {} idle sessions", idle.len());
        for session in idle {
            if let Err(e) = session.disconnect() {
                tracing::debug!("Ignoring disconnect failure: {}", e);
            }
        }
    }

    fn checkout(&self) -> Result<Session<S>> {
        let mut inner = self.inner.lock();

        loop {
            if inner.closed {
                return Err(Error::PoolClosed);
            }

            if let Some(message) = &inner.rejected {
                return Err(Error::Authentication(message.clone()));
            }

            if let Some(session) = inner.idle.pop() {
                return Ok(session);
            }

            match &self.connector {
                Some(connect) if inner.open < self.max_sessions => {
                    inner.open += 1;
                    drop(inner);
                    return self.open_session(connect);
                }
                None if inner.open == 0 => return Err(Error::NoConnection),
                _ => self.available.wait(&mut inner),
            }
        }
    }

    /// Open a new session; the slot was already reserved in `open`
    fn open_session(&self, connect: &ConnectFn<S>) -> Result<Session<S>> {
        match connect() {
            Ok(stream) => {
                let session = self.new_session(stream);
                tracing::debug!("Opened session {}", session.id());
                Ok(session)
            }
            Err(e) => {
                self.inner.lock().open -= 1;
                self.available.notify_one();
                Err(Error::Transport(e))
            }
        }
    }

    fn new_session(&self, stream: S) -> Session<S> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        Session::with_version(stream, self.version).with_id(id)
    }

    /// Return a session to the idle set, or drop it if it has failed
    fn release(&self, session: Session<S>) {
        let mut inner = self.inner.lock();
        if session.is_failed() || inner.closed {
            inner.open -= 1;
            drop(inner);
            tracing::debug!("Discarding session {} ({:?})", session.id(), session.state());
        } else {
            inner.idle.push(session);
            drop(inner);
        }
        self.available.notify_one();
    }

    fn discard(&self, session: Session<S>) {
        tracing::debug!("Discarding session {} ({:?})", session.id(), session.state());
        self.inner.lock().open -= 1;
        self.available.notify_one();
    }
}

impl Pool<TcpStream> {
    /// Create a pool that opens TCP connections on demand
    ///
    /// Servers are tried in rotation; no connection is made until the first
    /// `acquire`.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let servers = config.servers.clone();
        let read_timeout = timeout(config.read_timeout_ms);
        let write_timeout = timeout(config.write_timeout_ms);
        let nodelay = config.nodelay;
        let next_server = AtomicUsize::new(0);

        let connect = move || {
            let start = next_server.fetch_add(1, Ordering::Relaxed);
            let mut last_error = None;

            for offset in 0..servers.len() {
                let addr = &servers[(start + offset) % servers.len()];
                match open_tcp(addr, read_timeout, write_timeout, nodelay) {
                    Ok(stream) => return Ok(stream),
                    Err(e) => {
                        tracing::warn!("Failed to connect to {}: {}", addr, e);
                        last_error = Some(e);
                    }
                }
            }

            Err(last_error.unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::NotConnected, "no servers configured")
            }))
        };

        let mut builder = Pool::builder()
            .connector(connect)
            .max_sessions(config.max_sessions)
            .protocol_version(config.protocol_version);
        if let Some(credentials) = &config.credentials {
            builder = builder.credentials(credentials.clone());
        }

        Ok(builder.build())
    }
}

fn timeout(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn open_tcp(
    addr: &str,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    nodelay: bool,
) -> io::Result<TcpStream> {
    let stream = TcpStream::connect(addr)?;
    stream.set_nodelay(nodelay)?;
    stream.set_read_timeout(read_timeout)?;
    stream.set_write_timeout(write_timeout)?;
    tracing::debug!("Connected to {}", addr);
    Ok(stream)
}

// =============================================================================
// Pooled Session Guard
// =============================================================================

/// A session borrowed from a pool, returned on drop
pub struct PooledSession<'a, S: Transport> {
    pool: &'a Pool<S>,
    session: Option<Session<S>>,
}

impl<S: Transport> Deref for PooledSession<'_, S> {
    type Target = Session<S>;

    fn deref(&self) -> &Self::Target {
        self.session.as_ref().expect("session present until drop")
    }
}

impl<S: Transport> DerefMut for PooledSession<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.session.as_mut().expect("session present until drop")
    }
}

impl<S: Transport> std::fmt::Debug for PooledSession<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PooledSession").field(&self.session).finish()
    }
}

impl<S: Transport> Drop for PooledSession<'_, S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            self.pool.release(session);
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for Pool
pub struct PoolBuilder<S> {
    credentials: Option<Credentials>,
    version: ProtocolVersion,
    connector: Option<ConnectFn<S>>,
    max_sessions: usize,
    connections: Vec<S>,
}

impl<S> Default for PoolBuilder<S> {
    fn default() -> Self {
        Self {
            credentials: None,
            version: ProtocolVersion::CURRENT,
            connector: None,
            max_sessions: Config::default().max_sessions,
            connections: Vec::new(),
        }
    }
}

impl<S: Transport> PoolBuilder<S> {
    /// Set the credentials; they cannot be changed once the pool is built
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.version = version;
        self
    }

    /// Add an already-open connection
    pub fn connection(mut self, stream: S) -> Self {
        self.connections.push(stream);
        self
    }

    /// Open new connections on demand with this function
    pub fn connector<F>(mut self, connect: F) -> Self
    where
        F: Fn() -> io::Result<S> + Send + Sync + 'static,
    {
        self.connector = Some(Box::new(connect));
        self
    }

    /// Limit the sessions opened through the connector
    pub fn max_sessions(mut self, count: usize) -> Self {
        self.max_sessions = count;
        self
    }

    pub fn build(self) -> Pool<S> {
        let pool = Pool {
            credentials: self.credentials,
            version: self.version,
            connector: self.connector,
            max_sessions: self.max_sessions,
            inner: Mutex::new(PoolInner {
                idle: Vec::with_capacity(self.connections.len()),
                open: 0,
                closed: false,
                rejected: None,
            }),
            available: Condvar::new(),
            next_id: AtomicU64::new(1),
        };

        {
            let mut inner = pool.inner.lock();
            for stream in self.connections {
                let session = pool.new_session(stream);
                inner.idle.push(session);
                inner.open += 1;
            }
        }

        pool
    }
}
