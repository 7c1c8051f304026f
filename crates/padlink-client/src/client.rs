//! TCP session with the host

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, TrySendError, bounded};
use padlink_protocol::{CLOSE_MESSAGE, LOGIN_MESSAGE, TelemetryFrame, encode_telemetry};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::mailbox::Mailbox;
use crate::state::{ConnectionState, Lifecycle, SessionEnd};
use crate::status::{EventSink, Status, notify_message, notify_status};

/// Open socket plus its buffered writer.
struct Link {
    stream: TcpStream,
    writer: BufWriter<TcpStream>,
}

impl Link {
    fn write_line(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    fn shutdown(&self) {
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            debug!("Socket shutdown: {}", e);
        }
    }
}

/// Why a line did not reach the socket.
#[derive(Debug)]
enum WriteError {
    /// No open link
    NoLink,
    /// The socket write failed; the link has been shut down
    Io(io::Error),
}

struct SenderHandle {
    handle: JoinHandle<()>,
    // Disconnects when the sender thread exits.
    done: Receiver<()>,
}

struct Shared {
    config: ClientConfig,
    host: Mutex<Option<String>>,
    sink: Arc<dyn EventSink>,
    mailbox: Arc<Mailbox>,
    running: AtomicBool,
    lifecycle: Mutex<Lifecycle>,
    link: Mutex<Option<Link>>,
    // Clone of the socket used only for shutdown; never held across I/O.
    control: Mutex<Option<TcpStream>>,
    outbound_tx: Sender<String>,
    outbound_rx: Receiver<String>,
    sender: Mutex<Option<SenderHandle>>,
    fault: Mutex<Option<ClientError>>,
}

impl Shared {
    fn notify(&self, status: Status) {
        notify_status(self.sink.as_ref(), &status);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn drain_outbound(&self) -> usize {
        std::iter::from_fn(|| self.outbound_rx.try_recv().ok()).count()
    }

    fn write_line(&self, message: &str) -> Result<(), WriteError> {
        let mut link = self.link.lock();
        let Some(link) = link.as_mut() else {
            return Err(WriteError::NoLink);
        };
        link.write_line(message).map_err(|e| {
            link.shutdown();
            WriteError::Io(e)
        })
    }

    /// Record a failed write and end the session.
    ///
    /// After `stop` the socket is shut down under any write still in flight,
    /// so a failure then is expected and is neither stored nor reported.
    fn write_failed(&self, err: WriteError) {
        if !self.running.swap(false, Ordering::AcqRel) {
            debug!("Write abandoned after stop: {:?}", err);
            return;
        }
        let (status, fault) = match err {
            WriteError::NoLink => (
                Status::SenderUnavailable,
                ClientError::Io(io::Error::from(io::ErrorKind::NotConnected)),
            ),
            WriteError::Io(e) => (Status::SendError(e.to_string()), ClientError::Io(e)),
        };
        *self.fault.lock() = Some(fault);
        warn!(status = %status, "Sender stopping");
        self.notify(status);
    }

    fn sender_loop(&self) {
        info!("Sender thread started");
        let poll = self.config.poll_interval();
        while self.is_running() || !self.outbound_rx.is_empty() {
            match self.outbound_rx.recv_timeout(poll) {
                Ok(message) => {
                    if let Err(err) = self.write_line(&message) {
                        self.write_failed(err);
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        info!("Sender thread stopping");
    }

    fn join_sender(&self, timeout: Duration) {
        let Some(sender) = self.sender.lock().take() else {
            return;
        };
        match sender.done.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if sender.handle.join().is_err() {
                    warn!("Sender thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("Sender thread did not stop within {:?}, detaching", timeout);
            }
        }
    }

    /// Single exit path for a session. Only the caller that moves the state
    /// out of `Connecting`/`Connected` performs the teardown.
    fn teardown(&self, join_timeout: Duration, clear_mailbox: bool) {
        self.running.store(false, Ordering::Release);
        {
            let mut life = self.lifecycle.lock();
            match life.state {
                ConnectionState::Disconnected | ConnectionState::Closing => return,
                ConnectionState::Connecting | ConnectionState::Connected => {
                    life.state = ConnectionState::Closing;
                }
            }
        }

        self.join_sender(join_timeout);
        if let Some(stream) = self.control.lock().take()
            && let Err(e) = stream.shutdown(Shutdown::Both)
        {
            debug!("Socket shutdown: {}", e);
        }
        drop(self.link.lock().take());
        let dropped = self.drain_outbound();
        if dropped > 0 {
            debug!("Discarded {} unsent messages", dropped);
        }
        if clear_mailbox {
            self.mailbox.clear();
        }

        self.lifecycle.lock().reset();
        info!("Disconnected from {}", self.config.address());
        self.notify(Status::Disconnected);
    }
}

/// Handle to a controller ↔ host session.
///
/// Cloning is cheap and every clone drives the same session, so one clone can
/// sit in [`TcpClient::run`] on a reader thread while others enqueue and stop.
#[derive(Clone)]
pub struct TcpClient {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for TcpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpClient")
            .field("host", &*self.shared.host.lock())
            .field("port", &self.shared.config.port)
            .field("state", &self.state())
            .field("queued", &self.queued())
            .finish()
    }
}

impl TcpClient {
    /// Create a client. Nothing connects until [`TcpClient::run`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: ClientConfig, sink: Arc<dyn EventSink>) -> ClientResult<Self> {
        config.validate()?;
        let (outbound_tx, outbound_rx) = bounded(config.queue_capacity);
        let host = config.host.clone();
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                host: Mutex::new(host),
                sink,
                mailbox: Arc::new(Mailbox::new()),
                running: AtomicBool::new(false),
                lifecycle: Mutex::new(Lifecycle::default()),
                link: Mutex::new(None),
                control: Mutex::new(None),
                outbound_tx,
                outbound_rx,
                sender: Mutex::new(None),
                fault: Mutex::new(None),
            }),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.shared.config
    }

    /// Host the next `run` will connect to.
    pub fn host(&self) -> Option<String> {
        self.shared.host.lock().clone()
    }

    /// Change the host for the next `run`.
    pub fn set_host(&self, host: impl Into<String>) {
        *self.shared.host.lock() = Some(host.into());
    }

    /// Inbound messages from the host.
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.shared.mailbox
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.shared.lifecycle.lock().state
    }

    /// Whether a session has been started and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// When the current session connected.
    pub fn connected_since(&self) -> Option<Instant> {
        let life = self.shared.lifecycle.lock();
        match life.state {
            ConnectionState::Connected => life.connected_at,
            _ => None,
        }
    }

    /// Whether telemetry should be sent now: connected, and the first-packet
    /// delay has passed since connect.
    pub fn ready_for_telemetry(&self) -> bool {
        self.connected_since()
            .is_some_and(|at| at.elapsed() >= self.shared.config.first_packet_delay())
    }

    /// Messages waiting in the outbound queue.
    pub fn queued(&self) -> usize {
        self.shared.outbound_rx.len()
    }

    /// Queue a line for the sender thread. Never blocks.
    ///
    /// # Errors
    ///
    /// [`ClientError::QueueFull`] when the queue is at capacity; the message is
    /// dropped and [`Status::SendFailedQueueFull`] is raised.
    pub fn enqueue(&self, message: impl Into<String>) -> ClientResult<()> {
        match self.shared.outbound_tx.try_send(message.into()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!("Send queue full, dropping message");
                self.shared.notify(Status::SendFailedQueueFull);
                Err(ClientError::QueueFull {
                    capacity: self.shared.config.queue_capacity,
                })
            }
            // The client owns both ends of the channel.
            Err(TrySendError::Disconnected(_)) => Err(ClientError::QueueFull {
                capacity: self.shared.config.queue_capacity,
            }),
        }
    }

    /// Encode and queue a telemetry frame once the session is ready.
    ///
    /// Returns `Ok(false)` without queueing while disconnected or inside the
    /// first-packet delay.
    ///
    /// # Errors
    ///
    /// As [`TcpClient::enqueue`].
    pub fn send_telemetry(&self, frame: &TelemetryFrame) -> ClientResult<bool> {
        if !self.ready_for_telemetry() {
            return Ok(false);
        }
        self.enqueue(encode_telemetry(frame))?;
        Ok(true)
    }

    /// Run [`TcpClient::run`] on a named reader thread.
    ///
    /// # Errors
    ///
    /// [`ClientError::ThreadSpawn`] if the OS refuses the thread.
    pub fn spawn(&self) -> ClientResult<JoinHandle<SessionEnd>> {
        let client = self.clone();
        thread::Builder::new()
            .name("padlink-reader".to_string())
            .spawn(move || client.run())
            .map_err(|source| ClientError::ThreadSpawn {
                name: "reader",
                source,
            })
    }

    /// Connect, log in, start the sender, then read host lines until the
    /// session ends. Blocks the calling thread for the whole session.
    pub fn run(&self) -> SessionEnd {
        let shared = &self.shared;
        let Some(host) = self.host() else {
            shared.notify(Status::MissingHost);
            return SessionEnd::Failed(ClientError::MissingHost);
        };

        {
            let mut life = shared.lifecycle.lock();
            if life.state != ConnectionState::Disconnected {
                return SessionEnd::Failed(ClientError::AlreadyRunning);
            }
            life.state = ConnectionState::Connecting;
            life.connected_at = None;
        }
        *shared.fault.lock() = None;
        shared.running.store(true, Ordering::Release);
        shared.notify(Status::Connecting);

        let port = shared.config.port;
        info!("Connecting to {}:{}", host, port);
        let stream = match connect(&host, port, shared.config.connect_timeout()) {
            Ok(stream) => stream,
            Err(err) => {
                let was_running = shared.running.swap(false, Ordering::AcqRel);
                shared.lifecycle.lock().reset();
                if !was_running {
                    debug!("Stopped while connecting");
                    return SessionEnd::Stopped;
                }
                warn!("Connect failed: {}", err);
                shared.notify(connect_failure_status(&err));
                return SessionEnd::Failed(err);
            }
        };

        let reader = match self.install_link(stream) {
            Ok(Some(reader)) => reader,
            Ok(None) => {
                debug!("Stopped while connecting");
                return SessionEnd::Stopped;
            }
            Err(err) => {
                shared.notify(Status::Fail);
                shared.teardown(shared.config.session_join_timeout(), false);
                return SessionEnd::Failed(err);
            }
        };
        info!("Connected to {}:{}", host, port);
        shared.notify(Status::Connected);

        if let Err(err) = shared.write_line(LOGIN_MESSAGE) {
            shared.write_failed(err);
            let fault = shared.fault.lock().take();
            shared.teardown(shared.config.session_join_timeout(), false);
            return fault.map_or(SessionEnd::Stopped, SessionEnd::Failed);
        }

        if !shared.is_running() {
            shared.teardown(shared.config.session_join_timeout(), false);
            return SessionEnd::Stopped;
        }
        if let Err(err) = self.start_sender() {
            shared.teardown(shared.config.session_join_timeout(), false);
            return SessionEnd::Failed(err);
        }

        let end = self.read_loop(reader);
        shared.teardown(shared.config.session_join_timeout(), false);
        match shared.fault.lock().take() {
            Some(err) if end.is_stopped() => SessionEnd::Failed(err),
            _ => end,
        }
    }

    /// Stop the session. Safe to call from any thread, any number of times.
    ///
    /// Queues the close line, waits briefly for the sender to flush it, shuts
    /// the socket so the reader unblocks, then empties the outbound queue and
    /// the mailbox.
    pub fn stop(&self) {
        let shared = &self.shared;
        if !shared.is_running() {
            debug!("Stop requested while not running");
            return;
        }
        info!("Stopping client");
        if shared.outbound_tx.try_send(CLOSE_MESSAGE.to_string()).is_err() {
            debug!("Close message not queued");
        }
        shared.running.store(false, Ordering::Release);
        shared.teardown(shared.config.stop_join_timeout(), true);
        shared.drain_outbound();
    }

    /// Promote a fresh socket to the session link. Returns the read half, or
    /// `None` if `stop` won the race while connecting.
    fn install_link(&self, stream: TcpStream) -> ClientResult<Option<TcpStream>> {
        let shared = &self.shared;
        if let Err(e) = stream.set_nodelay(shared.config.tcp_nodelay) {
            warn!("Failed to set TCP_NODELAY: {}", e);
        }
        let reader = stream.try_clone()?;
        let control = stream.try_clone()?;
        let writer = BufWriter::new(stream.try_clone()?);

        let mut life = shared.lifecycle.lock();
        if !shared.is_running() || life.state != ConnectionState::Connecting {
            drop(life);
            if let Err(e) = stream.shutdown(Shutdown::Both) {
                debug!("Socket shutdown: {}", e);
            }
            return Ok(None);
        }
        *shared.link.lock() = Some(Link { stream, writer });
        *shared.control.lock() = Some(control);
        life.state = ConnectionState::Connected;
        life.connected_at = Some(Instant::now());
        Ok(Some(reader))
    }

    fn start_sender(&self) -> ClientResult<()> {
        let (done_tx, done_rx) = bounded::<()>(0);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("padlink-sender".to_string())
            .spawn(move || {
                let _done = done_tx;
                shared.sender_loop();
            })
            .map_err(|source| ClientError::ThreadSpawn {
                name: "sender",
                source,
            })?;
        *self.shared.sender.lock() = Some(SenderHandle {
            handle,
            done: done_rx,
        });
        Ok(())
    }

    fn read_loop(&self, stream: TcpStream) -> SessionEnd {
        let shared = &self.shared;
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::with_capacity(256);
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    if !shared.is_running() {
                        return SessionEnd::Stopped;
                    }
                    info!("Host closed the connection");
                    shared.notify(Status::ConnectionClosed);
                    return SessionEnd::PeerClosed;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let message = line.trim_end_matches(['\r', '\n']);
                    if message.is_empty() {
                        continue;
                    }
                    notify_message(shared.sink.as_ref(), message);
                    shared.mailbox.enqueue(message.to_owned());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    if !shared.is_running() {
                        return SessionEnd::Stopped;
                    }
                    warn!("Read failed: {}", e);
                    shared.notify(Status::ConnectionNull);
                    return SessionEnd::Failed(ClientError::Io(e));
                }
            }
        }
    }
}

/// Status raised when a connect attempt fails.
fn connect_failure_status(err: &ClientError) -> Status {
    if err.is_timeout() {
        Status::ConnectionTimeout
    } else {
        Status::Fail
    }
}

fn connect(host: &str, port: u16, timeout: Duration) -> ClientResult<TcpStream> {
    let addr = format!("{host}:{port}");
    let addrs = (host, port)
        .to_socket_addrs()
        .map_err(|e| ClientError::connect_failure(addr.clone(), e))?;

    let mut last_err = None;
    for candidate in addrs {
        match TcpStream::connect_timeout(&candidate, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!("Connect to {} failed: {}", candidate, e);
                last_err = Some(e);
            }
        }
    }

    Err(match last_err {
        Some(e) if e.kind() == io::ErrorKind::TimedOut => ClientError::ConnectTimeout {
            addr,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        },
        Some(e) => ClientError::connect_failure(addr, e),
        None => ClientError::connect_failure(addr, "host resolved to no addresses"),
    })
}
