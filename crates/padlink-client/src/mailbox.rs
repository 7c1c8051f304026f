//! Inbound message mailbox

use crossbeam::queue::SegQueue;

/// Unbounded lock-free FIFO of raw host messages.
///
/// The reader thread is the only producer. Any number of consumers may pull
/// concurrently; each entry is handed to exactly one of them.
#[derive(Debug, Default)]
pub struct Mailbox {
    queue: SegQueue<String>,
}

impl Mailbox {
    /// Create an empty mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message.
    pub fn enqueue(&self, message: String) {
        self.queue.push(message);
    }

    /// Remove and return the oldest message, if any.
    ///
    /// The name is historical; delivery order is first-in, first-out.
    pub fn read_last(&self) -> Option<String> {
        self.queue.pop()
    }

    /// Number of waiting messages.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no messages are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Discard every waiting message.
    pub fn clear(&self) {
        while self.queue.pop().is_some() {}
    }

    /// Remove and return every waiting message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::iter::from_fn(|| self.queue.pop()).collect()
    }
}
