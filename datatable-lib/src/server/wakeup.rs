//! Wakeup channel between a table and its host's event loop.
//!
//! Every state change of a [`ServerTable`](super::ServerTable) sends a signal
//! through this channel so a host blocked on input can redraw when a fetch
//! settles in the background.

use tokio::sync::mpsc;

/// Sender half of the wakeup channel.
///
/// Clone-able, can be moved into async tasks.
#[derive(Debug, Clone)]
pub struct WakeupSender {
    tx: mpsc::Sender<()>,
}

impl WakeupSender {
    /// Send a wakeup signal.
    ///
    /// Non-blocking. A full buffer already guarantees a wakeup and a closed
    /// receiver means the host is shutting down, so errors are ignored.
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiver half of the wakeup channel.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: mpsc::Receiver<()>,
}

impl WakeupReceiver {
    /// Wait for a wakeup signal.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Discard queued signals, returning how many there were.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

/// Create a new wakeup channel pair.
pub fn channel() -> (WakeupSender, WakeupReceiver) {
    // Small buffer - we just need to wake up, not queue many signals
    let (tx, rx) = mpsc::channel(16);
    (WakeupSender { tx }, WakeupReceiver { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain() {
        let (tx, mut rx) = channel();
        tx.send();
        tx.send();
        assert_eq!(rx.drain(), 2);
        assert_eq!(rx.drain(), 0);
    }

    #[test]
    fn test_send_never_blocks_when_full() {
        let (tx, mut rx) = channel();
        for _ in 0..100 {
            tx.send();
        }
        assert_eq!(rx.drain(), 16);
    }

    #[test]
    fn test_send_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        tx.send();
    }
}
