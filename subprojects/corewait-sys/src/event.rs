//! Auto-reset event.
//!
//! `set` releases exactly one waiter (or primes the event for the next
//! caller of `wait` if none is currently parked) and the flag is cleared
//! atomically with the release. This is the "drain handshake" signal the
//! condition-variable core uses to know a broadcast's waiters have all
//! left the gate.

use crate::error::Result;
use crate::sys::platform;

/// A single-slot, auto-resetting event.
pub struct Event {
    inner: platform::event::Event,
}

impl Event {
    /// Creates a new event, initially unset.
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: platform::event::Event::new()?,
        })
    }

    /// Sets the event, releasing one waiter and resetting.
    #[inline]
    pub fn set(&self) {
        self.inner.set();
    }

    /// Blocks until the event is set, then consumes the signal.
    #[inline]
    pub fn wait(&self) {
        self.inner.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn set_then_wait_does_not_block() {
        let e = Event::new().unwrap();
        e.set();
        e.wait();
    }

    #[test]
    fn wait_blocks_until_set() {
        let e = Arc::new(Event::new().unwrap());
        let waiter = Arc::clone(&e);
        let handle = thread::spawn(move || waiter.wait());
        thread::sleep(Duration::from_millis(50));
        e.set();
        handle.join().unwrap();
    }
}
