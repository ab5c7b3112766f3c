//! Per-record wait queue for parked contexts.

use event_listener::{Event, EventListener};

/// Wake-up channel of one semaphore record.
///
/// Wraps an [`Event`]: a waiter registers a listener, re-checks the guarded
/// condition and only then parks, so a wake-up issued between the check and
/// the park is never lost. Notification order is FIFO.
pub(crate) struct WaitQueue {
    event: Event,
}

impl WaitQueue {
    pub(crate) const fn new() -> Self {
        Self {
            event: Event::new(),
        }
    }

    /// Registers interest in the next wake-up.
    ///
    /// Must precede the caller's final check of the condition it is about
    /// to park on.
    pub(crate) fn waiter(&self) -> EventListener {
        self.event.listen()
    }

    /// Wakes the longest-registered waiter, if any.
    ///
    /// A wake-up with no registered listener is dropped; waiters defend
    /// against that window by re-checking after registration.
    pub(crate) fn wake_one(&self) {
        self.event.notify(1);
    }

    /// Parks the calling context until the listener fires.
    #[cfg(feature = "std")]
    pub(crate) fn block(listener: EventListener) {
        use event_listener::Listener;

        listener.wait();
    }

    /// Parks the calling context until the listener fires.
    ///
    /// Without `std` there is nothing to park a context on, so relax the
    /// core between polls; single-task targets reach the same state the
    /// moment the wake-up arrives.
    #[cfg(not(feature = "std"))]
    pub(crate) fn block(listener: EventListener) {
        use core::future::Future;
        use core::pin::pin;
        use core::task::{Context, Waker};

        let mut listener = pin!(listener);
        let mut cx = Context::from_waker(Waker::noop());
        while listener.as_mut().poll(&mut cx).is_pending() {
            core::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::mpsc::channel;
    use std::thread;

    use super::WaitQueue;

    #[test]
    fn wake_before_park_is_kept() {
        let queue = WaitQueue::new();
        let listener = queue.waiter();
        queue.wake_one();
        // the registered listener holds the notification
        WaitQueue::block(listener);
    }

    #[test]
    fn wake_one_releases_single_waiter() {
        let queue = Arc::new(WaitQueue::new());
        let (tx, rx) = channel();

        let handle = {
            let queue = queue.clone();
            thread::spawn(move || {
                let listener = queue.waiter();
                tx.send(()).unwrap();
                WaitQueue::block(listener);
            })
        };

        rx.recv().unwrap();
        queue.wake_one();
        handle.join().unwrap();
    }
}
