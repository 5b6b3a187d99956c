use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::error::{ChartError, ChartResult};

type Callback<T> = Rc<RefCell<dyn FnMut(&T) -> ChartResult<()>>>;

struct SignalInner<T> {
    value: Rc<T>,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// Type-erased view of a signal's subscriber list, held weakly by
/// [`Subscription`] so a handle can outlive the signal it was taken from.
trait SubscriberRegistry {
    fn remove(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<T> SubscriberRegistry for RefCell<SignalInner<T>> {
    fn remove(&self, id: u64) {
        self.borrow_mut()
            .subscribers
            .retain(|(subscriber, _)| *subscriber != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.borrow()
            .subscribers
            .iter()
            .any(|(subscriber, _)| *subscriber == id)
    }
}

/// Creates a signal holding `initial` and returns its only writer plus a reader.
pub fn signal<T: 'static>(initial: T) -> (SignalWriter<T>, SignalReader<T>) {
    let inner = Rc::new(RefCell::new(SignalInner {
        value: Rc::new(initial),
        next_id: 0,
        subscribers: Vec::new(),
    }));
    (
        SignalWriter {
            inner: Rc::clone(&inner),
        },
        SignalReader { inner },
    )
}

/// The single write end of a signal. Deliberately not `Clone`.
pub struct SignalWriter<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

/// Read end of a signal; cheap to clone and hand to every observer.
pub struct SignalReader<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for SignalReader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> SignalWriter<T> {
    /// Replaces the value and synchronously runs every live subscriber, in
    /// subscription order.
    ///
    /// The first subscriber error aborts the broadcast and is returned; the new
    /// value stays in place.
    pub fn set(&mut self, value: T) -> ChartResult<()> {
        let (value, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.value = Rc::new(value);
            (Rc::clone(&inner.value), inner.subscribers.clone())
        };
        trace!(subscribers = callbacks.len(), "signal broadcast");

        for (id, callback) in callbacks {
            // A subscriber may dispose a later one while we are broadcasting.
            if !self.inner.contains(id) {
                continue;
            }
            let mut callback = callback.try_borrow_mut().map_err(|_| {
                ChartError::InvalidData("signal written from inside its own subscriber".to_owned())
            })?;
            (&mut *callback)(value.as_ref())?;
        }
        Ok(())
    }

    pub fn update(&mut self, next: impl FnOnce(&T) -> T) -> ChartResult<()> {
        let value = next(&self.get());
        self.set(value)
    }

    #[must_use]
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.inner.borrow().value)
    }

    #[must_use]
    pub fn reader(&self) -> SignalReader<T> {
        SignalReader {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> SignalReader<T> {
    #[must_use]
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.inner.borrow().value)
    }

    /// Registers `callback` for every future write. It is not run for the
    /// current value; the returned handle unsubscribes when dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        callback: impl FnMut(&T) -> ChartResult<()> + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .push((id, Rc::new(RefCell::new(callback)) as Callback<T>));
        drop(inner);

        let registry: Rc<dyn SubscriberRegistry> = self.inner.clone();
        Subscription {
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for SignalReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SignalReader")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for SignalWriter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SignalWriter")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Handle to one registered subscriber. Dropping it (or calling
/// [`Subscription::dispose`]) guarantees the callback never runs again.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn SubscriberRegistry>,
}

impl Subscription {
    /// Consumes the handle; `Drop` does the unsubscribing.
    pub fn dispose(self) {}

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
