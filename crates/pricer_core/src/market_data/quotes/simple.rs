//! Simple mutable quote with change notification.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread;

use num_traits::Float;

use super::Quote;
use crate::market_data::error::MarketDataError;

/// Callback invoked with the new value whenever a quote changes.
type ObserverCallback<T> = Arc<dyn Fn(Option<T>) + Send + Sync>;

/// Identifier returned by [`SimpleQuote::register_observer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Changes waiting to be delivered, in write order.
struct Notifications<T> {
    pending: VecDeque<Option<T>>,
    delivering: bool,
}

/// Named, thread-safe scalar value cell.
///
/// The cell may be empty (no value yet, or explicitly reset). Reading an
/// empty cell fails with [`MarketDataError::UnavailableQuote`] carrying the
/// quote's name.
///
/// Observers registered on the quote are notified after every change of the
/// stored value. Setting the value it already holds is not a change.
///
/// Notifications are delivered one at a time in the order the writes were
/// applied, so the last value an observer receives is the stored value.
/// Callbacks run with no lock held: they may read or write the quote and
/// register or unregister observers. A write made while another thread (or
/// an enclosing callback) is delivering is queued and delivered by that
/// thread before it returns.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`, `f32`)
///
/// # Example
///
/// ```
/// use pricer_core::market_data::quotes::{Quote, SimpleQuote};
///
/// let rate = SimpleQuote::new("risk_free_rate", 0.05_f64);
/// assert_eq!(rate.value().unwrap(), 0.05);
///
/// let previous = rate.set_value(0.04);
/// assert_eq!(previous, Some(0.05));
/// assert_eq!(rate.value().unwrap(), 0.04);
///
/// rate.reset();
/// assert!(rate.value().is_err());
/// ```
pub struct SimpleQuote<T: Float> {
    name: String,
    value: RwLock<Option<T>>,
    observers: Mutex<Vec<(ObserverId, ObserverCallback<T>)>>,
    notifications: Mutex<Notifications<T>>,
    next_observer: AtomicU64,
}

impl<T: Float> SimpleQuote<T> {
    /// Construct a quote holding `value`.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in error messages and logs
    /// * `value` - Initial value
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self::with_value(name, Some(value))
    }

    /// Construct a quote with no value.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::with_value(name, None)
    }

    /// Construct a quote from an optional initial value.
    pub fn with_value(name: impl Into<String>, value: Option<T>) -> Self {
        Self {
            name: name.into(),
            value: RwLock::new(value),
            observers: Mutex::new(Vec::new()),
            notifications: Mutex::new(Notifications {
                pending: VecDeque::new(),
                delivering: false,
            }),
            next_observer: AtomicU64::new(0),
        }
    }

    /// Return the quote's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a new value and notify observers if it differs from the old one.
    ///
    /// # Returns
    ///
    /// The previously held value, if any.
    pub fn set_value(&self, value: T) -> Option<T> {
        self.replace(Some(value))
    }

    /// Clear the stored value and notify observers if one was held.
    ///
    /// # Returns
    ///
    /// The previously held value, if any.
    pub fn reset(&self) -> Option<T> {
        self.replace(None)
    }

    /// Register a callback run after each change of the stored value.
    ///
    /// The callback receives the new value (`None` after a reset).
    pub fn register_observer<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(Option<T>) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        tracing::trace!(quote = %self.name, observer = id.0, "observer registered");
        id
    }

    /// Remove a previously registered callback.
    ///
    /// # Returns
    ///
    /// `true` if the observer was registered, `false` otherwise.
    pub fn unregister_observer(&self, id: ObserverId) -> bool {
        let mut observers = self
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(observer, _)| *observer != id);
        observers.len() != before
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn replace(&self, value: Option<T>) -> Option<T> {
        let previous = {
            let mut slot = self.value.write().unwrap_or_else(PoisonError::into_inner);
            let previous = std::mem::replace(&mut *slot, value);
            // Queued while the value lock is held so queue order is write order
            if previous != value {
                self.lock_notifications().pending.push_back(value);
            }
            previous
        };
        if previous != value {
            tracing::trace!(
                quote = %self.name,
                previous = ?previous.and_then(|v| v.to_f64()),
                current = ?value.and_then(|v| v.to_f64()),
                "quote updated"
            );
            self.deliver_notifications();
        }
        previous
    }

    fn lock_notifications(&self) -> MutexGuard<'_, Notifications<T>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver_notifications(&self) {
        {
            let mut queue = self.lock_notifications();
            if queue.delivering {
                return;
            }
            queue.delivering = true;
        }
        let _unwind = DeliveryGuard(&self.notifications);

        loop {
            let next = {
                let mut queue = self.lock_notifications();
                match queue.pending.pop_front() {
                    Some(next) => next,
                    None => {
                        queue.delivering = false;
                        return;
                    }
                }
            };
            let callbacks: Vec<ObserverCallback<T>> = self
                .observers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect();
            for callback in callbacks {
                callback(next);
            }
        }
    }
}

/// Releases the delivery flag if an observer panics mid-delivery.
struct DeliveryGuard<'a, T>(&'a Mutex<Notifications<T>>);

impl<T> Drop for DeliveryGuard<'_, T> {
    fn drop(&mut self) {
        if thread::panicking() {
            let mut queue = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            queue.pending.clear();
            queue.delivering = false;
        }
    }
}

impl<T: Float> Quote<T> for SimpleQuote<T> {
    fn value(&self) -> Result<T, MarketDataError> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ok_or_else(|| MarketDataError::unavailable(self.name.as_str()))
    }

    fn is_valid(&self) -> bool {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl<T: Float + fmt::Debug> fmt::Debug for SimpleQuote<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleQuote")
            .field("name", &self.name)
            .field(
                "value",
                &*self.value.read().unwrap_or_else(PoisonError::into_inner),
            )
            .field("observers", &self.observer_count())
            .finish()
    }
}
