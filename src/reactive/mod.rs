//! Single-threaded reactive cells.
//!
//! A signal has exactly one [`SignalWriter`] and any number of
//! [`SignalReader`]s. Writes run subscribers synchronously, before `set`
//! returns; there is no batching and no deferred scheduling.

mod signal;

pub use signal::{SignalReader, SignalWriter, Subscription, signal};
