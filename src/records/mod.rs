//! Record resolution and in-place updates for the configured domain.
//!
//! A request names a record; the [`Resolver`] finds the first `A`, `AAAA` or `CNAME` record
//! in the [configured domain][crate::config::Config::domain] with exactly that name, and the
//! [`RecordUpdater`] replaces its data through the [DNS provider][crate::provider].
//! Records of any other type are never matched.

pub mod resolver;
pub mod updater;

pub use resolver::Resolver;
pub use updater::RecordUpdater;
