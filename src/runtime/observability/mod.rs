mod factory;
pub mod log;
pub mod noop;
pub mod posthog;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;

pub use self::log::LogObserver;
pub use factory::{ObserverHandle, create_observer, create_observer_handle};
pub use noop::NoopObserver;
pub use posthog::PosthogObserver;
pub use traits::{Observer, ObserverEvent, ObserverMetric};
