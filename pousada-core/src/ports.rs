mod application;
mod booking;
mod payment;

pub use application::Application;
pub use booking::BookingRepository;
pub use payment::PaymentGateway;

use std::{fmt::Debug, fmt::Display, hash::Hash};

/// The base trait of every storage adapter.
///
/// It fixes the adapter's error type and the concrete identifier the store
/// assigns to bookings. The core never inspects an identifier beyond
/// comparing, ordering and printing it.
pub trait Repository: Send + Sync {
    /// The error produced by any storage call
    type Error: std::error::Error + Send + Sync + 'static;

    /// The store-assigned booking identifier
    type BookingId: Clone + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static;
}
