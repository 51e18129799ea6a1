#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the pousada crates.
//! [pousada_core]: https://docs.rs/pousada_core/latest/pousada_core/index.html
//! [pousada_sqlite]: https://docs.rs/pousada_sqlite/latest/pousada_sqlite/index.html
//! [pousada_axum]: https://docs.rs/pousada_axum/latest/pousada_axum/index.html
#![doc = include_str!("../README.md")]

/// Core domain models for the booking system.
///
/// This module contains the data structures that represent bookings, their
/// status machine, the stay ranges they cover and the payloads exchanged
/// with the payment provider.
///
/// The models are primarily data with a minimal amount of validation logic,
/// following the hexagonal architecture's separation of domain entities from
/// their persistence and transport.
pub mod models;

/// Interface traits for the booking system.
///
/// This module contains the "ports" of the hexagonal architecture. These
/// traits define the contract between the booking logic and the external
/// adapters (the document store, the payment provider, the HTTP layer)
/// without specifying any implementation details.
pub mod ports;

/// The booking core: availability, lifecycle and payment reconciliation.
///
/// Every operation is a free function generic over an [`ports::Application`],
/// so the same logic runs against SQLite in production and against test
/// doubles in the test suites.
pub mod services;
