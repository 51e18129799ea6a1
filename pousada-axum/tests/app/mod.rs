mod application;
mod payments;

pub use application::TestApp;
pub use payments::StubPayments;
