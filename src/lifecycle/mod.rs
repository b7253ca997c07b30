//! Process lifecycle: waiting for the signal that ends the server.

mod shutdown;

pub use shutdown::shutdown_signal;
