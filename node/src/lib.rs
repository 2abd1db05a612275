//! VeriPort node, one process serving the verification API.
//!
//! The node wires the trust cache, the registry client, the billing engine
//! and the RPC server together from a single [`NodeConfig`], runs the
//! background expiry sweep, and shuts the whole assembly down cleanly on
//! SIGINT/SIGTERM.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::Node;
pub use shutdown::ShutdownController;
