pub mod docker;

pub use docker::Server;
