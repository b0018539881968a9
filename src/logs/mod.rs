pub mod context;
pub mod diff;

pub use context::render_with_context;
pub use diff::diff;
