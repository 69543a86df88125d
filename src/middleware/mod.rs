pub mod session;
pub mod tracing;

pub use self::session::session_middleware;
pub use self::tracing::observability_middleware;
