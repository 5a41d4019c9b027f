pub mod seed;
pub mod session;
pub mod tasks;

pub use session::SessionStore;
pub use tasks::TaskStore;
