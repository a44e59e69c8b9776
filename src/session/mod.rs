mod store;

pub use store::{SessionError, SessionStore};
