mod session;

pub use session::{SessionStore, AUTH_TOKEN_KEY};
