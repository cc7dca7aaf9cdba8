//! Connection handlers.

mod session;

pub(crate) use session::handle_session;
