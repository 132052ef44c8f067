pub mod cli;
pub mod cmd;
pub mod session;

pub use session::{FormSession, PatchOutcome, SessionError};
