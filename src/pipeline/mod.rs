pub mod cancel;
pub mod cleanup;
pub mod download;
pub mod extract;
pub mod processor;
pub mod upload;
pub mod workspace;

pub use cancel::CancelToken;
pub use processor::{Processor, RunHandle, RunPhase};
pub use workspace::RunWorkspace;
