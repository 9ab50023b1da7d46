use anyhow::Error;
use log::error;

/// Log the full error chain and hand the error back to the caller.
///
/// Used at the points where an error leaves a stage, so every failure shows
/// up in the log exactly once even when the caller discards it.
pub fn handle_error(err: Error) -> Error {
    error!("{:?}", err);
    err
}
