use thiserror::Error;

/// Errors reported to the embedding frontend.
///
/// Stack and address anomalies during execution are deliberately not
/// errors; they are clamped or masked so that malformed ROMs keep
/// running, as the original machine tolerated them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    /// The ROM does not fit between the program start address and the end
    /// of memory. Fatal to the load; the machine must not be run after it.
    #[error("ROM is {size} bytes but only {capacity} bytes of program memory are available")]
    RomTooLarge { size: usize, capacity: usize },
}
