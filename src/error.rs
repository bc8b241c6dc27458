use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::memory::Byte;

pub type Result<T, E = MachineError> = std::result::Result<T, E>;

/// Fatal conditions that stop the machine at the cycle they were detected in
#[derive(Debug, Error)]
pub enum MachineError {
    /// The program image could not be opened
    #[error("program not found: {}", path.display())]
    ProgramNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The program image exists but could not be read as text
    #[error("failed to read program: {}", path.display())]
    ProgramUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Memory access outside of `[0, size)`
    #[error("memory has no address `0x{address:x}` (size {size})")]
    OutOfBounds { address: usize, size: usize },
    /// Register index outside of R0-R7
    #[error("no register R{index}")]
    InvalidRegister { index: Byte },
    /// No instruction matches the fetched byte
    #[error("unknown command: {opcode} (0x{opcode:02X}) at 0x{pc:02X}")]
    UnknownOpcode { opcode: Byte, pc: Byte },
    /// Writing PRN output failed
    #[error("failed to write output")]
    Output(#[from] io::Error),
}
