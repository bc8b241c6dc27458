use crate::error::{MachineError, Result};
use crate::memory::Byte;

/// Number of general purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Bits of the flags register: `00000LGE`
pub struct Flags;

impl Flags {
    pub const EQUAL: Byte = 0b0000_0001;
    pub const GREATER: Byte = 0b0000_0010;
    pub const LESS: Byte = 0b0000_0100;
}

/// Register file of the CPU
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registers {
    /// General purpose registers R0-R7
    pub reg: [Byte; REGISTER_COUNT],
    /// Program counter
    pub pc: Byte,
    /// Stack pointer
    pub sp: Byte,
    /// Flags, see [`Flags`]
    pub fl: Byte,
}

impl Registers {
    fn check(index: Byte) -> Result<usize> {
        let i = index as usize;
        if i < REGISTER_COUNT {
            Ok(i)
        } else {
            Err(MachineError::InvalidRegister { index })
        }
    }

    /// Reads general purpose register `index`
    pub fn get(&self, index: Byte) -> Result<Byte> {
        Ok(self.reg[Self::check(index)?])
    }

    /// Writes general purpose register `index`
    pub fn set(&mut self, index: Byte, value: Byte) -> Result<()> {
        self.reg[Self::check(index)?] = value;
        Ok(())
    }

    /// True if the last comparison found both operands equal
    pub fn equal(&self) -> bool {
        self.fl & Flags::EQUAL != 0
    }
}
