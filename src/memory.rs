use crate::error::{MachineError, Result};

pub mod parse;

pub type Byte = u8; // 1 byte

/// Size of the reference machine's address space
pub const STD_MEM_SIZE: usize = 256;

/// Default memory
pub type StdMem = Memory<STD_MEM_SIZE>;

/// Emulates memory for use with the CPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Memory<const S: usize> {
    /// The actual data of the memory
    pub data: [Byte; S],
}

impl<const S: usize> Default for Memory<S> {
    /// Initializes the memory
    fn default() -> Self {
        Memory { data: [0; S] }
    }
}

impl<const S: usize> Memory<S> {
    fn check(position: usize) -> Result<usize> {
        if position < S {
            Ok(position)
        } else {
            Err(MachineError::OutOfBounds {
                address: position,
                size: S,
            })
        }
    }

    /// Reads a byte from the memory
    pub fn read_byte(&self, position: usize) -> Result<Byte> {
        Ok(self.data[Self::check(position)?])
    }

    /// Writes a byte to the memory
    pub fn write_byte(&mut self, position: usize, value: Byte) -> Result<()> {
        self.data[Self::check(position)?] = value;
        Ok(())
    }

    /// Writes an array of bytes to the memory. Nothing is written if the
    /// array does not fit.
    pub fn write_array(&mut self, position: usize, data: &[Byte]) -> Result<()> {
        let end = position + data.len();
        if end > S {
            return Err(MachineError::OutOfBounds {
                address: end - 1,
                size: S,
            });
        }
        self.data[position..end].copy_from_slice(data);
        Ok(())
    }

    /// Logs every row of 16 bytes that holds anything but zeros
    pub fn dump(&self) {
        for (row, chunk) in self.data.chunks(16).enumerate() {
            if chunk.iter().all(|&byte| byte == 0) {
                continue;
            }

            let bytes: Vec<String> = chunk.iter().map(|byte| format!("{:02X}", byte)).collect();
            log::debug!("{:02X}: {}", row * 16, bytes.join(" "));
        }
    }
}

/// Writes a block of instructions directly into the memory
#[macro_export]
macro_rules! write_instructions {
    ( $mem:ident : $pos:expr => $( $byte:expr ),+ ) => {
        $mem.write_array($pos, &[
            $(
                $byte as $crate::memory::Byte,
            )+
        ])
    };
}
