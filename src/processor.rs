use std::convert::TryFrom;
use std::fmt::Write as _;
use std::io::Write;

use crate::alu::AluOp;
use crate::error::{MachineError, Result};
use crate::memory::{Byte, Memory, STD_MEM_SIZE};
use crate::registers::Registers;
use log::*;
use num_enum::IntoPrimitive;
use num_enum::TryFromPrimitive;

/// Processor with the reference amount of memory
pub type StdProcessor = Processor<STD_MEM_SIZE>;

/// Emulates a CPU together with the memory it owns
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Processor<const S: usize> {
    /// R0-R7, PC, SP and FL
    pub registers: Registers,
    /// Program and stack memory
    pub memory: Memory<S>,
    /// Set once HLT has been executed
    pub halted: bool,
}

impl<const S: usize> Processor<S> {
    /// Initializes a new CPU running the program in `memory` from address 0
    pub fn new(memory: Memory<S>) -> Self {
        Self {
            registers: Registers::default(),
            memory,
            halted: false,
        }
    }

    /// Writes `program` into memory starting at address 0
    pub fn load(&mut self, program: &[Byte]) -> Result<()> {
        self.memory.write_array(0, program)
    }

    /// Moves the PC past `instruction` and its operands
    fn advance(&mut self, instruction: Instruction) -> Result<()> {
        let next = self.registers.pc as usize + 1 + instruction.operands();
        self.registers.pc = Byte::try_from(next).map_err(|_| MachineError::OutOfBounds {
            address: next,
            size: S,
        })?;
        Ok(())
    }

    /// Executes a single, already fetched instruction. PRN output goes to `out`.
    pub fn execute_instruction<W: Write>(
        &mut self,
        instruction: Instruction,
        operand_a: Byte,
        operand_b: Byte,
        out: &mut W,
    ) -> Result<()> {
        let regs = &mut self.registers;

        match instruction {
            Instruction::HLT => {
                self.halted = true;
                self.advance(instruction)?;

                debug!("HLT");
            }
            Instruction::LDI => {
                regs.set(operand_a, operand_b)?;
                self.advance(instruction)?;

                debug!("LDI R{} {}", operand_a, operand_b);
            }
            Instruction::PRN => {
                let value = regs.get(operand_a)?;
                writeln!(out, "{}", value)?;
                self.advance(instruction)?;

                debug!("PRN R{}: {}", operand_a, value);
            }
            Instruction::ADD => {
                regs.alu(AluOp::Add, operand_a, operand_b)?;
                self.advance(instruction)?;

                debug!("ADD R{} R{}", operand_a, operand_b);
            }
            Instruction::MUL => {
                regs.alu(AluOp::Mul, operand_a, operand_b)?;
                self.advance(instruction)?;

                debug!("MUL R{} R{}", operand_a, operand_b);
            }
            Instruction::CMP => {
                regs.alu(AluOp::Cmp, operand_a, operand_b)?;
                self.advance(instruction)?;

                debug!("CMP R{} R{}: {:08b}", operand_a, operand_b, self.registers.fl);
            }
            Instruction::PUSH => {
                let value = regs.get(operand_a)?;

                // write value to stack
                let sp = regs.sp.wrapping_sub(1);
                self.memory.write_byte(sp as usize, value)?;
                self.registers.sp = sp;
                self.advance(instruction)?;

                debug!("PUSH R{}: {}", operand_a, value);
            }
            Instruction::POP => {
                let value = self.memory.read_byte(regs.sp as usize)?;
                regs.set(operand_a, value)?;
                regs.sp = regs.sp.wrapping_add(1);
                self.advance(instruction)?;

                debug!("POP R{}: {}", operand_a, value);
            }
            Instruction::CALL => {
                let target = regs.get(operand_a)?;
                // return address is the byte after the CALL's operand
                let ret = regs.pc.wrapping_add(2);

                let sp = regs.sp.wrapping_sub(1);
                self.memory.write_byte(sp as usize, ret)?;
                self.registers.sp = sp;
                self.registers.pc = target;

                debug!("CALL R{}: 0x{:02X} (return to 0x{:02X})", operand_a, target, ret);
            }
            Instruction::RET => {
                // SP is left where it is; the return address stays on the stack
                let ret = self.memory.read_byte(regs.sp as usize)?;
                regs.pc = ret;

                debug!("RET 0x{:02X}", ret);
            }
            Instruction::JMP => {
                let target = regs.get(operand_a)?;
                regs.pc = target;

                debug!("JMP R{}: 0x{:02X}", operand_a, target);
            }
            Instruction::JEQ => {
                let target = regs.get(operand_a)?;
                let taken = regs.equal();
                if taken {
                    regs.pc = target;
                } else {
                    self.advance(instruction)?;
                }

                debug!("JEQ R{}: 0x{:02X} taken={}", operand_a, target, taken);
            }
            Instruction::JNE => {
                let target = regs.get(operand_a)?;
                let taken = !regs.equal();
                if taken {
                    regs.pc = target;
                } else {
                    self.advance(instruction)?;
                }

                debug!("JNE R{}: 0x{:02X} taken={}", operand_a, target, taken);
            }
        }

        Ok(())
    }

    /// Runs one execution step
    pub fn execute<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let pc = self.registers.pc;
        // Read opcode where PC is, operands are always fetched
        let opcode = self.memory.read_byte(pc as usize)?;
        let operand_a = self.memory.read_byte(pc as usize + 1)?;
        let operand_b = self.memory.read_byte(pc as usize + 2)?;

        let instruction = Instruction::try_from(opcode)
            .map_err(|_| MachineError::UnknownOpcode { opcode, pc })?;
        self.execute_instruction(instruction, operand_a, operand_b, out)
    }

    /// Run program until HLT or a fatal error
    pub fn execute_until_halt<W: Write>(&mut self, out: &mut W) -> Result<()> {
        while !self.halted {
            if log_enabled!(Level::Trace) {
                trace!("{}", self.trace());
            }
            self.execute(out)?;
        }

        info!("Program halted at 0x{:02X}", self.registers.pc);

        Ok(())
    }

    /// Renders the current state as `TRACE: PC | FL IR A B | R0 .. R7`
    pub fn trace(&self) -> String {
        let pc = self.registers.pc as usize;
        let byte = |position: usize| match self.memory.read_byte(position) {
            Ok(value) => format!("{:02X}", value),
            Err(_) => "--".to_owned(),
        };

        let mut line = format!(
            "TRACE: {:02X} | {:02X} {} {} {} |",
            pc,
            self.registers.fl,
            byte(pc),
            byte(pc + 1),
            byte(pc + 2)
        );
        for value in self.registers.reg.iter() {
            let _ = write!(line, " {:02X}", value);
        }

        line
    }
}

macro_rules! instructions {
    ( $( $( #[doc = $doc:expr] )+ $name:ident = $repr:literal ( $operands:literal ) , )+ ) => {
        /// Defines the instructions. The number in parentheses is the operand count.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        #[derive(TryFromPrimitive, IntoPrimitive)]
        pub enum Instruction {
            $(
                $( #[doc = $doc] )+
                $name = $repr,
            )+
        }

        impl Instruction {
            pub const ALL: &'static [Self] = &[
                $( Self::$name , )+
            ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name) , )+
                }
            }

            /// Number of operand bytes following the opcode
            pub const fn operands(&self) -> usize {
                match self {
                    $( Self::$name => $operands , )+
                }
            }
        }

        impl ::std::fmt::Display for Instruction {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    }
}

instructions! {
    /// Stop the execution of the program
    HLT = 0b0000_0001 (0),
    /// Return from a subroutine to the address on top of the stack
    RET = 0b0001_0001 (0),
    /// Push a register onto the stack
    PUSH = 0b0100_0101 (1),
    /// Pop the top of the stack into a register
    POP = 0b0100_0110 (1),
    /// Prints a register as a decimal number
    PRN = 0b0100_0111 (1),
    /// Call the subroutine at the address held by a register
    CALL = 0b0101_0000 (1),
    /// Jump to the address held by a register
    JMP = 0b0101_0100 (1),
    /// Jump if the equal flag is set
    JEQ = 0b0101_0101 (1),
    /// Jump if the equal flag is clear
    JNE = 0b0101_0110 (1),
    /// Load an immediate into a register
    /// @param register
    /// @param value
    LDI = 0b1000_0010 (2),
    /// Add two registers, result in the first
    ADD = 0b1010_0000 (2),
    /// Multiply two registers, result in the first
    MUL = 0b1010_0010 (2),
    /// Compare two registers and set the flags
    CMP = 0b1010_0111 (2),
}
