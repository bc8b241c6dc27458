use std::cmp::Ordering;

use crate::error::Result;
use crate::memory::Byte;
use crate::registers::{Flags, Registers};

/// Operations the ALU can perform on two registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// `reg[a] = reg[a] + reg[b]`, wrapping
    Add,
    /// `reg[a] = reg[a] * reg[b]`, wrapping
    Mul,
    /// Sets exactly one of the flags EQUAL, GREATER or LESS
    Cmp,
}

impl Registers {
    /// Runs `op` on registers `a` and `b`
    pub fn alu(&mut self, op: AluOp, a: Byte, b: Byte) -> Result<()> {
        let x = self.get(a)?;
        let y = self.get(b)?;

        match op {
            AluOp::Add => self.set(a, x.wrapping_add(y))?,
            AluOp::Mul => self.set(a, x.wrapping_mul(y))?,
            AluOp::Cmp => {
                self.fl = match x.cmp(&y) {
                    Ordering::Equal => Flags::EQUAL,
                    Ordering::Less => Flags::LESS,
                    Ordering::Greater => Flags::GREATER,
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::Result;

    fn regs(a: Byte, b: Byte) -> Registers {
        let mut regs = Registers::default();
        regs.reg[0] = a;
        regs.reg[1] = b;
        regs
    }

    #[test]
    fn test_add_wraps() -> Result<()> {
        let mut r = regs(200, 100);
        r.alu(AluOp::Add, 0, 1)?;
        assert_eq!(r.reg[0], 44);
        assert_eq!(r.reg[1], 100);

        let mut r = regs(100, 200);
        r.alu(AluOp::Add, 0, 1)?;
        assert_eq!(r.reg[0], 44);

        Ok(())
    }

    #[test]
    fn test_mul_wraps() -> Result<()> {
        let mut r = regs(8, 9);
        r.alu(AluOp::Mul, 0, 1)?;
        assert_eq!(r.reg[0], 72);

        let mut r = regs(16, 17);
        r.alu(AluOp::Mul, 0, 1)?;
        assert_eq!(r.reg[0], 16); // 272 mod 256

        Ok(())
    }

    #[test]
    fn test_same_register() -> Result<()> {
        let mut r = regs(3, 0);
        r.alu(AluOp::Add, 0, 0)?;
        assert_eq!(r.reg[0], 6);

        Ok(())
    }

    #[test]
    fn test_cmp() -> Result<()> {
        let mut r = regs(5, 5);
        r.alu(AluOp::Cmp, 0, 1)?;
        assert_eq!(r.fl, Flags::EQUAL);

        let mut r = regs(4, 5);
        r.alu(AluOp::Cmp, 0, 1)?;
        assert_eq!(r.fl, Flags::LESS);

        let mut r = regs(6, 5);
        r.alu(AluOp::Cmp, 0, 1)?;
        assert_eq!(r.fl, Flags::GREATER);

        // registers untouched
        assert_eq!(r.reg[0], 6);
        assert_eq!(r.reg[1], 5);

        Ok(())
    }

    #[test]
    fn test_invalid_register_leaves_state() {
        let mut r = regs(1, 2);
        assert!(r.alu(AluOp::Add, 0, 9).is_err());
        assert_eq!(r, regs(1, 2));
    }
}
