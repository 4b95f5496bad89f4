// sml/registers.rs
use crate::sml::errors::SmlError;
use std::fmt;
use std::str::FromStr;

/// The eight named registers of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Register {
    EAX,
    EBX,
    ECX,
    EDX,
    ESP,
    EBP,
    ESI,
    EDI,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::EAX,
        Register::EBX,
        Register::ECX,
        Register::EDX,
        Register::ESP,
        Register::EBP,
        Register::ESI,
        Register::EDI,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Register::EAX => "EAX",
            Register::EBX => "EBX",
            Register::ECX => "ECX",
            Register::EDX => "EDX",
            Register::ESP => "ESP",
            Register::EBP => "EBP",
            Register::ESI => "ESI",
            Register::EDI => "EDI",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Register {
    type Err = SmlError;

    /// Names are matched exactly: `eax` is not a register.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Register::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| SmlError::InvalidRegisterName(s.to_string()))
    }
}

/// Register bank: one `i32` per [`Register`], all zero after construction or `clear`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Registers {
    regs: [i32; 8],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regs = [0; 8];
    }

    #[inline]
    pub fn get(&self, r: Register) -> i32 {
        self.regs[r.index()]
    }

    #[inline]
    pub fn set(&mut self, r: Register, v: i32) {
        self.regs[r.index()] = v;
    }

    /// `(register, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, i32)> + '_ {
        Register::ALL.into_iter().map(|r| (r, self.get(r)))
    }
}

impl fmt::Display for Registers {
    /// `[EAX = 1, EBP = 0, ...]`, sorted by register name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|(r, _)| r.name());
        f.write_str("[")?;
        for (i, (r, v)) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{r} = {v}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bank_is_zeroed() {
        let regs = Registers::new();
        for r in Register::ALL {
            assert_eq!(regs.get(r), 0);
        }
    }

    #[test]
    fn set_get_and_clear() {
        let mut regs = Registers::new();
        regs.set(Register::ESI, -17);
        regs.set(Register::EDX, 4);
        assert_eq!(regs.get(Register::ESI), -17);
        assert_eq!(regs.get(Register::EDX), 4);
        assert_eq!(regs.get(Register::EAX), 0);
        regs.clear();
        assert_eq!(regs, Registers::new());
    }

    #[test]
    fn register_names_parse_exactly() {
        for r in Register::ALL {
            assert_eq!(r.name().parse::<Register>(), Ok(r));
        }
        assert_eq!(
            "eax".parse::<Register>(),
            Err(SmlError::InvalidRegisterName("eax".into()))
        );
        assert!("R1".parse::<Register>().is_err());
        assert!("".parse::<Register>().is_err());
    }

    #[test]
    fn display_is_sorted_by_name() {
        let mut regs = Registers::new();
        regs.set(Register::EAX, 9);
        regs.set(Register::ESP, -1);
        assert_eq!(
            regs.to_string(),
            "[EAX = 9, EBP = 0, EBX = 0, ECX = 0, EDI = 0, EDX = 0, ESI = 0, ESP = -1]"
        );
    }
}
