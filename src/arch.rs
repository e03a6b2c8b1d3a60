//! Target architecture selection.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Architectures with a supported sigreturn frame layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    /// x86 (32-bit): 4-byte slots, consumed by `sigreturn(2)`.
    X86,
    /// x86_64 (64-bit): 8-byte slots, consumed by `rt_sigreturn(2)`.
    X86_64,
}

impl Arch {
    /// Width in bytes of one frame slot.
    pub fn word_size(self) -> usize {
        match self {
            Arch::X86 => 4,
            Arch::X86_64 => 8,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::X86 => write!(f, "x86"),
            Arch::X86_64 => write!(f, "x86_64"),
        }
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Arch::X86),
            "x64" | "x86_64" | "x86-64" | "amd64" => Ok(Arch::X86_64),
            _ => Err(Error::UnsupportedArch(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!("x86".parse::<Arch>().unwrap(), Arch::X86);
        assert_eq!("i386".parse::<Arch>().unwrap(), Arch::X86);
        assert_eq!("x64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("X86_64".parse::<Arch>().unwrap(), Arch::X86_64);
    }

    #[test]
    fn rejects_unsupported() {
        let err = "aarch64".parse::<Arch>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedArch(ref s) if s == "aarch64"));
    }

    #[test]
    fn word_sizes() {
        assert_eq!(Arch::X86.word_size(), 4);
        assert_eq!(Arch::X86_64.word_size(), 8);
    }

    #[test]
    fn display_names() {
        assert_eq!(format!("{}", Arch::X86), "x86");
        assert_eq!(format!("{}", Arch::X86_64), "x86_64");
    }
}
