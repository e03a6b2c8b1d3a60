//! Sigreturn frame construction.
//!
//! Builds the fake `sigcontext`/`ucontext` frames the Linux kernel consumes
//! when a forged `sigreturn(2)` or `rt_sigreturn(2)` executes. The kernel
//! reloads every register from the frame in one step, so a frame placed at a
//! known address gives full control over the instruction pointer, stack
//! pointer, and argument registers at once.
//!
//! Layouts match `struct sigframe` on i386 (20 × 4-byte slots) and
//! `struct rt_sigframe`'s ucontext on x86_64 (31 × 8-byte slots). Slots are
//! addressed through the per-arch field enums [`X86Field`] and [`X64Field`];
//! padding slots the kernel ignores have no variant and stay zero.

use crate::arch::Arch;
use crate::error::{Error, Result};

/// Fields of the x86 sigreturn frame that can be set.
///
/// Slots 12, 13 and 17 (`trapno`, `err`, `esp_at_signal`) are padding as far
/// as a forged frame is concerned and are not addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum X86Field {
    Gs,
    Fs,
    Es,
    Ds,
    Edi,
    Esi,
    Ebp,
    Esp,
    Ebx,
    Edx,
    Ecx,
    Eax,
    Eip,
    Cs,
    Eflags,
    Ss,
    Fpstate,
}

impl X86Field {
    /// Every settable field, in slot order.
    pub const ALL: [X86Field; 17] = [
        X86Field::Gs, X86Field::Fs, X86Field::Es, X86Field::Ds,
        X86Field::Edi, X86Field::Esi, X86Field::Ebp, X86Field::Esp,
        X86Field::Ebx, X86Field::Edx, X86Field::Ecx, X86Field::Eax,
        X86Field::Eip, X86Field::Cs, X86Field::Eflags, X86Field::Ss,
        X86Field::Fpstate,
    ];

    /// Slot index in the kernel's frame order.
    pub const fn slot(self) -> usize {
        match self {
            X86Field::Gs => 0,
            X86Field::Fs => 1,
            X86Field::Es => 2,
            X86Field::Ds => 3,
            X86Field::Edi => 4,
            X86Field::Esi => 5,
            X86Field::Ebp => 6,
            X86Field::Esp => 7,
            X86Field::Ebx => 8,
            X86Field::Edx => 9,
            X86Field::Ecx => 10,
            X86Field::Eax => 11,
            X86Field::Eip => 14,
            X86Field::Cs => 15,
            X86Field::Eflags => 16,
            X86Field::Ss => 18,
            X86Field::Fpstate => 19,
        }
    }

    /// Byte offset of this field in the serialized frame.
    pub const fn offset(self) -> usize {
        self.slot() * 4
    }

    /// Kernel name of this field.
    pub const fn name(self) -> &'static str {
        match self {
            X86Field::Gs => "gs",
            X86Field::Fs => "fs",
            X86Field::Es => "es",
            X86Field::Ds => "ds",
            X86Field::Edi => "edi",
            X86Field::Esi => "esi",
            X86Field::Ebp => "ebp",
            X86Field::Esp => "esp",
            X86Field::Ebx => "ebx",
            X86Field::Edx => "edx",
            X86Field::Ecx => "ecx",
            X86Field::Eax => "eax",
            X86Field::Eip => "eip",
            X86Field::Cs => "cs",
            X86Field::Eflags => "eflags",
            X86Field::Ss => "ss",
            X86Field::Fpstate => "fpstate",
        }
    }

    /// Look up a field by its kernel name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gs" => Some(X86Field::Gs),
            "fs" => Some(X86Field::Fs),
            "es" => Some(X86Field::Es),
            "ds" => Some(X86Field::Ds),
            "edi" => Some(X86Field::Edi),
            "esi" => Some(X86Field::Esi),
            "ebp" => Some(X86Field::Ebp),
            "esp" => Some(X86Field::Esp),
            "ebx" => Some(X86Field::Ebx),
            "edx" => Some(X86Field::Edx),
            "ecx" => Some(X86Field::Ecx),
            "eax" => Some(X86Field::Eax),
            "eip" => Some(X86Field::Eip),
            "cs" => Some(X86Field::Cs),
            "eflags" => Some(X86Field::Eflags),
            "ss" => Some(X86Field::Ss),
            "fpstate" => Some(X86Field::Fpstate),
            _ => None,
        }
    }
}

/// Fields of the x86_64 rt_sigreturn frame that can be set.
///
/// Slot 29 (`__reserved`) is padding and is not addressable. The `csgsfs`
/// field packs `cs|gs|fs|ss` as 4 × u16 in one u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum X64Field {
    UcFlags,
    UcLink,
    SsSp,
    SsFlags,
    SsSize,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    Rdi,
    Rsi,
    Rbp,
    Rbx,
    Rdx,
    Rax,
    Rcx,
    Rsp,
    Rip,
    Eflags,
    Csgsfs,
    Err,
    Trapno,
    Oldmask,
    Cr2,
    Fpstate,
    Sigmask,
}

impl X64Field {
    /// Every settable field, in slot order.
    pub const ALL: [X64Field; 30] = [
        X64Field::UcFlags, X64Field::UcLink, X64Field::SsSp,
        X64Field::SsFlags, X64Field::SsSize,
        X64Field::R8, X64Field::R9, X64Field::R10, X64Field::R11,
        X64Field::R12, X64Field::R13, X64Field::R14, X64Field::R15,
        X64Field::Rdi, X64Field::Rsi, X64Field::Rbp, X64Field::Rbx,
        X64Field::Rdx, X64Field::Rax, X64Field::Rcx, X64Field::Rsp,
        X64Field::Rip, X64Field::Eflags, X64Field::Csgsfs,
        X64Field::Err, X64Field::Trapno, X64Field::Oldmask, X64Field::Cr2,
        X64Field::Fpstate, X64Field::Sigmask,
    ];

    /// Slot index in the kernel's frame order.
    pub const fn slot(self) -> usize {
        match self {
            X64Field::UcFlags => 0,
            X64Field::UcLink => 1,
            X64Field::SsSp => 2,
            X64Field::SsFlags => 3,
            X64Field::SsSize => 4,
            X64Field::R8 => 5,
            X64Field::R9 => 6,
            X64Field::R10 => 7,
            X64Field::R11 => 8,
            X64Field::R12 => 9,
            X64Field::R13 => 10,
            X64Field::R14 => 11,
            X64Field::R15 => 12,
            X64Field::Rdi => 13,
            X64Field::Rsi => 14,
            X64Field::Rbp => 15,
            X64Field::Rbx => 16,
            X64Field::Rdx => 17,
            X64Field::Rax => 18,
            X64Field::Rcx => 19,
            X64Field::Rsp => 20,
            X64Field::Rip => 21,
            X64Field::Eflags => 22,
            X64Field::Csgsfs => 23,
            X64Field::Err => 24,
            X64Field::Trapno => 25,
            X64Field::Oldmask => 26,
            X64Field::Cr2 => 27,
            X64Field::Fpstate => 28,
            X64Field::Sigmask => 30,
        }
    }

    /// Byte offset of this field in the serialized frame.
    pub const fn offset(self) -> usize {
        self.slot() * 8
    }

    /// Kernel name of this field.
    pub const fn name(self) -> &'static str {
        match self {
            X64Field::UcFlags => "uc_flags",
            X64Field::UcLink => "uc_link",
            X64Field::SsSp => "ss_sp",
            X64Field::SsFlags => "ss_flags",
            X64Field::SsSize => "ss_size",
            X64Field::R8 => "r8",
            X64Field::R9 => "r9",
            X64Field::R10 => "r10",
            X64Field::R11 => "r11",
            X64Field::R12 => "r12",
            X64Field::R13 => "r13",
            X64Field::R14 => "r14",
            X64Field::R15 => "r15",
            X64Field::Rdi => "rdi",
            X64Field::Rsi => "rsi",
            X64Field::Rbp => "rbp",
            X64Field::Rbx => "rbx",
            X64Field::Rdx => "rdx",
            X64Field::Rax => "rax",
            X64Field::Rcx => "rcx",
            X64Field::Rsp => "rsp",
            X64Field::Rip => "rip",
            X64Field::Eflags => "eflags",
            X64Field::Csgsfs => "csgsfs",
            X64Field::Err => "err",
            X64Field::Trapno => "trapno",
            X64Field::Oldmask => "oldmask",
            X64Field::Cr2 => "cr2",
            X64Field::Fpstate => "fpstate",
            X64Field::Sigmask => "sigmask",
        }
    }

    /// Look up a field by its kernel name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "uc_flags" => Some(X64Field::UcFlags),
            "uc_link" => Some(X64Field::UcLink),
            "ss_sp" => Some(X64Field::SsSp),
            "ss_flags" => Some(X64Field::SsFlags),
            "ss_size" => Some(X64Field::SsSize),
            "r8" => Some(X64Field::R8),
            "r9" => Some(X64Field::R9),
            "r10" => Some(X64Field::R10),
            "r11" => Some(X64Field::R11),
            "r12" => Some(X64Field::R12),
            "r13" => Some(X64Field::R13),
            "r14" => Some(X64Field::R14),
            "r15" => Some(X64Field::R15),
            "rdi" => Some(X64Field::Rdi),
            "rsi" => Some(X64Field::Rsi),
            "rbp" => Some(X64Field::Rbp),
            "rbx" => Some(X64Field::Rbx),
            "rdx" => Some(X64Field::Rdx),
            "rax" => Some(X64Field::Rax),
            "rcx" => Some(X64Field::Rcx),
            "rsp" => Some(X64Field::Rsp),
            "rip" => Some(X64Field::Rip),
            "eflags" | "rflags" => Some(X64Field::Eflags),
            "csgsfs" => Some(X64Field::Csgsfs),
            "err" => Some(X64Field::Err),
            "trapno" => Some(X64Field::Trapno),
            "oldmask" => Some(X64Field::Oldmask),
            "cr2" => Some(X64Field::Cr2),
            "fpstate" => Some(X64Field::Fpstate),
            "sigmask" => Some(X64Field::Sigmask),
            _ => None,
        }
    }
}

/// A frame field tagged by the architecture it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    X86(X86Field),
    X64(X64Field),
}

impl Field {
    /// Kernel name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::X86(f) => f.name(),
            Field::X64(f) => f.name(),
        }
    }
}

impl From<X86Field> for Field {
    fn from(f: X86Field) -> Self {
        Field::X86(f)
    }
}

impl From<X64Field> for Field {
    fn from(f: X64Field) -> Self {
        Field::X64(f)
    }
}

/// One slot in a frame layout table.
#[derive(Debug, Clone, Copy)]
pub struct SlotInfo {
    /// Kernel name of the field occupying the slot.
    pub name: &'static str,
    /// Value written at construction time.
    pub default: u64,
    /// Padding slot that cannot be set by callers.
    pub reserved: bool,
}

/// x86 sigreturn frame layout, in kernel order (20 slots, 4 bytes each).
///
/// `cs`/`ss` default to the flat-model user selectors; the kernel refuses
/// the frame or resumes in an unusable mode without them.
pub const LAYOUT_X86: &[SlotInfo] = &[
    SlotInfo { name: "gs",            default: 0,    reserved: false },
    SlotInfo { name: "fs",            default: 0,    reserved: false },
    SlotInfo { name: "es",            default: 0,    reserved: false },
    SlotInfo { name: "ds",            default: 0,    reserved: false },
    SlotInfo { name: "edi",           default: 0,    reserved: false },
    SlotInfo { name: "esi",           default: 0,    reserved: false },
    SlotInfo { name: "ebp",           default: 0,    reserved: false },
    SlotInfo { name: "esp",           default: 0,    reserved: false },
    SlotInfo { name: "ebx",           default: 0,    reserved: false },
    SlotInfo { name: "edx",           default: 0,    reserved: false },
    SlotInfo { name: "ecx",           default: 0,    reserved: false },
    SlotInfo { name: "eax",           default: 0,    reserved: false },
    SlotInfo { name: "trapno",        default: 0,    reserved: true },
    SlotInfo { name: "err",           default: 0,    reserved: true },
    SlotInfo { name: "eip",           default: 0,    reserved: false },
    SlotInfo { name: "cs",            default: 0x73, reserved: false },
    SlotInfo { name: "eflags",        default: 0,    reserved: false },
    SlotInfo { name: "esp_at_signal", default: 0,    reserved: true },
    SlotInfo { name: "ss",            default: 0x7b, reserved: false },
    SlotInfo { name: "fpstate",       default: 0,    reserved: false },
];

/// x86_64 rt_sigreturn frame layout, in kernel order (31 slots, 8 bytes each).
///
/// The default `csgsfs` of 0x33 is the 64-bit user code selector alone, the
/// flat-model value a forged frame needs; targets that also restore `ss`
/// from here want `0x002b_0000_0000_0033`.
pub const LAYOUT_X86_64: &[SlotInfo] = &[
    SlotInfo { name: "uc_flags",   default: 0,    reserved: false },
    SlotInfo { name: "uc_link",    default: 0,    reserved: false },
    SlotInfo { name: "ss_sp",      default: 0,    reserved: false },
    SlotInfo { name: "ss_flags",   default: 0,    reserved: false },
    SlotInfo { name: "ss_size",    default: 0,    reserved: false },
    SlotInfo { name: "r8",         default: 0,    reserved: false },
    SlotInfo { name: "r9",         default: 0,    reserved: false },
    SlotInfo { name: "r10",        default: 0,    reserved: false },
    SlotInfo { name: "r11",        default: 0,    reserved: false },
    SlotInfo { name: "r12",        default: 0,    reserved: false },
    SlotInfo { name: "r13",        default: 0,    reserved: false },
    SlotInfo { name: "r14",        default: 0,    reserved: false },
    SlotInfo { name: "r15",        default: 0,    reserved: false },
    SlotInfo { name: "rdi",        default: 0,    reserved: false },
    SlotInfo { name: "rsi",        default: 0,    reserved: false },
    SlotInfo { name: "rbp",        default: 0,    reserved: false },
    SlotInfo { name: "rbx",        default: 0,    reserved: false },
    SlotInfo { name: "rdx",        default: 0,    reserved: false },
    SlotInfo { name: "rax",        default: 0,    reserved: false },
    SlotInfo { name: "rcx",        default: 0,    reserved: false },
    SlotInfo { name: "rsp",        default: 0,    reserved: false },
    SlotInfo { name: "rip",        default: 0,    reserved: false },
    SlotInfo { name: "eflags",     default: 0,    reserved: false },
    SlotInfo { name: "csgsfs",     default: 0x33, reserved: false },
    SlotInfo { name: "err",        default: 0,    reserved: false },
    SlotInfo { name: "trapno",     default: 0,    reserved: false },
    SlotInfo { name: "oldmask",    default: 0,    reserved: false },
    SlotInfo { name: "cr2",        default: 0,    reserved: false },
    SlotInfo { name: "fpstate",    default: 0,    reserved: false },
    SlotInfo { name: "__reserved", default: 0,    reserved: true },
    SlotInfo { name: "sigmask",    default: 0,    reserved: false },
];

/// Size of the serialized x86 frame in bytes.
pub const FRAME_SIZE_X86: usize = 80; // 20 slots × 4 bytes

/// Size of the serialized x86_64 frame in bytes.
pub const FRAME_SIZE_X86_64: usize = 248; // 31 slots × 8 bytes

/// Frame layout table for an architecture, in kernel slot order.
pub fn layout(arch: Arch) -> &'static [SlotInfo] {
    match arch {
        Arch::X86 => LAYOUT_X86,
        Arch::X86_64 => LAYOUT_X86_64,
    }
}

/// Builder for one sigreturn frame.
///
/// The frame is a fixed-size little-endian byte buffer created with the
/// kernel-mandated defaults already applied; [`set`](Self::set) overwrites
/// single slots and [`bytes`](Self::bytes) exposes the serialized form at
/// any time.
///
/// # Examples
///
/// ```
/// use sigforge::arch::Arch;
/// use sigforge::frame::{SigreturnFrame, X64Field};
///
/// let mut frame = SigreturnFrame::new(Arch::X86_64);
/// frame.set(X64Field::Rax, 0xa)?;
/// frame.set(X64Field::Rdi, 0x0060_1000)?;
/// frame.set(X64Field::Rsi, 0x1000)?;
/// frame.set(X64Field::Rdx, 0x7)?;
/// assert_eq!(frame.bytes().len(), 248);
/// # Ok::<(), sigforge::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SigreturnFrame {
    arch: Arch,
    buf: Vec<u8>,
}

impl SigreturnFrame {
    /// Create a zeroed frame for `arch` and apply its layout defaults.
    pub fn new(arch: Arch) -> Self {
        let table = layout(arch);
        let mut frame = SigreturnFrame {
            arch,
            buf: vec![0u8; table.len() * arch.word_size()],
        };
        for (index, info) in table.iter().enumerate() {
            if info.default != 0 {
                frame.write_slot(index, info.default);
            }
        }
        frame
    }

    /// Architecture this frame targets.
    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Set `field` to `value`.
    ///
    /// Fails with [`Error::UnknownField`] when the field does not belong to
    /// this frame's architecture; nothing is written on error. Values wider
    /// than the slot are truncated to the word's low bits, the way a
    /// hardware register write discards high bits. The x86 `ss` slot holds
    /// a 16-bit selector: the low 16 bits are written and the upper two
    /// bytes stay zero.
    pub fn set<F: Into<Field>>(&mut self, field: F, value: u64) -> Result<()> {
        let index = self.slot_index(field.into())?;
        self.write_slot(index, value);
        Ok(())
    }

    /// Set a field by its kernel name, e.g. `"rax"` or `"eip"`.
    pub fn set_by_name(&mut self, name: &str, value: u64) -> Result<()> {
        let field = self.field_by_name(name)?;
        self.set(field, value)
    }

    /// Read back a field's current value.
    pub fn get<F: Into<Field>>(&self, field: F) -> Result<u64> {
        let index = self.slot_index(field.into())?;
        Ok(self.read_slot(index))
    }

    /// Serialized frame, one little-endian word per slot.
    ///
    /// The length is always slot count × word size ([`FRAME_SIZE_X86`] /
    /// [`FRAME_SIZE_X86_64`]); reading never changes the frame.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    fn field_by_name(&self, name: &str) -> Result<Field> {
        let field = match self.arch {
            Arch::X86 => X86Field::from_name(name).map(Field::X86),
            Arch::X86_64 => X64Field::from_name(name).map(Field::X64),
        };
        field.ok_or_else(|| Error::UnknownField {
            arch: self.arch,
            name: name.to_string(),
        })
    }

    fn slot_index(&self, field: Field) -> Result<usize> {
        match (self.arch, field) {
            (Arch::X86, Field::X86(f)) => Ok(f.slot()),
            (Arch::X86_64, Field::X64(f)) => Ok(f.slot()),
            (arch, field) => Err(Error::UnknownField {
                arch,
                name: field.name().to_string(),
            }),
        }
    }

    fn write_slot(&mut self, index: usize, value: u64) {
        let word = self.arch.word_size();
        let off = index * word;
        let le = value.to_le_bytes();
        self.buf[off..off + word].copy_from_slice(&le[..word]);
        // ss is a 16-bit selector in a 4-byte slot; its upper bytes stay zero.
        if self.arch == Arch::X86 && index == X86Field::Ss.slot() {
            self.buf[off + 2] = 0;
            self.buf[off + 3] = 0;
        }
    }

    fn read_slot(&self, index: usize) -> u64 {
        let word = self.arch.word_size();
        let off = index * word;
        let mut le = [0u8; 8];
        le[..word].copy_from_slice(&self.buf[off..off + word]);
        u64::from_le_bytes(le)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x86_size_and_defaults() {
        let frame = SigreturnFrame::new(Arch::X86);
        let bytes = frame.bytes();
        assert_eq!(bytes.len(), FRAME_SIZE_X86);
        // cs is slot 15 (offset 60), ss slot 18 (offset 72)
        assert_eq!(&bytes[60..64], &[0x73, 0, 0, 0]);
        assert_eq!(&bytes[72..76], &[0x7b, 0, 0, 0]);
    }

    #[test]
    fn x64_size_and_defaults() {
        let frame = SigreturnFrame::new(Arch::X86_64);
        let bytes = frame.bytes();
        assert_eq!(bytes.len(), FRAME_SIZE_X86_64);
        // csgsfs is slot 23, byte offset 184
        assert_eq!(&bytes[184..192], &[0x33, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn x64_syscall_frame() {
        let mut frame = SigreturnFrame::new(Arch::X86_64);
        frame.set(X64Field::Rax, 0xa).unwrap();
        frame.set(X64Field::Rdi, 0x0060_1000).unwrap();
        frame.set(X64Field::Rsi, 0x1000).unwrap();
        frame.set(X64Field::Rdx, 0x7).unwrap();
        let bytes = frame.bytes();
        assert_eq!(bytes.len(), 248);
        assert_eq!(&bytes[184..192], &[0x33, 0, 0, 0, 0, 0, 0, 0]);
        // rax is slot 18, byte offset 144
        assert_eq!(&bytes[144..152], &[0x0a, 0, 0, 0, 0, 0, 0, 0]);
        // rdi is slot 13, byte offset 104
        assert_eq!(&bytes[104..112], &[0, 0x10, 0x60, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn x64_rip_offset() {
        let mut frame = SigreturnFrame::new(Arch::X86_64);
        frame.set(X64Field::Rip, 0xDEAD_BEEF).unwrap();
        // rip is slot 21, byte offset 168
        let bytes = frame.bytes();
        let mut le = [0u8; 8];
        le.copy_from_slice(&bytes[168..176]);
        assert_eq!(u64::from_le_bytes(le), 0xDEAD_BEEF);
    }

    #[test]
    fn set_by_name_matches_typed_set() {
        let mut by_name = SigreturnFrame::new(Arch::X86_64);
        by_name.set_by_name("rip", 0x40_1000).unwrap();
        let mut typed = SigreturnFrame::new(Arch::X86_64);
        typed.set(X64Field::Rip, 0x40_1000).unwrap();
        assert_eq!(by_name.bytes(), typed.bytes());
    }

    #[test]
    fn ss_keeps_upper_bytes_zero() {
        let mut frame = SigreturnFrame::new(Arch::X86);
        frame.set(X86Field::Ss, 0x2b).unwrap();
        assert_eq!(&frame.bytes()[72..76], &[0x2b, 0, 0, 0]);
        frame.set(X86Field::Ss, 0x1_2345).unwrap();
        assert_eq!(&frame.bytes()[72..76], &[0x45, 0x23, 0, 0]);
        assert_eq!(frame.get(X86Field::Ss).unwrap(), 0x2345);
    }

    #[test]
    fn truncates_oversized_values() {
        let mut frame = SigreturnFrame::new(Arch::X86);
        frame.set(X86Field::Eax, 0x1_2345_6789).unwrap();
        // eax is slot 11, byte offset 44
        assert_eq!(&frame.bytes()[44..48], &[0x89, 0x67, 0x45, 0x23]);
        assert_eq!(frame.get(X86Field::Eax).unwrap(), 0x2345_6789);
    }

    #[test]
    fn unknown_name_leaves_frame_untouched() {
        let mut frame = SigreturnFrame::new(Arch::X86_64);
        frame.set(X64Field::Rip, 0x40_1000).unwrap();
        let before = frame.bytes().to_vec();
        let err = frame.set_by_name("xyz", 1).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref name, .. } if name == "xyz"));
        assert_eq!(frame.bytes(), &before[..]);
    }

    #[test]
    fn reserved_slots_not_addressable() {
        let mut x86 = SigreturnFrame::new(Arch::X86);
        assert!(x86.set_by_name("trapno", 1).is_err());
        assert!(x86.set_by_name("err", 1).is_err());
        assert!(x86.set_by_name("esp_at_signal", 1).is_err());

        let mut x64 = SigreturnFrame::new(Arch::X86_64);
        assert!(x64.set_by_name("__reserved", 1).is_err());
        // trapno and err are real sigcontext fields on x86_64
        assert!(x64.set_by_name("trapno", 1).is_ok());
        assert!(x64.set_by_name("err", 1).is_ok());
    }

    #[test]
    fn wrong_arch_field_rejected() {
        let mut frame = SigreturnFrame::new(Arch::X86);
        let before = frame.bytes().to_vec();
        let err = frame.set(X64Field::Rax, 0xa).unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref name, .. } if name == "rax"));
        assert_eq!(frame.bytes(), &before[..]);

        let mut frame = SigreturnFrame::new(Arch::X86_64);
        assert!(frame.set(X86Field::Eax, 0xa).is_err());
    }

    #[test]
    fn layout_tables_match_field_enums() {
        assert_eq!(LAYOUT_X86.len(), 20);
        assert_eq!(LAYOUT_X86_64.len(), 31);
        assert_eq!(FRAME_SIZE_X86, LAYOUT_X86.len() * 4);
        assert_eq!(FRAME_SIZE_X86_64, LAYOUT_X86_64.len() * 8);

        for field in X86Field::ALL {
            let info = &LAYOUT_X86[field.slot()];
            assert_eq!(info.name, field.name());
            assert!(!info.reserved, "{} marked reserved", field.name());
        }
        for field in X64Field::ALL {
            let info = &LAYOUT_X86_64[field.slot()];
            assert_eq!(info.name, field.name());
            assert!(!info.reserved, "{} marked reserved", field.name());
        }

        // every non-reserved slot is reachable through its enum
        let settable_x86 = LAYOUT_X86.iter().filter(|s| !s.reserved).count();
        assert_eq!(settable_x86, X86Field::ALL.len());
        let settable_x64 = LAYOUT_X86_64.iter().filter(|s| !s.reserved).count();
        assert_eq!(settable_x64, X64Field::ALL.len());
    }

    #[test]
    fn name_round_trips() {
        for field in X86Field::ALL {
            assert_eq!(X86Field::from_name(field.name()), Some(field));
        }
        for field in X64Field::ALL {
            assert_eq!(X64Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn serialization_is_repeatable() {
        let mut frame = SigreturnFrame::new(Arch::X86_64);
        frame.set(X64Field::Rsp, 0x7fff_0000).unwrap();
        let first = frame.bytes().to_vec();
        assert_eq!(frame.bytes(), &first[..]);

        // the builder stays usable after serialization
        frame.set(X64Field::Rip, 0x40_1000).unwrap();
        assert_eq!(frame.bytes().len(), FRAME_SIZE_X86_64);
        assert_eq!(frame.get(X64Field::Rsp).unwrap(), 0x7fff_0000);
        assert_eq!(frame.get(X64Field::Rip).unwrap(), 0x40_1000);
    }

    #[test]
    fn get_reads_back_set_values() {
        let mut frame = SigreturnFrame::new(Arch::X86);
        frame.set(X86Field::Eip, 0x0804_8000).unwrap();
        assert_eq!(frame.get(X86Field::Eip).unwrap(), 0x0804_8000);
        assert_eq!(frame.get(X86Field::Cs).unwrap(), 0x73);
    }
}
