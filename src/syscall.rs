//! Linux syscall name/number mapping for SROP payloads.
//!
//! Covers the calls exploit chains actually issue rather than the full
//! syscall tables.

use crate::arch::Arch;

/// Get the syscall name for a given number on `arch`.
pub fn name(arch: Arch, number: u64) -> Option<&'static str> {
    table(arch)
        .iter()
        .find(|&&(n, _)| n == number)
        .map(|&(_, name)| name)
}

/// Get the syscall number for a given name on `arch`.
pub fn number(arch: Arch, name: &str) -> Option<u64> {
    table(arch)
        .iter()
        .find(|&&(_, n)| n.eq_ignore_ascii_case(name))
        .map(|&(num, _)| num)
}

fn table(arch: Arch) -> &'static [(u64, &'static str)] {
    match arch {
        Arch::X86 => SYSCALLS_X86,
        Arch::X86_64 => SYSCALLS_X86_64,
    }
}

/// x86_64 numbers, from arch/x86/entry/syscalls/syscall_64.tbl.
const SYSCALLS_X86_64: &[(u64, &str)] = &[
    (0, "read"),
    (1, "write"),
    (2, "open"),
    (3, "close"),
    (9, "mmap"),
    (10, "mprotect"),
    (11, "munmap"),
    (12, "brk"),
    (13, "rt_sigaction"),
    (14, "rt_sigprocmask"),
    (15, "rt_sigreturn"),
    (22, "pipe"),
    (32, "dup"),
    (33, "dup2"),
    (41, "socket"),
    (42, "connect"),
    (43, "accept"),
    (44, "sendto"),
    (45, "recvfrom"),
    (49, "bind"),
    (50, "listen"),
    (56, "clone"),
    (57, "fork"),
    (59, "execve"),
    (60, "exit"),
    (101, "ptrace"),
    (135, "personality"),
    (158, "arch_prctl"),
    (231, "exit_group"),
    (322, "execveat"),
];

/// i386 numbers, from arch/x86/entry/syscalls/syscall_32.tbl.
const SYSCALLS_X86: &[(u64, &str)] = &[
    (1, "exit"),
    (2, "fork"),
    (3, "read"),
    (4, "write"),
    (5, "open"),
    (6, "close"),
    (11, "execve"),
    (26, "ptrace"),
    (29, "pause"),
    (41, "dup"),
    (42, "pipe"),
    (45, "brk"),
    (63, "dup2"),
    (90, "mmap"),
    (91, "munmap"),
    (102, "socketcall"),
    (119, "sigreturn"),
    (125, "mprotect"),
    (136, "personality"),
    (173, "rt_sigreturn"),
    (192, "mmap2"),
    (252, "exit_group"),
    (358, "execveat"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(number(Arch::X86_64, "execve"), Some(59));
        assert_eq!(number(Arch::X86, "execve"), Some(11));
        assert_eq!(number(Arch::X86_64, "rt_sigreturn"), Some(15));
        assert_eq!(number(Arch::X86, "sigreturn"), Some(119));
    }

    #[test]
    fn lookup_by_number() {
        assert_eq!(name(Arch::X86_64, 10), Some("mprotect"));
        assert_eq!(name(Arch::X86, 125), Some("mprotect"));
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(number(Arch::X86_64, "EXECVE"), Some(59));
    }

    #[test]
    fn unknown_entries() {
        assert_eq!(number(Arch::X86_64, "not_a_syscall"), None);
        assert_eq!(name(Arch::X86, 0xffff), None);
    }
}
