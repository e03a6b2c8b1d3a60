//! sigforge — Sigreturn-Oriented Programming (SROP) frame builder for
//! Linux x86/x86_64.
//!
//! Constructs byte-exact `sigreturn(2)` / `rt_sigreturn(2)` register frames
//! for exploit development: place the bytes where a forged sigreturn will
//! consume them and the kernel loads every register in the frame at once.
//! The crate only produces bytes; locating a sigreturn gadget, placing the
//! frame in a target, and driving the target belong to the calling exploit.
//!
//! # Module overview
//!
//! - [`error`] — Error types used throughout the crate.
//! - [`arch`] — Supported architectures and their word sizes.
//! - [`frame`] — Frame layouts and the [`frame::SigreturnFrame`] builder.
//! - [`chain`] — SROP chain assembly and syscall preset frames.
//! - [`syscall`] — Syscall name/number mapping for payload construction.

pub mod arch;
pub mod chain;
pub mod error;
pub mod frame;
pub mod syscall;
