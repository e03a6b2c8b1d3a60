use thiserror::Error;

use crate::arch::Arch;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported architecture: {0}")]
    UnsupportedArch(String),

    #[error("no field '{name}' in the {arch} sigreturn frame")]
    UnknownField { arch: Arch, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
