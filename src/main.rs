use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use sigforge::arch::Arch;
use sigforge::chain;
use sigforge::frame::{self, SigreturnFrame};
use sigforge::syscall;

#[derive(Parser)]
#[command(name = "sigforge", about = "Linux x86/x86_64 sigreturn frame builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a frame from REG=VALUE assignments
    Build {
        /// Target architecture (x86, x64)
        arch: String,

        /// Register assignments, e.g. rax=0xf rip=0x401000
        #[arg(value_name = "REG=VALUE")]
        assignments: Vec<String>,

        /// Set the syscall-number register (eax/rax) from a syscall name
        #[arg(long, value_name = "NAME")]
        syscall: Option<String>,

        #[command(flatten)]
        output: Output,
    },

    /// Print the frame layout for an architecture
    Layout {
        /// Target architecture (x86, x64)
        arch: String,
    },

    /// Build a preset syscall frame
    Preset {
        #[command(subcommand)]
        preset: Preset,
    },
}

#[derive(Subcommand)]
enum Preset {
    /// execve("/bin/sh", NULL, NULL)
    Execve {
        /// Target architecture (x86, x64)
        arch: String,
        /// Address of a syscall gadget (syscall;ret or int 0x80)
        #[arg(long)]
        gadget: String,
        /// Address of a "/bin/sh\0" string in the target
        #[arg(long)]
        binsh: String,
        #[command(flatten)]
        output: Output,
    },
    /// mprotect(addr, len, prot)
    Mprotect {
        /// Target architecture (x86, x64)
        arch: String,
        /// Address of a syscall gadget
        #[arg(long)]
        gadget: String,
        /// Page-aligned address to reprotect
        #[arg(long)]
        addr: String,
        /// Region length
        #[arg(long)]
        len: String,
        /// Protection bits (7 = rwx)
        #[arg(long, default_value = "7")]
        prot: String,
        #[command(flatten)]
        output: Output,
    },
    /// read(fd, buf, count)
    Read {
        /// Target architecture (x86, x64)
        arch: String,
        /// Address of a syscall gadget
        #[arg(long)]
        gadget: String,
        /// File descriptor to read from
        #[arg(long, default_value = "0")]
        fd: String,
        /// Destination buffer address
        #[arg(long)]
        buf: String,
        /// Bytes to read
        #[arg(long)]
        count: String,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args)]
struct Output {
    /// Prepend this sigreturn gadget address (emit a one-frame chain)
    #[arg(long, value_name = "ADDR")]
    sigreturn_gadget: Option<String>,

    /// Write raw bytes to stdout instead of a hexdump
    #[arg(long)]
    raw: bool,

    /// Write raw bytes to a file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            arch,
            assignments,
            syscall,
            output,
        } => cmd_build(&arch, &assignments, syscall.as_deref(), &output),
        Command::Layout { arch } => cmd_layout(&arch),
        Command::Preset { preset } => cmd_preset(preset),
    }
}

fn cmd_build(
    arch: &str,
    assignments: &[String],
    syscall_name: Option<&str>,
    output: &Output,
) -> anyhow::Result<()> {
    let arch: Arch = arch.parse()?;
    let mut frame = SigreturnFrame::new(arch);

    if let Some(name) = syscall_name {
        let nr = syscall::number(arch, name)
            .ok_or_else(|| anyhow::anyhow!("unknown {} syscall: {}", arch, name))?;
        let reg = match arch {
            Arch::X86 => "eax",
            Arch::X86_64 => "rax",
        };
        frame.set_by_name(reg, nr)?;
    }

    for assignment in assignments {
        let (reg, value) = parse_assignment(assignment)?;
        frame.set_by_name(&reg, value)?;
    }

    emit(&frame, output)
}

fn cmd_layout(arch: &str) -> anyhow::Result<()> {
    let arch: Arch = arch.parse()?;
    let table = frame::layout(arch);
    let word = arch.word_size();

    println!(
        "{} {} sigreturn frame: {} slots, {} bytes",
        "sigforge".bold().cyan(),
        arch,
        table.len(),
        table.len() * word
    );
    println!("  {:>6}  {:<14} {}", "offset", "field", "default");
    for (i, info) in table.iter().enumerate() {
        let line = format!("  0x{:04x}  {:<14} 0x{:x}", i * word, info.name, info.default);
        if info.reserved {
            println!("{} {}", line.dimmed(), "(reserved)".dimmed());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_preset(preset: Preset) -> anyhow::Result<()> {
    match preset {
        Preset::Execve {
            arch,
            gadget,
            binsh,
            output,
        } => {
            let arch: Arch = arch.parse()?;
            let frame = chain::execve_frame(arch, parse_value(&gadget)?, parse_value(&binsh)?)?;
            emit(&frame, &output)
        }
        Preset::Mprotect {
            arch,
            gadget,
            addr,
            len,
            prot,
            output,
        } => {
            let arch: Arch = arch.parse()?;
            let frame = chain::mprotect_frame(
                arch,
                parse_value(&gadget)?,
                parse_value(&addr)?,
                parse_value(&len)?,
                parse_value(&prot)?,
            )?;
            emit(&frame, &output)
        }
        Preset::Read {
            arch,
            gadget,
            fd,
            buf,
            count,
            output,
        } => {
            let arch: Arch = arch.parse()?;
            let frame = chain::read_frame(
                arch,
                parse_value(&gadget)?,
                parse_value(&fd)?,
                parse_value(&buf)?,
                parse_value(&count)?,
            )?;
            emit(&frame, &output)
        }
    }
}

fn emit(frame: &SigreturnFrame, output: &Output) -> anyhow::Result<()> {
    let payload = match &output.sigreturn_gadget {
        Some(addr) => chain::build_chain(parse_value(addr)?, std::slice::from_ref(frame)),
        None => frame.bytes().to_vec(),
    };

    if let Some(path) = &output.out {
        std::fs::write(path, &payload)?;
        println!(
            "{} wrote {} bytes to {}",
            "sigforge".bold().cyan(),
            payload.len(),
            path.display()
        );
        return Ok(());
    }

    if output.raw {
        std::io::stdout().write_all(&payload)?;
        return Ok(());
    }

    println!(
        "{} {} frame, {} bytes",
        "sigforge".bold().cyan(),
        frame.arch(),
        payload.len()
    );
    print_hexdump(&payload);
    Ok(())
}

/// Parse a "reg=value" pair; values are hex with 0x prefix or decimal.
fn parse_assignment(s: &str) -> anyhow::Result<(String, u64)> {
    let (reg, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected REG=VALUE, got '{}'", s))?;
    Ok((reg.trim().to_ascii_lowercase(), parse_value(value.trim())?))
}

/// Parse a numeric argument: "0x..." hex, otherwise decimal.
fn parse_value(s: &str) -> anyhow::Result<u64> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|e| anyhow::anyhow!("invalid hex value '{}': {}", s, e))
    } else {
        s.parse()
            .map_err(|e| anyhow::anyhow!("invalid value '{}': {}", s, e))
    }
}

fn print_hexdump(data: &[u8]) {
    for (i, chunk) in data.chunks(16).enumerate() {
        print!("  {:08x}  ", i * 16);
        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                print!(" ");
            }
            print!("{:02x} ", byte);
        }
        for j in chunk.len()..16 {
            if j == 8 {
                print!(" ");
            }
            print!("   ");
        }
        print!(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() || *byte == b' ' {
                print!("{}", *byte as char);
            } else {
                print!(".");
            }
        }
        println!("|");
    }
}
