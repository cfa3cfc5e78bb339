#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

mod analysis;
mod arch;
mod asm;
mod ast;
mod database;
mod maths;
mod memory;

use crate::arch::w65c816;
use crate::arch::w65c816::DecoderOptions;
use crate::asm::{line_to_string, Ca65};
use crate::database::Database;
use crate::maths::{u24, FromStrRadix};
use crate::memory::Memory;
use clap::{App, Arg, ArgMatches, SubCommand};
use std::fs;
use std::io;
use std::path::Path;

lazy_static! {
    /// RAM regions installed alongside every analyzed image.
    ///
    /// The low pages of every bank mirror the start of work RAM, which is what
    /// the bank-override actions rely on to find a "working RAM" segment.
    static ref BUILTIN_RAM: Vec<(String, u32, u32)> =
        vec![("WRAM".to_string(), 0x7E_0000, 0x2_0000)];
}

fn parse_addr(matches: &ArgMatches, name: &str, default: u24) -> io::Result<u24> {
    match matches.value_of(name) {
        Some(text) => u24::from_str_radix(text.trim_start_matches('$'), 16)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
        None => Ok(default),
    }
}

fn dis(submatches: &ArgMatches) -> io::Result<()> {
    let image_path = submatches
        .value_of("image")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No image file given"))?;
    let image = fs::read(image_path)?;

    let base = parse_addr(submatches, "base", u24::new(0x00_8000))?;
    let entry = parse_addr(submatches, "entry", base)?;
    let limit = match submatches.value_of("limit") {
        Some(text) => text
            .parse::<usize>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => 128,
    };

    let mut bus = Memory::new();
    bus.install_rom_image("ROM", base, image);

    for (name, start, length) in BUILTIN_RAM.iter() {
        bus.install_ram(name, u24::new(*start), u24::new(*length));
    }

    bus.install_mirror("LOPAGES", u24::new(0), u24::new(0x2000), u24::new(0x7E_0000));

    let mut db = match submatches.value_of("database") {
        Some(path) if Path::new(path).exists() => {
            let file = fs::File::open(path)?;
            Database::load(file)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
        }
        _ => Database::new(),
    };

    let mut opts = DecoderOptions::default();
    opts.no_brk = !submatches.is_present("allow-brk");
    opts.no_cop = !submatches.is_present("allow-cop");
    opts.no_wdm = !submatches.is_present("allow-wdm");

    let syntax = Ca65();
    let mut pc = entry;

    for _ in 0..limit {
        match w65c816::disassemble(pc, &bus, &mut db, &opts) {
            Ok(disasm) => {
                w65c816::emit(&disasm, &bus, &mut db);

                let line = w65c816::render_instr(&disasm, &bus, &db);
                println!(
                    "{:06X}    {}",
                    u32::from(line.source_address()),
                    line_to_string(&syntax, &line)
                );

                if !disasm.flow().is_nonfinal() {
                    break;
                }

                pc = pc + u24::from(disasm.size());
            }
            Err(e) => {
                eprintln!("{:06X}    stopping analysis: {}", u32::from(pc), e);
                break;
            }
        }
    }

    if let Some(path) = submatches.value_of("database") {
        let file = fs::File::create(path)?;
        db.save(file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let matches = App::new("bankward")
        .version("0.1.0")
        .about("Flow-sensitive disassembly for 65816 program images")
        .subcommand(
            SubCommand::with_name("dis")
                .about("Disassemble a flat program image")
                .arg(
                    Arg::with_name("image")
                        .required(true)
                        .help("The raw program image to analyze"),
                )
                .arg(
                    Arg::with_name("base")
                        .long("base")
                        .value_name("008000")
                        .takes_value(true)
                        .help("Load address of the image (hex)"),
                )
                .arg(
                    Arg::with_name("entry")
                        .long("entry")
                        .value_name("008000")
                        .takes_value(true)
                        .help("Address to begin disassembly at (hex)"),
                )
                .arg(
                    Arg::with_name("limit")
                        .long("limit")
                        .value_name("128")
                        .takes_value(true)
                        .help("Maximum number of instructions to decode"),
                )
                .arg(
                    Arg::with_name("database")
                        .long("database")
                        .value_name("bankward.json")
                        .takes_value(true)
                        .help("Annotation database to load before and save after analysis"),
                )
                .arg(
                    Arg::with_name("allow-brk")
                        .long("allow-brk")
                        .help("Accept BRK as a valid opcode"),
                )
                .arg(
                    Arg::with_name("allow-cop")
                        .long("allow-cop")
                        .help("Accept COP as a valid opcode"),
                )
                .arg(
                    Arg::with_name("allow-wdm")
                        .long("allow-wdm")
                        .help("Accept WDM as a valid opcode"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("dis", Some(submatches)) => dis(submatches),
        _ => {
            eprintln!("No command given; try `bankward dis <image>`");
            Ok(())
        }
    }
}
