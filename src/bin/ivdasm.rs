use ivalice::container::{self, GameMode};
use ivalice::disassembler::Disassembler;
use ivalice::opcode_tables;
use log::{debug, warn};
use std::env;
use std::fs::File;
use std::io::Read;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // The tables are hand-maintained; refuse to disassemble anything if they
    // disagree with each other
    opcode_tables::verify_tables()?;

    let args: Vec<String> = env::args().collect();

    let mut mode = GameMode::Enhanced;
    let mut index: Option<usize> = None;
    let mut show_offsets = false;
    let mut paths = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--mode" => {
                i += 1;
                let value = args.get(i).ok_or("missing value for -m/--mode")?;
                mode = GameMode::parse(value)?;
            }
            "-i" | "--index" => {
                i += 1;
                let value = args.get(i).ok_or("missing value for -i/--index")?;
                index = Some(value.parse()?);
            }
            "-f" | "--offset" => show_offsets = true,
            "-h" | "--help" => {
                eprintln!("Usage: {} [options] <script-file> [message-file]", args[0]);
                eprintln!("\nOptions:");
                eprintln!("  -m, --mode MODE   classic, enhanced (default), or fftpack");
                eprintln!("  -i, --index N     which script slot to disassemble in fftpack mode");
                eprintln!("  -f, --offset      show byte offsets in output");
                eprintln!("  -h, --help        show this help message");
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => paths.push(arg.to_string()),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let script_path = paths.first().cloned().unwrap_or_else(|| {
        eprintln!("Usage: {} [options] <script-file> [message-file]", args[0]);
        eprintln!("Try '{} -h' for help", args[0]);
        std::process::exit(1);
    });

    let mut file = File::open(&script_path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    debug!("loaded {} bytes from {}", data.len(), script_path);

    let carved = match mode {
        GameMode::FFTPack => {
            if index.is_none() {
                warn!("no script index given for fftpack mode, defaulting to the first script");
            }
            container::carve_fftpack(&data, index.unwrap_or(0))?
        }
        GameMode::Classic => {
            let message_data = match paths.get(1) {
                Some(path) => {
                    let mut file = File::open(path)?;
                    let mut bytes = Vec::new();
                    file.read_to_end(&mut bytes)?;
                    debug!("loaded {} message bytes from {}", bytes.len(), path);
                    Some(bytes)
                }
                None => None,
            };
            container::carve_classic(&data, message_data.as_deref())?
        }
        GameMode::Enhanced => container::carve_classic(&data, None)?,
    };

    let mut disassembler =
        Disassembler::new(carved.script, mode.script_mode()).show_offsets(show_offsets);
    if let Some(messages) = &carved.messages {
        disassembler = disassembler.with_messages(messages);
    }

    print!("{}", disassembler.disassemble()?);
    Ok(())
}
