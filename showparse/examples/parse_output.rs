//! Parse saved show-command output
//!
//! Reads captured output from a file (or stdin) and prints the parsed record
//! as JSON. Schema violations are logged rather than fatal.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example parse_output -- --os nxos --command "show interface brief" --file brief.txt
//! ```
//!
//! List the commands known for a platform:
//! ```bash
//! cargo run --example parse_output -- --os iosxr --list
//! ```

use std::env;
use std::io::{self, Read};
use std::path::PathBuf;

use showparse::device::CannedDevice;
use showparse::{ParserRegistry, SessionBuilder, ValidationMode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list {
        let registry = ParserRegistry::global()
            .read()
            .map_err(|_| "registry lock poisoned")?;
        for command in registry.commands(&args.os) {
            println!("{}", command);
        }
        return Ok(());
    }

    let Some(command) = args.command else {
        eprintln!("Error: --command is required");
        std::process::exit(1);
    };

    let output = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let device = CannedDevice::new().with_output(command.clone(), output);
    let mut session = SessionBuilder::new(device)
        .os(&args.os)
        .validation(ValidationMode::Warn)
        .build()?;

    let record = session.parse(&command).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}

struct Args {
    os: String,
    command: Option<String>,
    file: Option<PathBuf>,
    list: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut os = "nxos".to_string();
        let mut command = None;
        let mut file = None;
        let mut list = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--os" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        os = args[i].clone();
                    }
                }
                "--command" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        command = Some(args[i].clone());
                    }
                }
                "--file" | "-f" => {
                    i += 1;
                    if i < args.len() {
                        file = Some(PathBuf::from(&args[i]));
                    }
                }
                "--list" | "-l" => list = true,
                "--help" => {
                    println!(
                        "Usage: parse_output --os <os> --command <command> [--file <path>] [--list]"
                    );
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Self {
            os,
            command,
            file,
            list,
        }
    }
}
