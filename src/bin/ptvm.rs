use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use ptvm::prelude::*;

/// Run a PTB bytecode file.
#[derive(Parser)]
#[command(name = "ptvm", version, about)]
struct Cli {
    /// Path to the bytecode file to execute.
    path: std::path::PathBuf,

    /// Heap size in bytes given to the program.
    #[arg(long, default_value_t = ptvm::consts::DEFAULT_HEAP_SIZE)]
    heap_size: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let stream = match fs::read(&cli.path) {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("ptvm: couldn't read {}: {err}", cli.path.display());
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut vm = match Interpreter::with_heap_size(&stream, cli.heap_size, stdout.lock()) {
        Ok(vm) => vm,
        Err(err) => {
            eprintln!("ptvm: {err}");
            return ExitCode::FAILURE;
        }
    };

    match vm.run() {
        Ok(ProgramState::Halted) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ptvm: {err}");
            ExitCode::FAILURE
        }
    }
}
