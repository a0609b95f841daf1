use std::{cell::RefCell, io::Write, process::ExitCode, rc::Rc};

use hygge::{Error, Interpreter};
use log::{debug, info};
use rustyline::{error::ReadlineError, DefaultEditor};

type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

const EXIT_USAGE: u8 = 64;
const EXIT_DATA_ERROR: u8 = 65;
const EXIT_SOFTWARE: u8 = 70;

fn main() -> DynResult<ExitCode> {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    // program output owns stdout, a missing .env is only worth a log line
    if let Err(e) = dotenv {
        debug!("dotenvy load with error {}", e);
    }

    let args = std::env::args().skip(1).collect::<Vec<String>>();
    debug!("{:?}", args);

    match args.as_slice() {
        [] => repl().map(|_| ExitCode::SUCCESS),
        [file_path] => read_from_file(file_path),
        _ => {
            println!("For mange argumenter, du...");
            Ok(ExitCode::from(EXIT_USAGE))
        }
    }
}

fn new_interpreter() -> Interpreter {
    let rc = Rc::new(RefCell::new(std::io::stdout()));
    Interpreter::new(rc)
}

fn repl() -> DynResult<()> {
    info!("Running in REPL mode");

    let mut rl = DefaultEditor::new()?;
    let mut itp = new_interpreter();

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                rl.add_history_entry(&line)?;
                // errors end the line, never the session
                if let Err(err) = hygge::run(line.trim_end(), &mut itp) {
                    report(&err);
                }
                std::io::stdout().flush()?;
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                return Err(Box::new(err));
            }
        }
    }

    Ok(())
}

fn read_from_file(file_path: &str) -> DynResult<ExitCode> {
    info!("Read from file {}", file_path);
    let contents = std::fs::read_to_string(file_path)?;
    let mut itp = new_interpreter();

    let result = hygge::run(&contents, &mut itp);
    std::io::stdout().flush()?;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            report(&err);
            match err {
                Error::Parse(_) => Ok(ExitCode::from(EXIT_DATA_ERROR)),
                Error::Runtime(_) => Ok(ExitCode::from(EXIT_SOFTWARE)),
            }
        }
    }
}

fn report(err: &Error) {
    debug!("{:?}", err);
    eprintln!("{}", err);
}
