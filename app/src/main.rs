mod command;
mod session;

use crossbeam::channel::Receiver;
use log::LevelFilter;
use rustyline::{Editor, error::ReadlineError};
use rusty_bus::{
    BusConfig,
    logging::{ChannelLogger, LogMessage},
};

use command::Command;
use session::{Outcome, Session};

/// Print whatever the bus logged while the last command ran.
fn flush_log(log_recv: &Receiver<LogMessage>) {
    for LogMessage { level, message, .. } in log_recv.try_iter() {
        println!("  {level:<5} {message}");
    }
}

/// Run one line. Returns `false` once the session should end.
fn handle(session: &mut Session, line: &str) -> bool {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            return true;
        }
    };

    match session.execute(command) {
        Ok(Outcome::Continue(lines)) => {
            for line in lines {
                println!("{line}");
            }
            true
        }
        Ok(Outcome::Exit) => false,
        Err(err) => {
            eprintln!("error: {err}");
            true
        }
    }
}

fn main() {
    let log_recv = match ChannelLogger::install(LevelFilter::Info) {
        Ok(receiver) => receiver,
        Err(err) => {
            eprintln!("unable to install logger: {err}");
            return;
        }
    };
    let mut session = Session::new(BusConfig::default());

    // `rusty scenario`, `rusty publish tick` etc. run a single command and exit.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        handle(&mut session, &args.join(" "));
        flush_log(&log_recv);
        return;
    }

    let mut editor = Editor::<()>::new();
    println!("rusty bus - type `help` for commands");
    loop {
        match editor.readline("bus> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                editor.add_history_entry(line.as_str());
                let keep_going = handle(&mut session, &line);
                flush_log(&log_recv);
                if !keep_going {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline: {err}");
                break;
            }
        }
    }
}
