use oxsh::Interpreter;
use std::process;

fn main() {
    let mut shell = Interpreter::new();
    match shell.repl() {
        Ok(status) => process::exit(status),
        Err(err) => {
            eprintln!("oxsh: {}", err);
            process::exit(1);
        }
    }
}
