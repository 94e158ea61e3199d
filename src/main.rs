use std::{
  env,
  fs::File,
  io::{BufRead, BufReader},
  process,
};

use rmemsim::Dispatcher;

fn main() {
  let mut args = env::args();
  let program = args.next().unwrap_or_else(|| "rmemsim".to_string());

  let Some(path) = args.next() else {
    eprintln!("Usage: {program} <commands.cmmd>");
    process::exit(1);
  };

  let file = match File::open(&path) {
    Ok(file) => file,
    Err(err) => {
      eprintln!("Failed to open file: {path}: {err}");
      process::exit(1);
    }
  };

  let mut dispatcher = Dispatcher::new();

  for line in BufReader::new(file).lines() {
    match line {
      Ok(line) => print!("{}", dispatcher.dispatch(&line)),
      Err(err) => {
        eprintln!("Failed to read from {path}: {err}");
        process::exit(1);
      }
    }
  }
}
