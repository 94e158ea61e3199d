//! Parsing and dispatch of the line-oriented command protocol.
//!
//! One feed line is one command record. The head token selects the
//! operation; `INSERT` and `UPDATE` carry a rest-of-line data payload with
//! internal spaces preserved.

use crate::{
  error::CommandError,
  manager::{MemoryManager, UpdateOutcome},
};

/// One parsed command record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  Insert { size: usize, data: String },
  Read { id: i64 },
  Delete { id: i64 },
  Update { id: i64, data: String },
  Dump,
}

impl Command {
  /// Parses one feed line.
  pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    let (op, rest) = split_head(line);

    match op {
      "INSERT" => {
        let (size, data) = split_head_keeping_spaces(rest);
        let size = size
          .parse()
          .map_err(|_| CommandError::BadArguments("INSERT"))?;
        Ok(Command::Insert { size, data: data.to_string() })
      }
      "READ" => Ok(Command::Read { id: parse_id(rest, "READ")? }),
      "DELETE" => Ok(Command::Delete { id: parse_id(rest, "DELETE")? }),
      "UPDATE" => {
        let (id, data) = split_head_keeping_spaces(rest);
        Ok(Command::Update {
          id: parse_id(id, "UPDATE")?,
          data: data.to_string(),
        })
      }
      "DUMP" => Ok(Command::Dump),
      other => Err(CommandError::UnrecognizedCommand(other.to_string())),
    }
  }
}

/// Splits the head token from the rest of the line.
fn split_head(line: &str) -> (&str, &str) {
  match line.split_once(' ') {
    Some((head, rest)) => (head, rest),
    None => (line, ""),
  }
}

/// Like [`split_head`], but the remainder is the data payload: exactly one
/// separating space is consumed, anything after it is kept verbatim.
fn split_head_keeping_spaces(rest: &str) -> (&str, &str) {
  match rest.split_once(' ') {
    Some((head, data)) => (head, data),
    None => (rest, ""),
  }
}

/// Parses the id argument. Only the first token counts; trailing tokens
/// are ignored, as the original's stream extraction did.
fn parse_id(
  raw: &str,
  op: &'static str,
) -> Result<i64, CommandError> {
  let token = raw.split_whitespace().next().unwrap_or("");

  token.parse().map_err(|_| CommandError::BadArguments(op))
}

/// Feeds command lines to a manager and renders the textual responses.
pub struct Dispatcher {
  manager: MemoryManager,
}

impl Dispatcher {
  pub fn new() -> Self {
    Self {
      manager: MemoryManager::new(),
    }
  }

  /// Runs one feed line to completion and returns the newline-terminated
  /// response text. No input halts the feed: every failure renders as a
  /// diagnostic and the next line is processed as usual.
  pub fn dispatch(
    &mut self,
    line: &str,
  ) -> String {
    match Command::parse(line) {
      Ok(command) => self.run(command),
      Err(err) => format!("{err}\n"),
    }
  }

  fn run(
    &mut self,
    command: Command,
  ) -> String {
    match command {
      Command::Insert { size, data } => {
        match self.manager.insert(size, data.as_bytes()) {
          Ok(id) => format!("Inserted ID {id}\n"),
          Err(err) => format!("{err}\n"),
        }
      }
      Command::Read { id } => {
        let stored = to_id(id).and_then(|id| self.manager.read(id));
        match stored {
          Ok(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            format!("Data at ID {id}: {text}\n")
          }
          Err(err) => format!("{err}\n"),
        }
      }
      Command::Delete { id } => {
        match to_id(id).and_then(|id| self.manager.delete(id)) {
          Ok(()) => format!("Deleted ID {id}\n"),
          Err(err) => format!("{err}\n"),
        }
      }
      Command::Update { id, data } => {
        let outcome =
          to_id(id).and_then(|id| self.manager.update(id, data.as_bytes()));
        match outcome {
          Ok(UpdateOutcome::InPlace) => format!("Updated ID {id}\n"),
          Ok(UpdateOutcome::Reinserted { new_id }) => {
            format!("Deleted ID {id}\nInserted ID {new_id}\n")
          }
          Ok(UpdateOutcome::ReinsertFailed(err)) => {
            format!("Deleted ID {id}\n{err}\n")
          }
          Err(err) => format!("{err}\n"),
        }
      }
      Command::Dump => self.manager.dump(),
    }
  }
}

impl Default for Dispatcher {
  fn default() -> Self {
    Dispatcher::new()
  }
}

/// Narrows a feed id to an allocation id. Ids outside the allocatable
/// range (negatives in particular) can never be mapped, so they report as
/// plain misses under their original spelling.
fn to_id(raw: i64) -> Result<u32, CommandError> {
  u32::try_from(raw).map_err(|_| CommandError::UnknownId(raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_all_commands() {
    assert_eq!(
      Command::parse("INSERT 20 hello world"),
      Ok(Command::Insert {
        size: 20,
        data: "hello world".to_string(),
      })
    );
    assert_eq!(Command::parse("READ 3"), Ok(Command::Read { id: 3 }));
    assert_eq!(Command::parse("DELETE 0"), Ok(Command::Delete { id: 0 }));
    assert_eq!(
      Command::parse("UPDATE 1 new data"),
      Ok(Command::Update {
        id: 1,
        data: "new data".to_string(),
      })
    );
    assert_eq!(Command::parse("DUMP"), Ok(Command::Dump));
  }

  #[test]
  fn test_parse_keeps_internal_payload_spaces() {
    assert_eq!(
      Command::parse("INSERT 20  two  spaces "),
      Ok(Command::Insert {
        size: 20,
        data: " two  spaces ".to_string(),
      })
    );
  }

  #[test]
  fn test_id_commands_ignore_trailing_tokens() {
    assert_eq!(
      Command::parse("READ 3 trailing"),
      Ok(Command::Read { id: 3 })
    );
    assert_eq!(
      Command::parse("DELETE 0 junk tokens"),
      Ok(Command::Delete { id: 0 })
    );
  }

  #[test]
  fn test_parse_rejects_unknown_and_malformed() {
    assert_eq!(
      Command::parse("FROB 1"),
      Err(CommandError::UnrecognizedCommand("FROB".to_string()))
    );
    assert_eq!(
      Command::parse("READ x"),
      Err(CommandError::BadArguments("READ"))
    );
    assert_eq!(
      Command::parse("INSERT ten data"),
      Err(CommandError::BadArguments("INSERT"))
    );
  }

  #[test]
  fn test_insert_read_dump_scenario() {
    let mut dispatcher = Dispatcher::new();

    assert_eq!(dispatcher.dispatch("INSERT 10 hello"), "Inserted ID 0\n");

    // Read reports the block's full 16 bytes; the tail is zero bytes.
    let response = dispatcher.dispatch("READ 0");
    assert!(response.starts_with("Data at ID 0: hello"));
    assert_eq!(response.len(), "Data at ID 0: ".len() + 16 + 1);

    assert_eq!(
      dispatcher.dispatch("DUMP"),
      "--- Memory Dump ---\n\
       0x0000 - 0x0010: ALLOCATED (ID: 0) (Size: 16 bytes)\n\
       Data: hello\n\
       \n\
       0x0010 - 0xffff: FREE (Size: 65519 bytes)\n"
    );
  }

  #[test]
  fn test_read_round_trips_multibyte_data() {
    let mut dispatcher = Dispatcher::new();

    assert_eq!(dispatcher.dispatch("INSERT 8 héllo"), "Inserted ID 0\n");
    // "héllo" is six bytes in an eight byte block; the zero tail follows.
    assert_eq!(dispatcher.dispatch("READ 0"), "Data at ID 0: héllo\0\0\n");
    assert!(dispatcher.dispatch("DUMP").contains("Data: héllo\n"));
  }

  #[test]
  fn test_oversize_insert_reports_failure() {
    let mut dispatcher = Dispatcher::new();

    assert_eq!(
      dispatcher.dispatch("INSERT 70000 X"),
      "No suitable block found for insertion.\n"
    );
    // usize::MAX parses fine and must report, not hang in rounding.
    assert_eq!(
      dispatcher.dispatch("INSERT 18446744073709551615 x"),
      "No suitable block found for insertion.\n"
    );
    // The failed inserts consumed no id.
    assert_eq!(dispatcher.dispatch("INSERT 1 y"), "Inserted ID 0\n");
  }

  #[test]
  fn test_update_reinsert_invalidates_old_id() {
    let mut dispatcher = Dispatcher::new();

    assert_eq!(dispatcher.dispatch("INSERT 4 ab"), "Inserted ID 0\n");
    assert_eq!(
      dispatcher.dispatch("UPDATE 0 abcdefghijklmnopqrstuvwxyz"),
      "Deleted ID 0\nInserted ID 1\n"
    );
    assert_eq!(dispatcher.dispatch("READ 0"), "Nothing at 0\n");
    assert!(
      dispatcher
        .dispatch("READ 1")
        .starts_with("Data at ID 1: abcdefghijklmnopqrstuvwxyz")
    );
  }

  #[test]
  fn test_update_in_place_keeps_id() {
    let mut dispatcher = Dispatcher::new();

    dispatcher.dispatch("INSERT 10 hello");
    assert_eq!(dispatcher.dispatch("UPDATE 0 world"), "Updated ID 0\n");
    assert!(dispatcher.dispatch("READ 0").starts_with("Data at ID 0: world"));
  }

  #[test]
  fn test_misses_and_unknown_commands_do_not_halt_the_feed() {
    let mut dispatcher = Dispatcher::new();

    assert_eq!(dispatcher.dispatch("READ 5"), "Nothing at 5\n");
    assert_eq!(dispatcher.dispatch("READ -3"), "Nothing at -3\n");
    assert_eq!(dispatcher.dispatch("DELETE 9"), "Nothing at 9\n");
    assert_eq!(dispatcher.dispatch("UPDATE 2 data"), "Nothing at 2\n");
    assert_eq!(dispatcher.dispatch("FROB"), "Unknown command: FROB\n");
    assert_eq!(dispatcher.dispatch("READ x"), "Malformed arguments for READ\n");

    // The manager still works after the string of failures.
    assert_eq!(dispatcher.dispatch("INSERT 8 fine"), "Inserted ID 0\n");
  }
}
