use thiserror::Error;

/// Reportable outcomes of a command.
///
/// None of these halt the feed; each renders as a single diagnostic line
/// and processing continues with the next command.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
  /// No free block large enough for the rounded request; nothing changed.
  #[error("No suitable block found for insertion.")]
  AllocationFailed { size: usize },

  /// The identifier does not resolve to an allocated block.
  #[error("Nothing at {0}")]
  UnknownId(i64),

  /// The first token of the line is not a known command.
  #[error("Unknown command: {0}")]
  UnrecognizedCommand(String),

  /// A known command with arguments that do not parse.
  #[error("Malformed arguments for {0}")]
  BadArguments(&'static str),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_messages() {
    assert_eq!(
      CommandError::AllocationFailed { size: 131072 }.to_string(),
      "No suitable block found for insertion."
    );
    assert_eq!(CommandError::UnknownId(-3).to_string(), "Nothing at -3");
    assert_eq!(
      CommandError::UnrecognizedCommand("FROB".to_string()).to_string(),
      "Unknown command: FROB"
    );
  }
}
