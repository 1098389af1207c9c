//! Interactive `y/n` confirmation.

use std::io::{self, BufRead, Write};

/// Ask `question` on stdout and read the answer from stdin.
pub fn confirm(question: &str) -> io::Result<bool> {
  confirm_with(question, &mut io::stdin().lock(), &mut io::stdout())
}

/// Re-asks until the answer is yes or no. End of input counts as no.
fn confirm_with(
  question: &str,
  input: &mut impl BufRead,
  output: &mut impl Write,
) -> io::Result<bool> {
  loop {
    write!(output, "{question} [y/n]: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      return Ok(false);
    }
    match line.trim().to_ascii_lowercase().as_str() {
      "y" | "yes" => return Ok(true),
      "n" | "no" => return Ok(false),
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  fn answer(input: &str) -> (bool, String) {
    let mut output = Vec::new();
    let confirmed = confirm_with("Delete?", &mut Cursor::new(input), &mut output).unwrap();
    (confirmed, String::from_utf8(output).unwrap())
  }

  #[test]
  fn yes_and_no() {
    assert!(answer("y\n").0);
    assert!(answer("YES\n").0);
    assert!(!answer("n\n").0);
  }

  #[test]
  fn reasks_until_answered() {
    let (confirmed, output) = answer("maybe\n\ny\n");
    assert!(confirmed);
    assert_eq!(output.matches("Delete? [y/n]: ").count(), 3);
  }

  #[test]
  fn end_of_input_is_no() {
    assert!(!answer("").0);
  }
}
