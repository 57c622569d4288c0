//! Interactive confirmation.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Ask a y/N question on stderr and read one line from stdin.
///
/// Anything but `y`/`yes` (including EOF) is a no.
pub fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(question, &mut stdin.lock(), &mut io::stderr())
}

fn confirm_with(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{question} [y/N]: ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(reply: &str) -> bool {
        let mut input = reply.as_bytes();
        let mut out = Vec::new();
        let answer = confirm_with("Delete task 'x'?", &mut input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Delete task 'x'? [y/N]: ");
        answer
    }

    #[test]
    fn accepts_yes() {
        assert!(ask("y\n"));
        assert!(ask("YES\n"));
    }

    #[test]
    fn defaults_to_no() {
        assert!(!ask("\n"));
        assert!(!ask(""));
        assert!(!ask("nope\n"));
    }
}
