// lvl - CLI for the Level27 hosting management API
// Copyright (C) 2026 The lvl contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Asks `question` until the answer is yes or no. End of input counts as no.
pub fn confirm_with<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> Result<bool> {
    loop {
        write!(out, "{question} [y/n]: ").context("writing prompt")?;
        out.flush().context("writing prompt")?;

        let mut answer = String::new();
        if input.read_line(&mut answer).context("reading answer")? == 0 {
            writeln!(out).context("writing prompt")?;
            return Ok(false);
        }
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Please type (y)es or (n)o.").context("writing prompt")?,
        }
    }
}

pub fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(question, &mut stdin.lock(), &mut io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut out = Vec::new();
        let answer = confirm_with("Delete app shop?", &mut Cursor::new(input), &mut out).unwrap();
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn accepts_yes_and_no_in_any_case() {
        assert!(ask("Y\n").0);
        assert!(ask("yes\n").0);
        assert!(!ask("No\n").0);
    }

    #[test]
    fn asks_again_on_other_answers() {
        let (answer, out) = ask("maybe\ny\n");
        assert!(answer);
        assert_eq!(out.matches("Delete app shop? [y/n]: ").count(), 2);
        assert!(out.contains("Please type (y)es or (n)o."));
    }

    #[test]
    fn end_of_input_declines() {
        assert!(!ask("").0);
    }
}
