//! Line-based terminal prompts.
//!
//! [`Console`] wraps any buffered reader and writer so the same prompt loops
//! run against stdin/stdout in the binary and against scripted input in tests.
//! Invalid input never ends a prompt; only a closed input stream does.

use crate::error::{Error, Result};
use crate::types::FieldKind;
use crate::validate::validate_record;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Interactive prompt front end over a reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line to the operator
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line.
    ///
    /// Returns [`Error::InputClosed`] once the input stream is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Show numbered options and return the 0-based index of the choice.
    ///
    /// Non-numeric and out-of-range answers are reported and asked again.
    pub fn select_index<S: AsRef<str>>(&mut self, prompt: &str, options: &[S]) -> Result<usize> {
        if options.is_empty() {
            return Err(Error::Config(format!("menu '{}' has no options", prompt)));
        }

        loop {
            self.say(prompt)?;
            for (i, option) in options.iter().enumerate() {
                self.say(format_args!("  {}. {}", i + 1, option.as_ref()))?;
            }

            let answer = self.ask("> ")?;
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice - 1),
                Ok(_) => self.say(format_args!(
                    "Invalid choice: please pick a number between 1 and {}.\n",
                    options.len()
                ))?,
                Err(_) => self.say(format_args!(
                    "Invalid choice {:?}: please enter a number.\n",
                    answer
                ))?,
            }
        }
    }

    /// Show numbered options and return the chosen label
    pub fn select<'a, S: AsRef<str>>(&mut self, prompt: &str, options: &'a [S]) -> Result<&'a str> {
        let index = self.select_index(prompt, options)?;
        Ok(options[index].as_ref())
    }

    /// Ask for a comma-separated record until it satisfies `schema`.
    ///
    /// Each rejected attempt prints the reason and prompts again.
    pub fn collect_record(&mut self, prompt: &str, schema: &[FieldKind]) -> Result<Vec<String>> {
        loop {
            let line = self.ask(prompt)?;
            let values: Vec<String> = line.split(',').map(|v| v.trim().to_string()).collect();

            match validate_record(&values, schema) {
                Ok(()) => {
                    self.say("Data is valid!")?;
                    return Ok(values);
                }
                Err(e) => {
                    tracing::debug!("Rejected record input: {}", e);
                    self.say(format_args!("Invalid data: {}, please try again.\n", e))?;
                }
            }
        }
    }

    /// Consume the console, returning the underlying reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::USER_SCHEMA;
    use std::io::Cursor;

    fn console(script: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    #[test]
    fn test_ask_trims_line() {
        let mut c = console("  hello  \n");
        assert_eq!(c.ask("? ").unwrap(), "hello");
    }

    #[test]
    fn test_ask_reports_closed_input() {
        let mut c = console("");
        assert!(matches!(c.ask("? "), Err(Error::InputClosed)));
    }

    #[test]
    fn test_select_valid_choice() {
        let mut c = console("2\n");
        assert_eq!(c.select("Pick", &["A", "B", "C"]).unwrap(), "B");
    }

    #[test]
    fn test_select_reprompts_out_of_range() {
        let mut c = console("9\n0\n3\n");
        assert_eq!(c.select("Pick", &["A", "B", "C"]).unwrap(), "C");
        let out = output(c);
        assert_eq!(out.matches("between 1 and 3").count(), 2);
    }

    #[test]
    fn test_select_reprompts_non_numeric() {
        let mut c = console("x\n-1\n1\n");
        assert_eq!(c.select("Pick", &["A", "B", "C"]).unwrap(), "A");
        let out = output(c);
        assert!(out.contains("Invalid choice \"x\""));
        assert!(out.contains("Invalid choice \"-1\""));
    }

    #[test]
    fn test_select_does_not_return_on_bad_input() {
        let mut c = console("9\nx\n");
        assert!(matches!(
            c.select("Pick", &["A", "B", "C"]),
            Err(Error::InputClosed)
        ));
    }

    #[test]
    fn test_select_lists_options() {
        let mut c = console("1\n");
        c.select("Pick one", &["Squat", "Lunge"]).unwrap();
        let out = output(c);
        assert!(out.contains("Pick one"));
        assert!(out.contains("  1. Squat"));
        assert!(out.contains("  2. Lunge"));
    }

    #[test]
    fn test_select_empty_menu_is_error() {
        let mut c = console("1\n");
        let empty: [&str; 0] = [];
        assert!(matches!(c.select("Pick", &empty), Err(Error::Config(_))));
    }

    #[test]
    fn test_collect_record_retries_until_valid() {
        let mut c = console(
            "Jane,Doe\nJane,Doe,old,female,65.5,170,jane@x.com\nJane, Doe ,30,female,65.5,170,jane@x.com\n",
        );
        let values = c.collect_record("details: ", &USER_SCHEMA).unwrap();
        assert_eq!(
            values,
            vec!["Jane", "Doe", "30", "female", "65.5", "170", "jane@x.com"]
        );

        let out = output(c);
        assert!(out.contains("Exactly 7 values required, you provided 2"));
        assert!(out.contains("Value 3 (\"old\") is not a valid whole number"));
        assert!(out.contains("Data is valid!"));
    }

    #[test]
    fn test_collect_record_never_gives_up() {
        let script = "bad\n".repeat(50);
        let mut c = console(&script);
        assert!(matches!(
            c.collect_record("details: ", &USER_SCHEMA),
            Err(Error::InputClosed)
        ));
        assert_eq!(output(c).matches("Invalid data").count(), 50);
    }
}
