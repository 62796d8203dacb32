//! Interaction scripts for `formwork replay`
//!
//! One step per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! input email a@b
//! blur email a@b
//! input password hunter2 with spaces
//! submit
//! ```
//!
//! Everything after the field name is the value, so values may contain
//! spaces or be empty.

use anyhow::{bail, Result};

/// A single scripted interaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Input { field: String, value: String },
    Blur { field: String, value: String },
    Submit,
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let (command, rest) = split_word(line);
        let step = match command {
            "input" | "blur" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    bail!("line {}: `{}` needs a field name", line_no, command);
                }
                let (field, value) = (field.to_string(), value.to_string());
                if command == "input" {
                    Step::Input { field, value }
                } else {
                    Step::Blur { field, value }
                }
            }
            "submit" => {
                if !rest.is_empty() {
                    bail!("line {}: `submit` takes no arguments", line_no);
                }
                Step::Submit
            }
            other => bail!(
                "line {}: unknown step '{}'. Valid steps: input, blur, submit",
                line_no,
                other
            ),
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Split off the first whitespace-delimited word
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim_start()),
        None => (s, ""),
    }
}
