//! Interactive prompts for values missing from the command line.
//!
//! Prompts re-ask until the answer is valid. They are generic over the
//! reader and writer so they can be driven from tests.

use crate::error::PromptError;
use crate::types::Port;
use std::io::{BufRead, Write};

/// Ask for the target host until a non-empty answer is given.
pub fn prompt_host<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String, PromptError> {
    loop {
        let answer = ask(input, out, "Enter the IP address or hostname to scan: ")?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        writeln!(out, "A target host is required.")?;
    }
}

/// Ask for a port number until a valid one (1-65535) is given.
pub fn prompt_port<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> Result<Port, PromptError> {
    let question = format!("Enter the {} (1-65535): ", label);
    loop {
        let answer = ask(input, out, &question)?;
        match answer.parse::<Port>() {
            Ok(port) => return Ok(port),
            Err(_) => writeln!(
                out,
                "Invalid {}. Please enter a number between 1 and 65535.",
                label
            )?,
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String, PromptError> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof);
    }
    Ok(line.trim().to_string())
}
