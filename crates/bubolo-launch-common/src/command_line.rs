//! Command-line tokenizing.
//!
//! The launch command line is written the way Windows passes it to
//! `CreateProcess`: one string, arguments separated by whitespace, double
//! quotes grouping. On Unix the child needs an argument vector instead, so the
//! string is split here with the same quoting rules.

use std::iter::repeat;

/// Splits a command line into arguments the way the Windows C runtime does.
///
/// - spaces and tabs separate arguments outside quotes
/// - `"` toggles quoting and is dropped; inside quotes `""` is a literal `"`
/// - `2n` backslashes before a `"` give `n` backslashes and the quote toggles;
///   `2n + 1` backslashes give `n` backslashes and a literal `"`
/// - backslashes not followed by `"` are kept as is
/// - a token made only of quotes (`""`) is an empty argument
pub fn split_command_line(command_line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = command_line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut backslashes = 1;
                while chars.peek() == Some(&'\\') {
                    chars.next();
                    backslashes += 1;
                }
                if chars.peek() == Some(&'"') {
                    current.extend(repeat('\\').take(backslashes / 2));
                    if backslashes % 2 == 1 {
                        chars.next();
                        current.push('"');
                    }
                } else {
                    current.extend(repeat('\\').take(backslashes));
                }
                in_token = true;
            }
            '"' => {
                if quoted && chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    quoted = !quoted;
                }
                in_token = true;
            }
            ' ' | '\t' if !quoted => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }

    args
}
