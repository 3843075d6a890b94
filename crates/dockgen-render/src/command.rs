//! Shell-style command strings to Dockerfile exec-form arguments.
//!
//! ```text
//! rails server            →  "rails", "server"
//! bundle exec 'puma -C'   →  "bundle", "exec", "puma -C"
//! ```
//!
//! Word splitting follows POSIX shell rules: unquoted whitespace separates
//! words, single quotes keep everything literally, double quotes keep
//! everything except `\"` and `\\`, and an unquoted backslash escapes the next
//! character. Quotes and escaping backslashes never reach the output.

use dockgen_core::TokenizeError;

/// Name under which [`format_cmd_list`] is exposed to templates.
pub const CMD_LIST_FILTER: &str = "to_cmd_list";

/// Split `command` into words.
///
/// Blank input yields no words. An empty quoted pair (`''` or `""`) yields an
/// empty word.
///
/// # Errors
///
/// [`TokenizeError`] on an unterminated quote or a trailing backslash.
///
/// # Examples
///
/// ```
/// use dockgen_render::command::split;
///
/// let words = split(r#"sh -c "echo \"hi\"""#).unwrap();
/// assert_eq!(words, vec!["sh", "-c", r#"echo "hi""#]);
/// ```
pub fn split(command: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut word = String::new();
    // Distinguishes "no word yet" from "empty word" after `''`.
    let mut in_word = false;
    let mut chars = command.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '\'')) => break,
                        Some((_, c)) => word.push(c),
                        None => {
                            return Err(TokenizeError::UnterminatedSingleQuote {
                                command: command.to_owned(),
                                offset: start,
                            });
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, c @ ('"' | '\\'))) => word.push(c),
                            Some((_, c)) => {
                                word.push('\\');
                                word.push(c);
                            }
                            None => {
                                return Err(TokenizeError::UnterminatedDoubleQuote {
                                    command: command.to_owned(),
                                    offset: start,
                                });
                            }
                        },
                        Some((_, c)) => word.push(c),
                        None => {
                            return Err(TokenizeError::UnterminatedDoubleQuote {
                                command: command.to_owned(),
                                offset: start,
                            });
                        }
                    }
                }
            }
            '\\' => match chars.next() {
                Some((_, c)) => {
                    in_word = true;
                    word.push(c);
                }
                None => {
                    return Err(TokenizeError::TrailingEscape {
                        command: command.to_owned(),
                        offset: start,
                    });
                }
            },
            c if is_separator(c) => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }

    if in_word {
        words.push(word);
    }
    Ok(words)
}

/// Render `command` as the inside of a JSON-style array: each word wrapped in
/// double quotes, joined by `", "`.
///
/// Double quotes inside a word are copied as-is, so a word containing `"`
/// produces an array the Docker parser will reject.
///
/// ```
/// use dockgen_render::command::format_cmd_list;
///
/// assert_eq!(format_cmd_list("rails server").unwrap(), r#""rails", "server""#);
/// assert_eq!(format_cmd_list("").unwrap(), "");
/// ```
pub fn format_cmd_list(command: &str) -> Result<String, TokenizeError> {
    let words = split(command)?;
    Ok(words
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(", "))
}

const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
