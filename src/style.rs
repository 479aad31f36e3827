//! ANSI styling for interactive output.
//!
//! Colors are applied only when stdout is a TTY so piped output and eval
//! transcripts stay parseable.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

fn paint(code: &str, text: &str) -> String {
    if atty::is(atty::Stream::Stdout) {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint(BOLD, text)
}
pub fn red(text: &str) -> String {
    paint(RED, text)
}
pub fn green(text: &str) -> String {
    paint(GREEN, text)
}
pub fn yellow(text: &str) -> String {
    paint(YELLOW, text)
}
pub fn blue(text: &str) -> String {
    paint(BLUE, text)
}
pub fn magenta(text: &str) -> String {
    paint(MAGENTA, text)
}
pub fn cyan(text: &str) -> String {
    paint(CYAN, text)
}
