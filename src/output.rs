//! Terminal output helpers.
//!
//! `console` handles colors and turns them off when piped or when `NO_COLOR`
//! is set. Everything the user asked for goes to stdout; only fatal errors go
//! to stderr.

use console::style;

pub fn header(text: &str) {
    println!("{}", style(text).bold().cyan());
}

pub fn line(text: &str) {
    println!("{}", text);
}

pub fn success(text: &str) {
    println!("{} {}", style("✓").green(), text);
}

pub fn warning(text: &str) {
    println!("{} {}", style("!").yellow(), text);
}

pub fn dim(text: &str) {
    println!("{}", style(text).dim());
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("✗").red(), style(text).bright());
}
