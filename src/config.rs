//! Settings resolved once per invocation.
//!
//! Store path: `--file`, else `RTASKS_FILE`, else `tasks.json` in the working
//! directory (clap resolves that chain). Passcode for `clear`: `RTASKS_PASSCODE`,
//! else the built-in default.

use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_PASSCODE: i64 = 1234;
pub const PASSCODE_ENV: &str = "RTASKS_PASSCODE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub passcode: i64,
}

impl Config {
    pub fn resolve(store_path: PathBuf) -> Config {
        Config {
            store_path,
            passcode: passcode_from(std::env::var(PASSCODE_ENV).ok()),
        }
    }
}

fn passcode_from(raw: Option<String>) -> i64 {
    match raw {
        Some(raw) => match raw.trim().parse() {
            Ok(passcode) => passcode,
            Err(_) => {
                warn!(
                    var = PASSCODE_ENV,
                    "passcode is not an integer, using the default"
                );
                DEFAULT_PASSCODE
            }
        },
        None => DEFAULT_PASSCODE,
    }
}
