//! Gateway utility functions.

use std::path::{Path, PathBuf};

/// Expand `${VAR}` patterns in a string with environment variable values.
///
/// Unknown variables are replaced with an empty string. An unterminated
/// `${` consumes the rest of the input as the variable name.
pub fn expand_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' || chars.peek() != Some(&'{') {
            result.push(ch);
            continue;
        }

        chars.next();
        let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
        match std::env::var(&name) {
            Ok(value) => result.push_str(&value),
            Err(_) => tracing::debug!("environment variable {name} is not set"),
        }
    }

    result
}

/// Load a `.env` file into the process environment.
///
/// With no path, `.env` is searched for in the working directory and its
/// parents. Variables that are already set keep their values. Returns the
/// loaded file, or `None` when there is no file to load.
pub fn load_dotenv(path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(anyhow::Error::new(e).context("failed to load .env file")),
    }
}
