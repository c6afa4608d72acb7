//! Path expansion for values read from config files and user input.
//!
//! Config values may contain environment variables (`$VAR` or `${VAR}`), a
//! leading `~`, relative segments, or `.`/`..` components. [`full_path`]
//! resolves all of these into a normalized absolute path without touching
//! the filesystem, so it works for paths that do not exist yet.

use camino::{Utf8Component, Utf8PathBuf};
use std::env;

/// Return the fully expanded, absolute, normalized form of `input`.
///
/// Expansion order mirrors what users expect from a shell: environment
/// variables first, then `~`, then absolutization against the current
/// working directory, then lexical normalization.
pub fn full_path(input: &str) -> Utf8PathBuf {
    let expanded = expand_env(input);
    let expanded = expand_user(&expanded);

    let path = Utf8PathBuf::from(expanded);
    let absolute = if path.is_absolute() {
        path
    } else {
        match env::current_dir().ok().and_then(|d| Utf8PathBuf::from_path_buf(d).ok()) {
            Some(cwd) => cwd.join(path),
            None => path,
        }
    };

    normalize(&absolute)
}

/// Replace `$VAR` and `${VAR}` references with their environment values.
///
/// An unset variable is left verbatim rather than erased, so a config
/// value like `$MODS/foo` does not silently collapse to `/foo`. A `$` not
/// followed by a variable name is also kept verbatim.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        match chars.peek() {
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if closed {
                    match env::var(&name) {
                        Ok(value) => out.push_str(&value),
                        Err(_) => {
                            out.push_str("${");
                            out.push_str(&name);
                            out.push('}');
                        }
                    }
                } else {
                    // Unterminated ${ - keep the original text.
                    out.push_str("${");
                    out.push_str(&name);
                }
            }
            Some((_, c)) if c.is_alphanumeric() || *c == '_' => {
                let mut name = String::new();
                while let Some((_, c)) = chars.peek() {
                    if c.is_alphanumeric() || *c == '_' {
                        name.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match env::var(&name) {
                    Ok(value) => out.push_str(&value),
                    Err(_) => {
                        out.push('$');
                        out.push_str(&name);
                    }
                }
            }
            _ => out.push('$'),
        }
    }

    out
}

/// Expand a leading `~` or `~/` to the user's home directory.
fn expand_user(input: &str) -> String {
    if input == "~" || input.starts_with("~/") {
        if let Ok(home) = env::var("HOME") {
            return format!("{}{}", home, &input[1..]);
        }
    }
    input.to_string()
}

/// Lexically normalize a path: drop `.` components, let `..` pop the
/// previous component (never popping past the root).
fn normalize(path: &Utf8PathBuf) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Utf8Component::RootDir) | Some(Utf8Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_str()),
        }
    }
    out
}
