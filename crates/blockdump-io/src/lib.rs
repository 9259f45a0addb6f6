//! Snapshot serialization: pretty JSON, cosmetic array compaction, file output.
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use blockdump_extract::Snapshot;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Put small homogeneous int/string arrays on one line.
    pub compact_arrays: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compact_arrays: true,
        }
    }
}

// Arrays of integers only, anchored at an opening bracket
static INT_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s*(?:-?\d+\s*,\s*)*-?\d+\s*\]").expect("int array pattern")
});

// Arrays of plain identifier-like strings only
static STR_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\s*(?:"[A-Za-z0-9 ,_\-:$]*"\s*,\s*)*"[A-Za-z0-9 ,_\-:$]*"\s*\]"#)
        .expect("string array pattern")
});

fn one_line(text: &str) -> String {
    match serde_json::from_str::<Vec<serde_json::Value>>(text) {
        Ok(items) => {
            let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
            format!("[{}]", parts.join(", "))
        }
        Err(_) => text.to_string(),
    }
}

/// Rewrites every int-only or simple-string-only array onto one line as
/// `[a, b, c]`. Purely cosmetic: the parsed value is unchanged. Brackets
/// inside string literals are not arrays and are copied as-is.
pub fn compact_arrays(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut rest = json;
    let mut in_string = false;
    let mut escaped = false;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == '['
            && let Some(m) = INT_ARRAY.find(rest).or_else(|| STR_ARRAY.find(rest))
        {
            out.push_str(&one_line(m.as_str()));
            rest = &rest[m.end()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

pub fn to_json_string<T: Serialize>(value: &T, opts: &WriteOptions) -> Result<String, WriteError> {
    let pretty = serde_json::to_string_pretty(value).map_err(WriteError::Serialize)?;
    Ok(if opts.compact_arrays {
        compact_arrays(&pretty)
    } else {
        pretty
    })
}

/// Writes the snapshot through a sibling temp file so a failed write never
/// leaves a truncated snapshot at `path`.
pub fn write_snapshot(
    path: impl AsRef<Path>,
    snapshot: &Snapshot,
    opts: &WriteOptions,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    let json = to_json_string(snapshot, opts)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json.as_bytes()).map_err(|source| WriteError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&tmp, path) {
        if let Err(e) = fs::remove_file(&tmp) {
            log::warn!("could not remove {}: {e}", tmp.display());
        }
        return Err(WriteError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    log::info!("wrote {} ({} bytes)", path.display(), json.len());
    Ok(())
}
