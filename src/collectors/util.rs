use crate::collectors::ProviderError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Reads a sysfs/procfs attribute. Missing, unreadable and blank files all
/// come back as `None`; a single attribute never fails a category.
pub(crate) fn read_attr(path: impl AsRef<Path>) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn read_u64(path: impl AsRef<Path>) -> Option<u64> {
    read_attr(path).and_then(|s| s.parse().ok())
}

/// Sorted entries of `path`. A directory that does not exist is an empty
/// listing; one that exists but cannot be read is an error.
pub(crate) fn list_dir(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, ProviderError> {
    let path = path.as_ref();
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ProviderError::Unreadable {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let mut out: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    out.sort();
    Ok(out)
}

pub(crate) fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|v| v.to_str())
}

/// Runs a helper tool and returns its stdout when it exits successfully.
/// A tool that is not installed is treated the same as one that printed nothing.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(decode_cmd_stdout(&output.stdout))
}

pub(crate) fn decode_cmd_stdout(bytes: &[u8]) -> String {
    if let Ok(utf8) = std::str::from_utf8(bytes) {
        return utf8.to_string();
    }

    if bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let u16buf: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&u16buf) {
            return s;
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

pub(crate) fn parse_f64_loose(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }

    if let Ok(v) = trimmed.replace(',', ".").parse::<f64>() {
        return Some(v);
    }

    let filtered: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',' || *c == '-')
        .collect();
    if filtered.is_empty() {
        return None;
    }

    filtered.replace(',', ".").parse::<f64>().ok()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Drops the filler strings vendors leave in firmware tables.
pub(crate) fn clean_vendor_string(value: String) -> Option<String> {
    const PLACEHOLDERS: [&str; 10] = [
        "to be filled by o.e.m.",
        "default string",
        "system manufacturer",
        "system product name",
        "system version",
        "system serial number",
        "not specified",
        "not applicable",
        "unknown",
        "0123456789",
    ];
    let trimmed = value.trim();
    if trimmed.is_empty() || PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p)) {
        return None;
    }
    Some(trimmed.to_string())
}
