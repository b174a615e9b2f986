use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

/// Read a JSON document from `path`, or from stdin when `path` is `-`.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Parse a `--step` value: `key=file` or a bare `file`.
pub fn parse_step(spec: &str) -> anyhow::Result<(Option<String>, PathBuf)> {
    match spec.split_once('=') {
        Some((key, file)) => {
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("invalid --step '{spec}': empty step key");
            }
            if file.is_empty() {
                anyhow::bail!("invalid --step '{spec}': missing file");
            }
            Ok((Some(key.to_string()), PathBuf::from(file)))
        }
        None => Ok((None, PathBuf::from(spec))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn parses_keyed_and_unkeyed_steps() {
        assert_eq!(
            parse_step("student=s.json").unwrap(),
            (Some("student".to_string()), PathBuf::from("s.json"))
        );
        assert_eq!(parse_step("all.json").unwrap(), (None, PathBuf::from("all.json")));
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_step("=s.json").is_err());
        assert!(parse_step("student=").is_err());
    }

    #[test]
    fn reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "Admin" }}"#).unwrap();
        let value = read_json(file.path()).unwrap();
        assert_eq!(value["name"], "Admin");
    }

    #[test]
    fn invalid_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }
}
