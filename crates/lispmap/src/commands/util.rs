//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use lispmap_core::LispAddress;

use crate::cli::ListArgs;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))
}

/// Read a request body for `--from-file`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("{}: {e}", path.display()),
    })
}

/// Parse an `--eid` / `--rloc` style argument.
pub fn parse_address(field: &str, text: &str) -> Result<LispAddress, CliError> {
    text.parse::<LispAddress>().map_err(|e| CliError::Validation {
        field: field.into(),
        reason: format!("{e}"),
    })
}

/// Apply `--vni` / `--filter` to a loaded table.
pub fn apply_list_args<T>(
    items: impl Iterator<Item = Arc<T>>,
    args: &ListArgs,
    vni_of: impl Fn(&T) -> u32,
    eid_text: impl Fn(&T) -> String,
) -> Vec<Arc<T>> {
    items
        .filter(|item| args.vni.is_none_or(|vni| vni_of(item) == vni))
        .filter(|item| {
            args.filter
                .as_deref()
                .is_none_or(|needle| eid_text(item).contains(needle))
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn list_args_filter_by_vni_and_text() {
        let items = vec![
            Arc::new((0_u32, "ipv4:10.0.0.0/24")),
            Arc::new((5, "ipv4:10.0.0.0/24")),
            Arc::new((5, "ipv4:192.168.0.0/16")),
        ];
        let args = ListArgs {
            vni: Some(5),
            filter: Some("10.0".into()),
        };
        let kept = apply_list_args(items.into_iter(), &args, |i| i.0, |i| i.1.to_owned());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].0, 5);
    }

    #[test]
    fn bad_address_is_a_usage_error() {
        let err = parse_address("eid", "ipv4:300.0.0.1").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_json_file::<serde_json::Value>(&path).unwrap_err();
        assert!(err.to_string().contains("from-file"));
    }
}
