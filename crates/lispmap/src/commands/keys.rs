//! Authentication key command handlers.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use secrecy::SecretString;
use tabled::Tabled;

use lispmap_core::pretty::pretty_json;
use lispmap_core::{
    Command as CoreCommand, CommandResult, EidRequest, KeyEntry, KeyRequest, MappingService,
};

use crate::cli::{GlobalOpts, KeyWriteArgs, KeysArgs, KeysCommand};
use crate::error::CliError;
use crate::output;

use super::util;

const MASK: &str = "****";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "EID")]
    eid: String,
    #[tabled(rename = "VNI")]
    vni: u32,
    #[tabled(rename = "Key Type")]
    key_type: u16,
    #[tabled(rename = "Key")]
    key: &'static str,
}

impl From<&Arc<KeyEntry>> for KeyRow {
    fn from(k: &Arc<KeyEntry>) -> Self {
        Self {
            eid: k.eid.to_string(),
            vni: k.vni,
            key_type: k.key_type,
            key: MASK,
        }
    }
}

fn detail(k: &KeyEntry) -> String {
    let mut out = output::detail_lines(&[
        ("EID", k.eid.to_string()),
        ("EID URI", k.eid_uri.clone()),
        ("VNI", k.vni.to_string()),
        ("Key type", k.key_type.to_string()),
        ("Key", MASK.into()),
    ]);
    if !k.raw.is_null() {
        out.push_str("\n\nStored record:\n");
        out.push_str(&pretty_json(&k.raw));
    }
    out
}

// ── Request building ────────────────────────────────────────────────

fn key_request(args: KeyWriteArgs) -> Result<KeyRequest, CliError> {
    let eid = util::parse_address("eid", &args.eid)?;
    let key = match args.key {
        Some(key) => key,
        None => prompt_key()?,
    };
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "key".into(),
            reason: "must not be empty".into(),
        });
    }
    Ok(KeyRequest {
        eid,
        vni: args.vni,
        key_type: args.key_type,
        key_string: SecretString::from(key),
    })
}

fn prompt_key() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "key".into(),
            reason: "pass --key or set LISPMAP_KEY_STRING when not on a terminal".into(),
        });
    }
    Ok(rpassword::prompt_password("Key: ")?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &MappingService,
    args: KeysArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        KeysCommand::List(list) => {
            let spinner = output::spinner("Loading keys…", global);
            let loaded = service.refresh_keys().await;
            spinner.finish_and_clear();
            let snap = loaded?;

            let rows = util::apply_list_args(snap.items().cloned(), &list, |k| k.vni, |k| {
                k.eid.to_string()
            });
            let out = output::render_list(
                &global.output,
                &rows,
                |k| KeyRow::from(k),
                |k| k.eid_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Get { eid_uri } => {
            let entry = service.key(&eid_uri).await?;
            let out = output::render_single(
                &global.output,
                &entry,
                |k| detail(k),
                |k| k.eid_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Lookup(eid_args) => {
            let eid = util::parse_address("eid", &eid_args.eid)?;
            let result = service
                .execute(CoreCommand::GetKey(EidRequest::new(eid)))
                .await?;
            let CommandResult::Key(entry) = result else {
                return Err(CliError::ApiError {
                    message: "get-key returned no record".into(),
                    status: None,
                });
            };
            let out = output::render_single(
                &global.output,
                &entry,
                detail,
                |k| k.eid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        KeysCommand::Add(write) => {
            let request = key_request(write)?;
            service.execute(CoreCommand::AddKey(request)).await?;
            output::print_banner(&service.keys().status(), global);
            Ok(())
        }

        KeysCommand::Update(write) => {
            let request = key_request(write)?;
            service.execute(CoreCommand::UpdateKey(request)).await?;
            output::print_banner(&service.keys().status(), global);
            Ok(())
        }

        KeysCommand::Delete { eid_uri } => {
            if !util::confirm(&format!("Remove key for '{eid_uri}'?"), global.yes)? {
                return Ok(());
            }
            service.delete_key(&eid_uri).await?;
            output::print_banner(&service.keys().status(), global);
            Ok(())
        }
    }
}
