//! Mapping command handlers.

use std::sync::Arc;

use tabled::Tabled;

use lispmap_core::model::flags;
use lispmap_core::pretty::pretty_json;
use lispmap_core::{
    Command as CoreCommand, CommandResult, EidRequest, LocatorRequest, MappingAction,
    MappingEntry, MappingRequest, MappingService,
};

use crate::cli::{ActionArg, GlobalOpts, MappingWriteArgs, MappingsArgs, MappingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MappingRow {
    #[tabled(rename = "EID")]
    eid: String,
    #[tabled(rename = "VNI")]
    vni: u32,
    #[tabled(rename = "Locator")]
    locator: String,
    #[tabled(rename = "Flags")]
    flags: String,
    #[tabled(rename = "TTL")]
    ttl: String,
    #[tabled(rename = "Action")]
    action: String,
}

impl From<&Arc<MappingEntry>> for MappingRow {
    fn from(m: &Arc<MappingEntry>) -> Self {
        Self {
            eid: m.eid.to_string(),
            vni: m.vni,
            locator: m.summary.locator_string.clone(),
            flags: m.summary.flags.clone(),
            ttl: m.summary.ttl.clone(),
            action: m.action.to_string(),
        }
    }
}

impl From<ActionArg> for MappingAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::NoAction => Self::NoAction,
            ActionArg::NativelyForward => Self::NativelyForward,
            ActionArg::SendMapRequest => Self::SendMapRequest,
            ActionArg::Drop => Self::Drop,
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(m: &MappingEntry) -> String {
    let opt = |v: Option<String>| v.unwrap_or_else(|| "-".into());
    let mut fields = vec![
        ("EID", m.eid.to_string()),
        ("EID URI", m.eid_uri.clone()),
        ("VNI", m.vni.to_string()),
        ("Origin", opt(m.origin.clone())),
        ("Record TTL", opt(m.record_ttl.as_ref().map(ToString::to_string))),
        ("Action", m.action.to_string()),
        ("Authoritative", m.authoritative.to_string()),
        ("Map version", opt(m.map_version.as_ref().map(ToString::to_string))),
        ("Timestamp", opt(m.timestamp.map(|t| t.to_rfc3339()))),
        ("Site ID", opt(m.site_id.clone())),
        ("xTR ID", opt(m.xtr_id.clone())),
    ];
    for (i, loc) in m.locators.iter().enumerate() {
        let label = if i == 0 { "Locators" } else { "" };
        fields.push((
            label,
            format!(
                "{}  p{}/w{}  {}",
                loc.address,
                loc.priority,
                loc.weight,
                flags(loc)
            ),
        ));
    }
    if m.is_negative() {
        fields.push(("Locators", "(none)".into()));
    }

    let mut out = output::detail_lines(&fields);
    if !m.raw.is_null() {
        out.push_str("\n\nStored record:\n");
        out.push_str(&pretty_json(&m.raw));
    }
    out
}

// ── Request building ────────────────────────────────────────────────

fn mapping_request(args: MappingWriteArgs) -> Result<MappingRequest, CliError> {
    if let Some(path) = args.from_file {
        return util::read_json_file(&path);
    }
    let eid_text = args.eid.ok_or_else(|| CliError::Validation {
        field: "eid".into(),
        reason: "required unless --from-file is given".into(),
    })?;
    let eid = util::parse_address("eid", &eid_text)?;

    let locators = args
        .rlocs
        .iter()
        .map(|text| -> Result<LocatorRequest, CliError> {
            let mut loc = LocatorRequest::new(util::parse_address("rloc", text)?);
            loc.priority = args.priority;
            loc.weight = args.weight;
            Ok(loc)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MappingRequest {
        eid,
        vni: args.vni,
        record_ttl: args.ttl,
        action: args.action.into(),
        authoritative: args.authoritative,
        locators,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    service: &MappingService,
    args: MappingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        MappingsCommand::List(list) => {
            let spinner = output::spinner("Loading mappings…", global);
            let loaded = service.refresh_mappings().await;
            spinner.finish_and_clear();
            let snap = loaded?;

            let rows = util::apply_list_args(snap.items().cloned(), &list, |m| m.vni, |m| {
                m.eid.to_string()
            });
            let out = output::render_list(
                &global.output,
                &rows,
                |m| MappingRow::from(m),
                |m| m.eid_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MappingsCommand::Get { eid_uri } => {
            let entry = service.mapping(&eid_uri).await?;
            let out = output::render_single(
                &global.output,
                &entry,
                |m| detail(m),
                |m| m.eid_uri.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MappingsCommand::Lookup(eid_args) => {
            let eid = util::parse_address("eid", &eid_args.eid)?;
            let result = service
                .execute(CoreCommand::GetMapping(EidRequest::new(eid)))
                .await?;
            let CommandResult::Mapping(entry) = result else {
                return Err(CliError::ApiError {
                    message: "get-mapping returned no record".into(),
                    status: None,
                });
            };
            let out = output::render_single(
                &global.output,
                entry.as_ref(),
                detail,
                |m| m.eid.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MappingsCommand::Add(write) => {
            let request = mapping_request(write)?;
            service.execute(CoreCommand::AddMapping(request)).await?;
            output::print_banner(&service.mappings().status(), global);
            Ok(())
        }

        MappingsCommand::Update(write) => {
            let request = mapping_request(write)?;
            service.execute(CoreCommand::UpdateMapping(request)).await?;
            output::print_banner(&service.mappings().status(), global);
            Ok(())
        }

        MappingsCommand::Delete { eid_uri } => {
            if !util::confirm(&format!("Remove mapping '{eid_uri}'?"), global.yes)? {
                return Ok(());
            }
            service.delete_mapping(&eid_uri).await?;
            output::print_banner(&service.mappings().status(), global);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Command};

    fn write_args(argv: &[&str]) -> MappingWriteArgs {
        let mut full = vec!["lispmap", "mappings", "add"];
        full.extend_from_slice(argv);
        let Command::Mappings(MappingsArgs {
            command: MappingsCommand::Add(args),
        }) = Cli::try_parse_from(full).unwrap().command
        else {
            panic!("expected mappings add");
        };
        args
    }

    #[test]
    fn flags_build_a_mapping_request() {
        let req = mapping_request(write_args(&[
            "--eid",
            "ipv4:10.0.0.0/24",
            "--vni",
            "7",
            "--rloc",
            "192.0.2.1",
            "--rloc",
            "192.0.2.2",
            "--priority",
            "5",
            "--ttl",
            "1440",
        ]))
        .unwrap();
        assert_eq!(req.vni, 7);
        assert_eq!(req.record_ttl, Some(1440));
        assert_eq!(req.locators.len(), 2);
        assert!(req.locators.iter().all(|l| l.priority == 5 && l.weight == 100));
        assert_eq!(req.wire_eid().to_string(), "[7] ipv4:10.0.0.0/24/32");
    }

    #[test]
    fn negative_mapping_carries_action() {
        let req = mapping_request(write_args(&[
            "--eid",
            "10.9.0.0/16",
            "--action",
            "natively-forward",
        ]))
        .unwrap();
        assert!(req.locators.is_empty());
        assert_eq!(req.action, MappingAction::NativelyForward);
    }

    #[test]
    fn bad_rloc_is_rejected() {
        let err = mapping_request(write_args(&["--eid", "10.0.0.0/8", "--rloc", "ipv4:nope"]))
            .unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "rloc"));
    }

    #[test]
    fn from_file_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(
            &path,
            r#"{"eid": "ipv4:10.0.0.0/24", "vni": 3, "locators": [{"rloc": "192.0.2.9"}]}"#,
        )
        .unwrap();
        let req = mapping_request(write_args(&["--from-file", path.to_str().unwrap()])).unwrap();
        assert_eq!(req.vni, 3);
        assert_eq!(req.locators[0].weight, 100);
    }
}
