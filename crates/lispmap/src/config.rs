//! CLI configuration: a thin layer over `lispmap_config` that applies
//! `GlobalOpts` flag overrides (--controller, --username, --password, ...).

use std::time::Duration;

use secrecy::SecretString;

use lispmap_core::{ServiceConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use lispmap_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `ServiceConfig` for this invocation.
///
/// A matching profile supplies the base values and flags override them.
/// Without one, `--controller` alone is enough to reach an open store.
pub fn service_config(global: &GlobalOpts, config: &Config) -> Result<ServiceConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    match config.profiles.get(&profile_name) {
        Some(profile) => resolve_profile(profile, &profile_name, global, config),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(config),
        }),
        None => from_flags(global, &profile_name),
    }
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<ServiceConfig, CliError> {
    let mut effective = profile.clone();
    if let Some(ref controller) = global.controller {
        effective.controller.clone_from(controller);
    }
    if global.username.is_some() {
        effective.username.clone_from(&global.username);
    }
    if global.insecure {
        effective.insecure = Some(true);
    }
    effective.timeout = global.timeout.or(profile.timeout);

    // A --password flag wins over every stored source.
    let Some(ref password) = global.password else {
        return Ok(lispmap_config::profile_to_service_config(
            &effective,
            profile_name,
            &config.defaults,
        )?);
    };
    let username = effective.username.take();
    let service =
        lispmap_config::profile_to_service_config(&effective, profile_name, &config.defaults)?;
    Ok(match username {
        Some(username) => service.with_credentials(username, SecretString::from(password.clone())),
        None => service,
    })
}

fn from_flags(global: &GlobalOpts, profile_name: &str) -> Result<ServiceConfig, CliError> {
    let url_str = global.controller.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let mut service = ServiceConfig::new(parse_url(url_str)?);
    if global.insecure {
        service.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        service.timeout = Duration::from_secs(secs);
    }
    if let Some(ref username) = global.username {
        let password = global
            .password
            .clone()
            .ok_or_else(|| CliError::NoCredentials {
                profile: profile_name.to_owned(),
            })?;
        service = service.with_credentials(username.clone(), SecretString::from(password));
    }
    Ok(service)
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
