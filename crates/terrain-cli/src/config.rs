//! Configuration loading helpers for the Terrain CLI.
//!
//! Leading configuration flags are split off the argument list so
//! `ortho_config` only sees the flags it understands while clap parses the
//! subcommand that follows.

use std::ffi::{OsStr, OsString};

use ortho_config::OrthoConfig;
use terrain_config::Config;

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--indent-width",
    "--checker-command",
];

pub(crate) trait ConfigLoader {
    /// Loads and validates configuration for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags must appear before the subcommand. Anything after
    /// the first non-configuration token belongs to the subcommand.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        let config =
            Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Stop;
    }
    let (flag, has_inline_value) = text
        .split_once('=')
        .map_or((text.as_ref(), false), |(name, _)| (name, true));
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut consumed = 0usize;
    let mut pending_value = false;
    for argument in rest {
        if pending_value {
            pending_value = false;
        } else if let FlagAction::Include { needs_value } = process_config_flag(argument) {
            pending_value = needs_value;
        } else {
            break;
        }
        config_arguments.push(argument.clone());
        consumed += 1;
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start: consumed + 1,
    }
}

/// Rebuilds the argument list clap sees: the program name and the command.
pub(crate) fn command_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}
