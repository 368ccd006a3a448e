//! Loading of ruleset overrides from TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use snake_battle_core::GameConfig;

/// Reads the ruleset from `path`, or returns the reference ruleset.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read game config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid game config at {}", path.display()))
}

fn parse(contents: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(contents).context("failed to parse game config toml contents")?;
    config.validate()?;
    Ok(config)
}
