//! Offline rival profiling. Source text is only ever parsed here, never on
//! the bot's decision path.

use anyhow::{Context, Result, bail};
use kittens_core::model::player::PlayerId;
use kittens_core::profile::{ProfileRegistry, analyze_source};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, event};

/// One `--rival id=path` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RivalSource {
    pub id: PlayerId,
    pub path: PathBuf,
}

impl std::str::FromStr for RivalSource {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((id, path)) = raw.split_once('=') else {
            return Err(format!("expected <id>=<path>, got '{raw}'"));
        };
        let (id, path) = (id.trim(), path.trim());
        if id.is_empty() || path.is_empty() {
            return Err(format!("expected <id>=<path>, got '{raw}'"));
        }
        Ok(Self {
            id: PlayerId::new(id),
            path: PathBuf::from(path),
        })
    }
}

pub fn build_registry(rivals: &[RivalSource]) -> Result<ProfileRegistry> {
    let mut registry = ProfileRegistry::new();
    for rival in rivals {
        if registry.get(&rival.id).is_some() {
            bail!("rival '{}' given more than once", rival.id);
        }
        let source = fs::read_to_string(&rival.path).with_context(|| {
            format!(
                "reading source for '{}' at {}",
                rival.id,
                rival.path.display()
            )
        })?;
        let profile = analyze_source(&source);
        event!(
            target: "kittens_bench::profile",
            Level::INFO,
            rival = %rival.id,
            veto_chance = profile.veto_chance(),
            combo_chance = profile.combo_chance(),
            aggression = profile.aggression(),
        );
        registry.insert(rival.id.clone(), profile);
    }
    Ok(registry)
}

pub fn write_registry(registry: &ProfileRegistry, out: &Path) -> Result<()> {
    if let Some(parent) = out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let json = registry.to_json().context("encoding profile registry")?;
    fs::write(out, json).with_context(|| format!("writing registry to {}", out.display()))
}
