//! Vocation Registry - Entry Point
//!
//! Loads the server config and the vocation definitions, installs the
//! registry for the process and prints what was loaded. A definitions
//! file that cannot be read aborts with a non-zero exit.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use vocation_registry::core::config::{config, set_config, ServerConfig};
use vocation_registry::core::error::Result;
use vocation_registry::core::types::{Skill, VocationId};
use vocation_registry::vocation::{
    init_vocations, TransformationOverride, VocationDefinition, VocationRegistry, WeaponCategory,
    SKILL_ANCHOR_LEVEL,
};

/// Inspect vocation definitions and their training curves
#[derive(Parser, Debug)]
#[command(name = "vocation-registry")]
#[command(about = "Load vocation definitions and print promotions and progression costs")]
struct Args {
    /// Server config file (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Definitions file, overriding the config's definitions_path
    #[arg(long)]
    definitions: Option<PathBuf>,

    /// Show only the vocation with this name
    #[arg(long)]
    vocation: Option<String>,

    /// Highest magic level to print mana costs for
    #[arg(long, default_value_t = 5)]
    max_magic_level: u32,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct VocationSummary<'a> {
    id: VocationId,
    name: &'a str,
    client_id: u16,
    from_vocation: VocationId,
    promotes_to: Option<VocationId>,
    weapon: WeaponCategory,
    mana_multiplier: f32,
    required_mana: Vec<u64>,
    skill_tries: BTreeMap<&'static str, Vec<u64>>,
    transformations: BTreeMap<u16, &'a TransformationOverride>,
}

impl<'a> VocationSummary<'a> {
    fn new(registry: &VocationRegistry, vocation: &'a VocationDefinition, max_magic_level: u32) -> Self {
        let required_mana = (1..=max_magic_level)
            .map(|level| vocation.required_mana(level))
            .collect();

        let skill_tries = Skill::all()
            .into_iter()
            .map(|skill| {
                let tries = (SKILL_ANCHOR_LEVEL..SKILL_ANCHOR_LEVEL + 3)
                    .map(|level| vocation.required_skill_tries(skill, level))
                    .collect();
                (skill.name(), tries)
            })
            .collect();

        let transformations = vocation
            .transformation_targets()
            .into_iter()
            .filter_map(|target| vocation.transformation(target).map(|t| (target.0, t)))
            .collect();

        Self {
            id: vocation.id,
            name: &vocation.name,
            client_id: vocation.client_id,
            from_vocation: vocation.from_vocation,
            promotes_to: registry.promoted_vocation(vocation.id),
            weapon: vocation.weapon,
            mana_multiplier: vocation.mana_multiplier(),
            required_mana,
            skill_tries,
            transformations,
        }
    }

    fn print_text(&self) {
        println!("[{}] {} ({:?})", self.id, self.name, self.weapon);
        match self.promotes_to {
            Some(target) => println!("  promotes to:   {}", target),
            None => println!("  promotes to:   -"),
        }
        println!("  mana x{:.2}:     {:?}", self.mana_multiplier, self.required_mana);
        for (skill, tries) in &self.skill_tries {
            println!("  {:<14} {:?}", skill, tries);
        }
        for (target, t) in &self.transformations {
            println!(
                "  transform -> {}: level {:?}, looktype {:?}, effect {:?}",
                target, t.level_req, t.new_looktype, t.effect
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut server_config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(path) = args.definitions {
        server_config.definitions_path = path;
    }

    tracing_subscriber::fmt()
        .with_env_filter(server_config.log_filter.as_str())
        .init();

    if set_config(server_config).is_err() {
        tracing::warn!("server config was already set");
    }
    let server_config = config();

    tracing::info!(
        path = %server_config.definitions_path.display(),
        "Vocation registry starting..."
    );

    let registry = VocationRegistry::load_from_config(server_config).map_err(|e| {
        tracing::error!("failed to load vocations, aborting startup: {}", e);
        e
    })?;
    let registry = init_vocations(registry)?;

    let selected: Vec<&VocationDefinition> = match &args.vocation {
        Some(name) => registry.get_by_name(name).into_iter().collect(),
        None => registry.iter().collect(),
    };

    let summaries: Vec<VocationSummary> = selected
        .into_iter()
        .map(|vocation| VocationSummary::new(registry, vocation, args.max_magic_level))
        .collect();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("\n=== VOCATIONS ({}) ===", registry.len());
        for summary in &summaries {
            summary.print_text();
        }
    }

    Ok(())
}
