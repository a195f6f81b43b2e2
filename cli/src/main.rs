use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use engine::roller::DemoRoller;
use engine::{
    I18n, Item, RollRequest, RollSelector, SystemConfig, card_buttons, classify, construct_parts,
    roll_damage_group,
};
use std::{fs, path::PathBuf};

#[derive(Subcommand)]
enum Cmd {
    /// Print every control this module would add to the item's chat card
    Buttons {
        /// Path to an item JSON file
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,
        /// Name of a built-in sample item
        #[arg(long)]
        id: Option<String>,
    },
    /// List the configured roll groups and what each resolves to
    Groups {
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,
        #[arg(long)]
        id: Option<String>,
    },
    /// Resolve a group selector against the item's formulas
    Resolve {
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,
        #[arg(long)]
        id: Option<String>,
        /// Group index, or a `;`-joined position list from an old card
        #[arg(long)]
        group: String,
    },
    /// Roll one group with the built-in seeded roller
    Roll {
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,
        #[arg(long)]
        id: Option<String>,
        /// Index of the group to roll
        #[arg(long, default_value_t = 0)]
        group: usize,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Roll the versatile variant
        #[arg(long, default_value_t = false)]
        versatile: bool,
        /// Double the dice
        #[arg(long, default_value_t = false)]
        critical: bool,
        /// Spell level context passed through to the roll
        #[arg(long)]
        spell_level: Option<i32>,
    },
    /// Print the normalized flag payload the editor would persist
    Normalize {
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Parser)]
#[command(name = "rollgroups-cli")]
#[command(about = "Roll groups CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn load_item(file: Option<PathBuf>, id: Option<String>) -> Result<Item> {
    let text = match (file, id) {
        (Some(path), _) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read item JSON: {}", path.display()))?,
        (None, Some(id)) => engine::content::builtin_items()
            .get(id.as_str())
            .map(|s| s.to_string())
            .with_context(|| format!("no built-in item named '{}'", id))?,
        (None, None) => bail!("pass --file or --id"),
    };
    let item = serde_json::from_str(&text).context("failed to parse item JSON")?;
    Ok(item)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let system = SystemConfig::dnd5e();
    let i18n = I18n::en();

    match cli.cmd {
        Cmd::Buttons { file, id } => {
            let item = load_item(file, id)?;
            let buttons = card_buttons(&item, &system, &i18n);
            if buttons.is_empty() {
                println!("no controls for '{}'", item.name);
                return Ok(());
            }
            for button in &buttons.damage {
                println!("[DAMAGE] {} ({})", button.label, button.action.as_str());
            }
            if let Some(button) = &buttons.versatile {
                println!("[VERSATILE] {} ({})", button.label, button.action.as_str());
            }
            for button in &buttons.blade_cantrip {
                println!("[CANTRIP] {} ({})", button.label, button.action.as_str());
            }
            for button in &buttons.saves {
                println!("[SAVE] {} ({})", button.label, button.action.as_str());
            }
        }
        Cmd::Groups { file, id } => {
            let item = load_item(file, id)?;
            let config = item.group_config();
            let parts = item.valid_parts();
            if !config.is_configured() {
                println!("'{}' has no roll groups configured", item.name);
                return Ok(());
            }
            for (index, group) in config.groups.iter().enumerate() {
                let kind = classify(group, &parts, &system);
                let formulas: Vec<&str> = parts
                    .iter()
                    .enumerate()
                    .filter(|(position, _)| group.contains(*position))
                    .map(|(_, part)| part.formula())
                    .collect();
                println!(
                    "{}: {} [{}] {}",
                    index,
                    group.display_label(&i18n),
                    i18n.localize(kind.i18n_key()),
                    formulas.join(" + ")
                );
            }
        }
        Cmd::Resolve { file, id, group } => {
            let item = load_item(file, id)?;
            let selector = RollSelector::parse(&group)
                .with_context(|| format!("'{}' is not a group selector", group))?;
            let config = item.group_config();
            match construct_parts(&item, &config, &selector) {
                Ok(parts) => {
                    for part in parts {
                        println!(
                            "{} [{}]",
                            part.formula(),
                            part.damage_type().unwrap_or("untyped")
                        );
                    }
                }
                Err(error) => {
                    println!("{}", i18n.localize(error.i18n_key()));
                    std::process::exit(1);
                }
            }
        }
        Cmd::Roll {
            file,
            id,
            group,
            seed,
            versatile,
            critical,
            spell_level,
        } => {
            let item = load_item(file, id)?;
            let mut roller = DemoRoller::from_seed(seed);
            let request = RollRequest {
                critical,
                spell_level,
                versatile,
                ..RollRequest::default()
            };
            match roll_damage_group(&item, group, request, &system, &i18n, &mut roller) {
                Ok(Some(roll)) => {
                    for part in &roll.rolls {
                        println!(
                            "[ROLL][{}] {} = {} [{}]",
                            item.name,
                            part.formula,
                            part.total,
                            part.damage_type.as_deref().unwrap_or("untyped")
                        );
                    }
                    println!("[TOTAL] {} = {}", roll.flavor, roll.total);
                }
                Ok(None) => println!("roll cancelled"),
                Err(error) => {
                    println!("{}", i18n.localize(error.i18n_key()));
                    std::process::exit(1);
                }
            }
        }
        Cmd::Normalize { file, id } => {
            let item = load_item(file, id)?;
            let normalized = item.group_config().normalized(&i18n);
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
    }
    Ok(())
}
