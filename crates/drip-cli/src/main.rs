// ============================================================================
// drip — cosmetics report CLI
// ============================================================================
// Usage:
//   drip report --membership-type 3 --membership-id ID   Print the report JSON
//   drip report ... --output drip-cosmetics.json         Write the report to a file
//   drip languages                                       List manifest languages
//   drip vocabulary                                      Print the classifier vocabulary
// ============================================================================

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use drip_core::{DripConfig, DripReport, DripService, HeuristicVocabulary, MembershipRef};
use std::path::PathBuf;
use tracing::info;

/// Destiny cosmetics report tool
#[derive(Parser)]
#[command(name = "drip", version, about = "Report owned shaders, ornaments and armor for a Destiny account")]
struct Cli {
    /// Bungie API key (default: BUNGIE_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Manifest language (default: DRIP_MANIFEST_LANGUAGE or "en")
    #[arg(long, global = true)]
    language: Option<String>,

    /// JSON file overriding the classifier vocabulary (default: DRIP_VOCABULARY_PATH)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the cosmetics report for one account
    Report {
        /// Membership type (platform) of the Destiny account
        #[arg(long)]
        membership_type: i32,

        /// Destiny membership id
        #[arg(long)]
        membership_id: String,

        /// OAuth access token for the account
        #[arg(long, env = "BUNGIE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,

        /// Write pretty JSON to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON on stdout
        #[arg(long)]
        pretty: bool,

        /// Print headline counts to stderr
        #[arg(long)]
        summary: bool,
    },

    /// List languages the manifest offers
    Languages {
        /// OAuth access token
        #[arg(long, env = "BUNGIE_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },

    /// Print the active classifier vocabulary as JSON
    Vocabulary,
}

fn load_config(cli: &Cli) -> Result<DripConfig> {
    let mut config = DripConfig::from_env_with_key(cli.api_key.clone())
        .context("Set BUNGIE_API_KEY or pass --api-key")?;

    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if let Some(path) = &cli.vocabulary {
        config.vocabulary_path = Some(path.clone());
    }
    Ok(config)
}

fn load_vocabulary(cli: &Cli) -> Result<HeuristicVocabulary> {
    let path = cli
        .vocabulary
        .clone()
        .or_else(DripConfig::vocabulary_path_from_env);

    match path {
        Some(path) => Ok(HeuristicVocabulary::load(&path)?),
        None => Ok(HeuristicVocabulary::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("drip_core=info,drip=info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Report {
            membership_type,
            membership_id,
            access_token,
            output,
            pretty,
            summary,
        } => {
            let service = DripService::from_config(&load_config(&cli)?)?;
            let membership = MembershipRef::new(*membership_type, membership_id.clone());
            let report = service.report(access_token, &membership).await?;
            cmd_report(&report, output.as_ref(), *pretty, *summary)
        }
        Commands::Languages { access_token } => {
            let service = DripService::from_config(&load_config(&cli)?)?;
            for language in service.languages(access_token).await? {
                println!("{}", language);
            }
            Ok(())
        }
        Commands::Vocabulary => {
            println!("{}", serde_json::to_string_pretty(&load_vocabulary(&cli)?)?);
            Ok(())
        }
    }
}

fn cmd_report(report: &DripReport, output: Option<&PathBuf>, pretty: bool, summary: bool) -> Result<()> {
    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(report)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None if pretty => println!("{}", serde_json::to_string_pretty(report)?),
        None => println!("{}", serde_json::to_string(report)?),
    }

    if summary {
        print_summary(report);
    }
    Ok(())
}

fn print_summary(report: &DripReport) {
    let summary = report.summary();

    eprintln!("=== Drip Report ({}) ===", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("Shaders:              {}", summary.shaders);
    eprintln!("Universal ornaments:  {} owned, {} wishlist", summary.universal_owned, summary.universal_wishlist);
    eprintln!("Armor ornaments:      {}", summary.armor_specific);
    eprintln!("Armor pieces:         {} ({} exotic)", summary.armor_pieces, summary.exotic_armor);
    eprintln!("Characters:           {}", summary.characters);

    for character in &report.character_armor_drip {
        eprintln!(
            "  {} ({})",
            character.character_id,
            drip_core::ClassKey::of(character.class_type).label()
        );
        for slot in &character.armor_slots {
            eprintln!(
                "    {:<10} {:<32} {:>3} universal  {:>3} specific",
                slot.slot.label(),
                slot.base_item_name,
                slot.available_universal_ornaments.len(),
                slot.available_armor_specific_ornaments.len()
            );
        }
    }
}
