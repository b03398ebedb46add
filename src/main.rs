// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use portal_games::{
    load_site_data, CategoryKey, Config, FilterSelection, PortalService, Provenance,
    SearchResults, SearchStatus,
};
use std::env;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = Config::from_env()?;
    let data = load_site_data(&config)?;
    let portal = Arc::new(PortalService::new(&config, Arc::new(data))?);
    let runtime = Runtime::new()?;

    match args.get(1).map(String::as_str) {
        Some("search") => {
            init_logging();
            run_search(&runtime, &portal, &args[2..])?;
        }
        Some("public") => {
            init_logging();
            run_public(&runtime, &portal);
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Usage: portal-games [search <query> [--sections a,b] | public]");
            std::process::exit(2);
        }
        // UI mode (default)
        None => run_ui_mode(runtime, portal)?,
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for results
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn run_search(runtime: &Runtime, portal: &PortalService, args: &[String]) -> Result<()> {
    let mut words = Vec::new();
    let mut sections = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--sections" {
            let Some(value) = iter.next() else {
                bail!("--sections needs a comma separated list");
            };
            sections.extend(value.split(',').map(|s| s.trim().to_string()));
        } else {
            words.push(arg.as_str());
        }
    }

    let query = words.join(" ");
    let selection = FilterSelection::from_params(&sections);
    let results = runtime.block_on(portal.search(&query, &selection));

    print_results(&results);
    Ok(())
}

fn run_public(runtime: &Runtime, portal: &PortalService) {
    let listing = runtime.block_on(portal.public_games());

    println!("🎮 Games Publik ({})", listing.games.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for game in &listing.games {
        println!("  {} [{}]", game.title, game.genre);
        println!("    {}", game.description);
        println!("    ↗ {}", game.link);
    }
}

fn print_results(results: &SearchResults) {
    match results.status {
        SearchStatus::AwaitingInput => {
            println!("Masukkan kata kunci untuk mencari game, event, resource, atau insight.");
            println!("Coba \"coding\", \"workshop\", atau \"math\".");
            return;
        }
        SearchStatus::NoResults => {
            println!("Belum ada hasil yang cocok dengan \"{}\".", results.query);
            return;
        }
        SearchStatus::Found => {
            println!(
                "🔎 \"{}\" - {} hasil relevan berdasarkan filter aktif",
                results.query, results.total_count
            );
        }
    }

    for key in CategoryKey::ALL {
        if results.count(key) == 0 {
            continue;
        }

        println!("\n{} ({})", key.label(), results.count(key));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        match key {
            CategoryKey::Personal => {
                for game in results.personal.iter().flatten() {
                    let status = game.status.as_deref().unwrap_or("-");
                    println!("  {} [{}] ({})", game.title, game.genre, status);
                    println!("    ↗ {}", game.link);
                }
            }
            CategoryKey::Public => {
                for result in results.public.iter().flatten() {
                    let source = match result.provenance {
                        Provenance::Live => "Live API",
                        Provenance::Curated => "Kurasi",
                    };
                    println!("  {} [{}] <{}>", result.item.title, result.item.genre, source);
                    println!("    ↗ {}", result.item.link);
                }
            }
            CategoryKey::Events => {
                for event in results.events.iter().flatten() {
                    println!("  {} - {} {} ({})", event.title, event.date, event.time, event.format);
                    println!("    ↗ {}", event.link);
                }
            }
            CategoryKey::Resources => {
                for resource in results.resources.iter().flatten() {
                    println!("  {} [{}]", resource.title, resource.tag);
                    println!("    ↗ {}", resource.link);
                }
            }
            CategoryKey::Insight => {
                for insight in results.insight.iter().flatten() {
                    println!("  {}: {}", insight.title, insight.detail);
                }
            }
            CategoryKey::Community => {
                for highlight in results.community.iter().flatten() {
                    println!("  {}: {}", highlight.title, highlight.detail);
                }
            }
        }
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(runtime: Runtime, portal: Arc<PortalService>) -> Result<()> {
    let mut app = ui::App::new(runtime, portal);
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_runtime: Runtime, _portal: Arc<PortalService>) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or search directly: portal-games search <query>");
    std::process::exit(1);
}
