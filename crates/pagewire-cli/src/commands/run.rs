use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use pagewire_core::{AppConfig, PageSpec};
use pagewire_sim::{Engine, Scenario};

pub fn run(
    config: &AppConfig,
    page_path: &Path,
    scenario_path: &Path,
    json: bool,
    summary: bool,
    settle_ms: u64,
) -> Result<()> {
    let page = PageSpec::load(page_path)?.build()?;
    let scenario = Scenario::load(scenario_path)?;

    info!(
        steps = scenario.steps.len(),
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        "running scenario"
    );

    let mut engine = Engine::new(page, config)?;
    engine.run_scenario(&scenario)?;
    engine.drain(Duration::from_millis(settle_ms));

    if json {
        println!("{}", serde_json::to_string_pretty(engine.trace())?);
    } else {
        for line in engine.trace().render(engine.page()) {
            println!("{line}");
        }
    }

    if summary {
        print_summary(&engine);
    }

    Ok(())
}

fn print_summary(engine: &Engine) {
    let page = engine.page();
    println!();
    println!("Final state after {}ms:", engine.elapsed().as_millis());
    println!(
        "  scroll: {:.0} (locked: {})",
        page.scroll_y(),
        page.is_scroll_locked()
    );
    println!("  menu open: {}", engine.is_menu_open());
    println!("  marquee paused: {}", engine.is_marquee_paused());
    if let Some(fragment) = page.fragment() {
        println!("  fragment: #{fragment}");
    }
    println!("  effects recorded: {}", engine.trace().len());
}
