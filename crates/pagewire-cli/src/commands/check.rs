use std::path::Path;

use anyhow::Result;

use pagewire_core::PageSpec;
use pagewire_sim::Scenario;

pub fn run(page_path: &Path, scenario_path: Option<&Path>) -> Result<()> {
    let page = PageSpec::load(page_path)?.build()?;
    println!(
        "Page OK: {} elements, {:.0}px tall.",
        page.len(),
        page.page_height()
    );

    let Some(scenario_path) = scenario_path else {
        return Ok(());
    };

    let scenario = Scenario::load(scenario_path)?;
    let mut warnings = 0;
    for step in &scenario.steps {
        if let Some(target) = step.event.target() {
            let known = page.find_id(target).is_some() || page.first_by_class(target).is_some();
            if !known {
                println!(
                    "  warning: step at {}ms targets unknown element '{}'",
                    step.at_ms, target
                );
                warnings += 1;
            }
        }
    }

    if warnings == 0 {
        println!("Scenario OK: {} steps.", scenario.steps.len());
    } else {
        println!(
            "Scenario parsed: {} steps, {} warnings.",
            scenario.steps.len(),
            warnings
        );
    }

    Ok(())
}
