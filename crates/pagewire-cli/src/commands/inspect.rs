use std::path::Path;

use anyhow::Result;

use pagewire_core::PageSpec;

pub fn run(page_path: &Path) -> Result<()> {
    let page = PageSpec::load(page_path)?.build()?;

    println!(
        "Viewport {:.0}px, page {:.0}px, {} elements:\n",
        page.viewport_height(),
        page.page_height(),
        page.len()
    );

    for id in page.iter() {
        let element = page.element(id);
        let classes = if element.classes().is_empty() {
            String::new()
        } else {
            format!(" .{}", element.classes().join(" ."))
        };
        println!("  {} <{}>{}", page.label(id), element.tag(), classes);
        if element.height() > 0.0 {
            println!(
                "      top {:.0}, height {:.0}",
                element.top(),
                element.height()
            );
        }
        for (name, value) in element.attrs() {
            println!("      {name}=\"{value}\"");
        }
    }

    Ok(())
}
