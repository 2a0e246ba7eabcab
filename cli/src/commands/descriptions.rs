use super::context::Workspace;
use super::ui;
use super::GlobalArgs;
use anyhow::Result;
use reelscore_core::analysis::description_listing;

pub fn handle_descriptions(global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::open(global, None)?;
    if ws.records.is_empty() {
        ui::print_warning(&format!("Dataset '{}' has no videos", ws.source.name));
        return Ok(());
    }
    print!(
        "{}",
        description_listing(ws.records.iter().map(|r| r.description.as_str()))
    );
    Ok(())
}
