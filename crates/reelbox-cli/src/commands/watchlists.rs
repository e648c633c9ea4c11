use super::prompts::confirm;
use super::{report, Context};
use crate::output::Output;
use crate::render;
use crate::WatchlistCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_watchlists(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    let watchlists = ctx.client.watchlists();

    match cmd {
        WatchlistCommands::List => {
            let lists = watchlists.list_mine().await.map_err(|e| report("Failed to load watchlists", e))?;
            if lists.is_empty() {
                output.info("You have no watchlists yet. Create one with `reelbox watchlists create <name>`");
            } else {
                output.human(render::watchlists_table(&lists));
            }
            output.data(&lists);
        }
        WatchlistCommands::Show { id } => {
            let list = watchlists.get(id).await.map_err(|e| report("Failed to load watchlist", e))?;
            let items = ctx
                .client
                .items()
                .list(id)
                .await
                .map_err(|e| report("Failed to load watchlist items", e))?;
            output.human(render::watchlist_detail(&list, &items));
            output.data(&json!({ "watchlist": list, "items": items }));
        }
        WatchlistCommands::Create { name, description } => {
            let name = non_empty_name(&name)?;
            let list = watchlists
                .create(name, &description)
                .await
                .map_err(|e| report("Failed to create watchlist", e))?;
            output.success(format!("Created watchlist {} ({})", list.name, list.id));
            output.data(&list);
        }
        WatchlistCommands::Update { id, name, description } => {
            let name = non_empty_name(&name)?;
            let list = watchlists
                .update(id, name, &description)
                .await
                .map_err(|e| report("Failed to update watchlist", e))?;
            output.success(format!("Updated watchlist {}", list.name));
            output.data(&list);
        }
        WatchlistCommands::Delete { id, yes } => {
            if !confirm(yes, &format!("Delete watchlist {}?", id))? {
                output.info("Cancelled");
                return Ok(());
            }
            watchlists.delete(id).await.map_err(|e| report("Failed to delete watchlist", e))?;
            output.success(format!("Deleted watchlist {}", id));
        }
    }

    Ok(())
}

fn non_empty_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(eyre!("Watchlist name cannot be empty"));
    }
    Ok(trimmed)
}
