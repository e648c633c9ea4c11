use super::prompts::confirm;
use super::{report, Context};
use crate::output::Output;
use crate::render;
use crate::ItemCommands;
use color_eyre::Result;

pub async fn run_items(cmd: ItemCommands, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    let items = ctx.client.items();

    match cmd {
        ItemCommands::List { watchlist_id, status } => {
            let found = match status {
                Some(status) => items.list_by_status(watchlist_id, status).await,
                None => items.list(watchlist_id).await,
            }
            .map_err(|e| report("Failed to load watchlist items", e))?;

            if found.is_empty() {
                output.info("No movies in this watchlist");
            } else {
                output.human(render::items_table(&found));
            }
            output.data(&found);
        }
        ItemCommands::Add { watchlist_id, movie_id } => {
            if items
                .contains_movie(watchlist_id, movie_id)
                .await
                .map_err(|e| report("Failed to check watchlist", e))?
            {
                output.info(format!("Movie {} is already on watchlist {}", movie_id, watchlist_id));
                return Ok(());
            }
            items
                .add(watchlist_id, movie_id)
                .await
                .map_err(|e| report("Failed to add movie to watchlist", e))?;
            output.success(format!("Added movie {} to watchlist {}", movie_id, watchlist_id));
        }
        ItemCommands::Status { item_id, status } => {
            items
                .update_status(item_id, status.clone())
                .await
                .map_err(|e| report("Failed to update status", e))?;
            output.success(format!("Item {} marked as {}", item_id, status));
        }
        ItemCommands::Remove { item_id, yes } => {
            if !confirm(yes, &format!("Remove item {} from its watchlist?", item_id))? {
                output.info("Cancelled");
                return Ok(());
            }
            items.delete(item_id).await.map_err(|e| report("Failed to remove movie from watchlist", e))?;
            output.success(format!("Removed item {}", item_id));
        }
    }

    Ok(())
}
