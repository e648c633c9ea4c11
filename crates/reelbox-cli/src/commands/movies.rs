use super::{report, Context};
use crate::output::Output;
use crate::render;
use crate::MovieCommands;
use color_eyre::Result;
use reelbox_client::{PageCounter, PageRequest, Session};
use reelbox_models::Watchlist;
use serde_json::json;

pub async fn run_movies(cmd: MovieCommands, output: &Output) -> Result<()> {
    let ctx = Context::load()?;
    match cmd {
        MovieCommands::List { page, all } => list(&ctx, page, all, output).await,
        MovieCommands::Show { id } => show(&ctx, id, output).await,
        MovieCommands::Search { query } => search(&ctx, &query, output).await,
        MovieCommands::Genre { name } => by_genre(&ctx, &name, output).await,
        MovieCommands::Genres => genres(&ctx, output).await,
    }
}

async fn list(ctx: &Context, start: u32, all: bool, output: &Output) -> Result<()> {
    let request = PageRequest::from_config(&ctx.config.movies, start);
    let mut counter = PageCounter::new();
    let mut page_number = start;

    loop {
        let page = ctx
            .client
            .movies()
            .page(&request.with_page(page_number))
            .await
            .map_err(|e| report("Failed to load movies", e))?;
        counter.record(&page);

        tracing::debug!(page = page.number, count = page.content.len(), last = page.last, "Loaded page");
        output.human(render::movies_table(&page.content));
        output.data(&page);

        match counter.next_page() {
            Some(next) if all => page_number = next,
            Some(next) => {
                output.info(format!("More available: reelbox movies list --page {}", next));
                break;
            }
            None => break,
        }
    }

    Ok(())
}

async fn show(ctx: &Context, id: i64, output: &Output) -> Result<()> {
    let movie = ctx.client.movies().get(id).await.map_err(|e| report("Failed to load movie", e))?;

    let lists = watchlists_containing(ctx, id).await?;
    let list_refs: Vec<&Watchlist> = lists.iter().collect();

    output.human(render::movie_detail(&movie, &list_refs));
    output.data(&json!({
        "movie": movie,
        "watchlists": lists.iter().map(|l| l.id).collect::<Vec<_>>(),
    }));
    Ok(())
}

/// Watchlists of the signed-in user whose active items include the movie.
/// Anonymous users get an empty answer instead of an error.
async fn watchlists_containing(ctx: &Context, movie_id: i64) -> Result<Vec<Watchlist>> {
    if !signed_in(ctx.session()).await? {
        return Ok(Vec::new());
    }

    let lists = ctx
        .client
        .watchlists()
        .list_mine()
        .await
        .map_err(|e| report("Failed to load watchlists", e))?;

    let mut containing = Vec::new();
    for list in lists {
        let contains = ctx
            .client
            .items()
            .contains_movie(list.id, movie_id)
            .await
            .map_err(|e| report("Failed to check watchlist", e))?;
        if contains {
            containing.push(list);
        }
    }
    Ok(containing)
}

async fn signed_in(session: &Session) -> Result<bool> {
    session
        .is_logged_in()
        .await
        .map_err(|e| report("Failed to read stored session", e.into()))
}

async fn search(ctx: &Context, query: &str, output: &Output) -> Result<()> {
    let movies = ctx.client.movies().search(query).await.map_err(|e| report("Search failed", e))?;
    if movies.is_empty() {
        output.info(format!("No movies match \"{}\"", query));
    } else {
        output.human(render::movies_table(&movies));
    }
    output.data(&movies);
    Ok(())
}

async fn by_genre(ctx: &Context, genre: &str, output: &Output) -> Result<()> {
    let movies = ctx
        .client
        .movies()
        .by_genre(genre)
        .await
        .map_err(|e| report("Failed to load genre", e))?;
    if movies.is_empty() {
        output.info(format!("No movies in genre \"{}\"", genre));
    } else {
        output.human(render::movies_table(&movies));
    }
    output.data(&movies);
    Ok(())
}

async fn genres(ctx: &Context, output: &Output) -> Result<()> {
    let genres = ctx.client.movies().genres().await.map_err(|e| report("Failed to load genres", e))?;
    output.human(render::genres_list(&genres));
    output.data(&genres);
    Ok(())
}
