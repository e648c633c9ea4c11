use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use reelbox_models::{ItemStatus, Movie, User, Watchlist, WatchlistItem};

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn year(movie: &Movie) -> String {
    movie.year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn rating(movie: &Movie) -> String {
    movie.vote_average.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn status_cell(status: &ItemStatus) -> Cell {
    let color = match status {
        ItemStatus::Active => Color::White,
        ItemStatus::Watching => Color::Yellow,
        ItemStatus::Watched => Color::Green,
        ItemStatus::Dropped => Color::DarkGrey,
        ItemStatus::Other(_) => Color::Magenta,
    };
    Cell::new(status.label()).fg(color)
}

pub fn movies_table(movies: &[Movie]) -> String {
    let mut table = table(&["ID", "Title", "Year", "Rating", "Genres"]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(year(movie)),
            Cell::new(rating(movie)),
            Cell::new(movie.genres.join(", ")),
        ]);
    }
    table.to_string()
}

pub fn movie_detail(movie: &Movie, lists: &[&Watchlist]) -> String {
    let mut out = format!("{} ({})\n", movie.title.bright_cyan().bold(), year(movie));
    out.push_str(&format!("{} {}\n", "Rating:".bold(), rating(movie)));
    if !movie.genres.is_empty() {
        out.push_str(&format!("{} {}\n", "Genres:".bold(), movie.genres.join(", ")));
    }
    if let Some(poster) = &movie.poster_url {
        out.push_str(&format!("{} {}\n", "Poster:".bold(), poster));
    }
    if !movie.overview.is_empty() {
        out.push('\n');
        out.push_str(&movie.overview);
        out.push('\n');
    }
    if !lists.is_empty() {
        let names: Vec<&str> = lists.iter().map(|l| l.name.as_str()).collect();
        out.push_str(&format!("\n{} {}\n", "On your watchlists:".green(), names.join(", ")));
    }
    out
}

pub fn genres_list(genres: &[String]) -> String {
    genres.join("\n")
}

pub fn watchlists_table(lists: &[Watchlist]) -> String {
    let mut table = table(&["ID", "Name", "Movies", "Description"]);
    for list in lists {
        table.add_row(vec![
            Cell::new(list.id),
            Cell::new(&list.name),
            Cell::new(list.len()),
            Cell::new(&list.description),
        ]);
    }
    table.to_string()
}

pub fn items_table(items: &[WatchlistItem]) -> String {
    let mut table = table(&["Item", "Movie", "Title", "Year", "Status"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(item.movie.id),
            Cell::new(&item.movie.title),
            Cell::new(year(&item.movie)),
            status_cell(&item.status),
        ]);
    }
    table.to_string()
}

/// The detail response may omit `items`, so they are passed in from the
/// item listing rather than read off the watchlist.
pub fn watchlist_detail(list: &Watchlist, items: &[WatchlistItem]) -> String {
    let mut out = format!("{}\n", list.name.bright_cyan().bold());
    if !list.description.is_empty() {
        out.push_str(&format!("{}\n", list.description));
    }
    out.push('\n');
    if items.is_empty() {
        out.push_str(&format!("{}", "No movies yet.".bright_black()));
    } else {
        out.push_str(&items_table(items));
    }
    out
}

pub fn user_detail(user: &User) -> String {
    let mut table = table(&["Field", "Value"]);
    table.add_row(vec![Cell::new("ID"), Cell::new(&user.id)]);
    table.add_row(vec![Cell::new("Username"), Cell::new(&user.username)]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    if let Some(created) = user.created_at {
        table.add_row(vec![Cell::new("Member since"), Cell::new(created.format("%Y-%m-%d").to_string())]);
    }
    table.to_string()
}
