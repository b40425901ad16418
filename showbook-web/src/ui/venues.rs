//! Venue pages: grouped listing, search results, detail

use showbook_common::views::{SearchResults, VenueArea, VenueDetail, VenueShow};

use super::{escape, escape_opt, genre_tags, image, layout, search_box, search_hits};
use crate::flash::Flash;

pub fn venues_page(areas: &[VenueArea], flash: Option<&Flash>) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    body.push_str(&search_box("/venues/search", "Find a venue", ""));
    body.push('\n');

    if areas.is_empty() {
        body.push_str(r#"<p>No venues yet. <a href="/venues/create">List one</a>.</p>"#);
    }

    for area in areas {
        body.push_str(&format!(
            "<h3>{}, {}</h3>\n<ul>\n",
            escape(&area.city),
            escape(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&format!(
                "    <li><a href=\"/venues/{}\">{}</a> ({} upcoming)</li>\n",
                venue.id,
                escape(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        body.push_str("</ul>\n");
    }

    layout("Venues", flash, &body)
}

pub fn venue_search_page(term: &str, results: &SearchResults, flash: Option<&Flash>) -> String {
    let body = format!(
        "<h1>Venues</h1>\n{}\n{}",
        search_box("/venues/search", "Find a venue", term),
        search_hits(results, term, "/venues")
    );
    layout("Venue Search", flash, &body)
}

fn show_rows(shows: &[VenueShow]) -> String {
    let mut html = String::from("<ul>\n");
    for show in shows {
        html.push_str(&format!(
            "    <li>{} <a href=\"/artists/{}\">{}</a> {}</li>\n",
            image(show.artist_image_link.as_deref(), &show.artist_name, "thumb"),
            show.artist_id,
            escape(&show.artist_name),
            escape(&show.start_time)
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn venue_page(venue: &VenueDetail, flash: Option<&Flash>) -> String {
    let seeking = if venue.seeking_talent {
        format!(
            "<p><strong>Seeking talent:</strong> {}</p>",
            escape_opt(venue.seeking_description.as_deref())
        )
    } else {
        "<p>Not currently seeking talent</p>".to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<p>{genres}</p>
{portrait}
<p>{address}<br>{city}, {state}</p>
<p>Phone: {phone}</p>
<p>Website: {website}</p>
<p>Facebook: {facebook}</p>
{seeking}
<p>
    <a class="button" href="/venues/{id}/edit">Edit</a>
    <form method="post" action="/venues/{id}/delete" style="display:inline">
        <button class="button button-danger" type="submit">Delete</button>
    </form>
</p>
<h2>{upcoming_count} Upcoming Shows</h2>
{upcoming}
<h2>{past_count} Past Shows</h2>
{past}"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        portrait = image(venue.image_link.as_deref(), &venue.name, "portrait"),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape_opt(venue.phone.as_deref()),
        website = escape_opt(venue.website.as_deref()),
        facebook = escape_opt(venue.facebook_link.as_deref()),
        seeking = seeking,
        upcoming_count = venue.upcoming_shows_count,
        upcoming = show_rows(&venue.upcoming_shows),
        past_count = venue.past_shows_count,
        past = show_rows(&venue.past_shows),
    );

    layout(&venue.name, flash, &body)
}
