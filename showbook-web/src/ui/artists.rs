//! Artist pages: listing, search results, detail

use showbook_common::views::{ArtistDetail, ArtistListItem, ArtistShow, SearchResults};

use super::{escape, escape_opt, genre_tags, image, layout, search_box, search_hits};
use crate::flash::Flash;

pub fn artists_page(artists: &[ArtistListItem], flash: Option<&Flash>) -> String {
    let mut body = String::from("<h1>Artists</h1>\n");
    body.push_str(&search_box("/artists/search", "Find an artist", ""));
    body.push_str("\n<ul>\n");
    for artist in artists {
        body.push_str(&format!(
            "    <li><a href=\"/artists/{}\">{}</a></li>\n",
            artist.id,
            escape(&artist.name)
        ));
    }
    body.push_str("</ul>");

    layout("Artists", flash, &body)
}

pub fn artist_search_page(term: &str, results: &SearchResults, flash: Option<&Flash>) -> String {
    let body = format!(
        "<h1>Artists</h1>\n{}\n{}",
        search_box("/artists/search", "Find an artist", term),
        search_hits(results, term, "/artists")
    );
    layout("Artist Search", flash, &body)
}

fn show_rows(shows: &[ArtistShow]) -> String {
    let mut html = String::from("<ul>\n");
    for show in shows {
        html.push_str(&format!(
            "    <li>{} <a href=\"/venues/{}\">{}</a> {}</li>\n",
            image(show.venue_image_link.as_deref(), &show.venue_name, "thumb"),
            show.venue_id,
            escape(&show.venue_name),
            escape(&show.start_time)
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn artist_page(artist: &ArtistDetail, flash: Option<&Flash>) -> String {
    let seeking = if artist.seeking_venue {
        format!(
            "<p><strong>Seeking performance venues:</strong> {}</p>",
            escape_opt(artist.seeking_description.as_deref())
        )
    } else {
        "<p>Not currently seeking performance venues</p>".to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<p>{genres}</p>
{portrait}
<p>{city}, {state}</p>
<p>Phone: {phone}</p>
<p>Website: {website}</p>
<p>Facebook: {facebook}</p>
{seeking}
<p><a class="button" href="/artists/{id}/edit">Edit</a></p>
<h2>{upcoming_count} Upcoming Shows</h2>
{upcoming}
<h2>{past_count} Past Shows</h2>
{past}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        portrait = image(artist.image_link.as_deref(), &artist.name, "portrait"),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape_opt(artist.phone.as_deref()),
        website = escape_opt(artist.website.as_deref()),
        facebook = escape_opt(artist.facebook_link.as_deref()),
        seeking = seeking,
        upcoming_count = artist.upcoming_shows_count,
        upcoming = show_rows(&artist.upcoming_shows),
        past_count = artist.past_shows_count,
        past = show_rows(&artist.past_shows),
    );

    layout(&artist.name, flash, &body)
}
