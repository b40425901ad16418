//! Show listing page

use showbook_common::views::ShowListing;

use super::{escape, image, layout};
use crate::flash::Flash;

pub fn shows_page(shows: &[ShowListing], flash: Option<&Flash>) -> String {
    let mut body = String::from(
        "<h1>Shows</h1>\n<p><a class=\"button\" href=\"/shows/create\">List a show</a></p>\n<ul>\n",
    );
    for show in shows {
        body.push_str(&format!(
            "    <li>{} <strong>{}</strong> <a href=\"/artists/{}\">{}</a> at <a href=\"/venues/{}\">{}</a></li>\n",
            image(show.artist_image_link.as_deref(), &show.artist_name, "thumb"),
            escape(&show.start_time),
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name)
        ));
    }
    body.push_str("</ul>");

    layout("Shows", flash, &body)
}
