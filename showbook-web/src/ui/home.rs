//! Landing page

use super::layout;
use crate::flash::Flash;

/// Directory totals shown on the landing page
#[derive(Debug, Clone, Copy, Default)]
pub struct Totals {
    pub venues: i64,
    pub artists: i64,
    pub shows: i64,
}

pub fn home_page(totals: Totals, flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>Showbook</h1>
<p>{} venues, {} artists, {} shows listed.</p>
<p>
    <a class="button" href="/venues/create">List a venue</a>
    <a class="button" href="/artists/create">List an artist</a>
    <a class="button" href="/shows/create">List a show</a>
</p>"#,
        totals.venues, totals.artists, totals.shows
    );
    layout("Home", flash, &body)
}
