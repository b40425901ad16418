//! Create and edit forms
//!
//! Field names match the form schemas in `showbook_common::forms`. Edit
//! forms are prefilled from the stored record.

use showbook_common::db::{Artist, Venue};
use showbook_common::views::Choice;

use super::{escape, escape_opt, layout};
use crate::flash::Flash;

/// Genres offered in the multi-select
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

fn text_input(label: &str, name: &str, value: Option<&str>, required: bool) -> String {
    format!(
        r#"<label>{label}
    <input type="text" name="{name}" value="{value}"{required}>
</label>"#,
        label = label,
        name = name,
        value = escape_opt(value),
        required = if required { " required" } else { "" },
    )
}

fn textarea(label: &str, name: &str, value: Option<&str>) -> String {
    format!(
        r#"<label>{}
    <textarea name="{}">{}</textarea>
</label>"#,
        label,
        name,
        escape_opt(value)
    )
}

fn checkbox(label: &str, name: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{}"{}> {}</label>"#,
        name,
        if checked { " checked" } else { "" },
        label
    )
}

/// Multi-select of [`GENRES`], plus any stored genre outside that list
fn genre_select(selected: &[String]) -> String {
    let mut options: Vec<String> = GENRES
        .iter()
        .map(|genre| {
            let is_selected = selected.iter().any(|s| s == genre);
            option(genre, genre, is_selected)
        })
        .collect();

    for extra in selected.iter().filter(|s| !GENRES.contains(&s.as_str())) {
        options.push(option(extra, extra, true));
    }

    format!(
        "<label>Genres\n    <select name=\"genres\" multiple>\n{}\n    </select>\n</label>",
        options.join("\n")
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"        <option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

fn choice_select(label: &str, name: &str, choices: &[Choice]) -> String {
    let options: Vec<String> = choices
        .iter()
        .map(|c| option(&c.id.to_string(), &c.name, false))
        .collect();
    format!(
        "<label>{}\n    <select name=\"{}\" required>\n{}\n    </select>\n</label>",
        label,
        name,
        options.join("\n")
    )
}

fn form_page(title: &str, action: &str, fields: &[String], flash: Option<&Flash>) -> String {
    let body = format!(
        r#"<h1>{}</h1>
<form method="post" action="{}">
{}
<p><button class="button" type="submit">Submit</button></p>
</form>"#,
        escape(title),
        action,
        fields.join("\n")
    );
    layout(title, flash, &body)
}

/// Venue create form (`venue` is `None`) or prefilled edit form
pub fn venue_form(venue: Option<&Venue>, flash: Option<&Flash>) -> String {
    let (title, action) = match venue {
        Some(v) => (format!("Edit venue {}", v.name), format!("/venues/{}/edit", v.id)),
        None => ("List a new venue".to_string(), "/venues/create".to_string()),
    };
    let no_genres = Vec::new();

    let fields = [
        text_input("Name", "name", venue.map(|v| v.name.as_str()), true),
        text_input("City", "city", venue.map(|v| v.city.as_str()), true),
        text_input("State", "state", venue.map(|v| v.state.as_str()), true),
        text_input("Address", "address", venue.map(|v| v.address.as_str()), true),
        text_input("Phone", "phone", venue.and_then(|v| v.phone.as_deref()), false),
        genre_select(venue.map(|v| &v.genres).unwrap_or(&no_genres)),
        text_input("Image link", "image_link", venue.and_then(|v| v.image_link.as_deref()), false),
        text_input("Facebook link", "facebook_link", venue.and_then(|v| v.facebook_link.as_deref()), false),
        text_input("Website", "website", venue.and_then(|v| v.website.as_deref()), false),
        checkbox("Seeking talent", "seeking_talent", venue.is_some_and(|v| v.seeking_talent)),
        textarea(
            "Seeking description",
            "seeking_description",
            venue.and_then(|v| v.seeking_description.as_deref()),
        ),
    ];

    form_page(&title, &action, &fields, flash)
}

/// Artist create form (`artist` is `None`) or prefilled edit form
pub fn artist_form(artist: Option<&Artist>, flash: Option<&Flash>) -> String {
    let (title, action) = match artist {
        Some(a) => (format!("Edit artist {}", a.name), format!("/artists/{}/edit", a.id)),
        None => ("List a new artist".to_string(), "/artists/create".to_string()),
    };
    let no_genres = Vec::new();

    let fields = [
        text_input("Name", "name", artist.map(|a| a.name.as_str()), true),
        text_input("City", "city", artist.map(|a| a.city.as_str()), true),
        text_input("State", "state", artist.map(|a| a.state.as_str()), true),
        text_input("Phone", "phone", artist.and_then(|a| a.phone.as_deref()), false),
        genre_select(artist.map(|a| &a.genres).unwrap_or(&no_genres)),
        text_input("Image link", "image_link", artist.and_then(|a| a.image_link.as_deref()), false),
        text_input("Facebook link", "facebook_link", artist.and_then(|a| a.facebook_link.as_deref()), false),
        text_input("Website", "website", artist.and_then(|a| a.website.as_deref()), false),
        checkbox("Seeking venue", "seeking_venue", artist.is_some_and(|a| a.seeking_venue)),
        textarea(
            "Seeking description",
            "seeking_description",
            artist.and_then(|a| a.seeking_description.as_deref()),
        ),
    ];

    form_page(&title, &action, &fields, flash)
}

pub fn show_form(venues: &[Choice], artists: &[Choice], flash: Option<&Flash>) -> String {
    let fields = [
        choice_select("Artist", "artist_id", artists),
        choice_select("Venue", "venue_id", venues),
        r#"<label>Start time
    <input type="datetime-local" name="start_time" step="1" required>
</label>"#
            .to_string(),
    ];

    form_page("List a new show", "/shows/create", &fields, flash)
}
