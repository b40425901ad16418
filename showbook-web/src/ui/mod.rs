//! HTML pages
//!
//! Each page module renders one view-model into a full document through
//! [`layout`]. Every piece of stored or submitted text goes through
//! [`escape`] before it reaches the markup.

use crate::flash::{Flash, FlashLevel};
use showbook_common::views::SearchResults;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

/// HTML-escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped optional text, empty when absent
pub(crate) fn escape_opt(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

/// Image tag, or nothing when there is no link
pub(crate) fn image(link: Option<&str>, alt: &str, class: &str) -> String {
    match link {
        Some(src) => format!(
            r#"<img class="{}" src="{}" alt="{}">"#,
            class,
            escape(src),
            escape(alt)
        ),
        None => String::new(),
    }
}

pub(crate) fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, escape(g)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.level {
                FlashLevel::Info => "flash flash-info",
                FlashLevel::Error => "flash flash-error",
            };
            format!(r#"<div class="{}">{}</div>"#, class, escape(&flash.message))
        }
        None => String::new(),
    }
}

/// Full document around `body`
pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Showbook</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }}
        header {{
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 15px 20px;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }}
        header nav a {{
            color: #4a9eff;
            margin-right: 15px;
            text-decoration: none;
        }}
        header form {{
            display: inline;
        }}
        .build-info {{
            font-family: 'Courier New', monospace;
            color: #888;
            font-size: 12px;
        }}
        .content {{
            padding: 20px;
        }}
        h1, h2, h3 {{
            color: #4a9eff;
        }}
        a {{
            color: #4a9eff;
        }}
        .flash {{
            margin: 15px 20px 0;
            padding: 10px 15px;
            border-radius: 4px;
        }}
        .flash-info {{
            background: #10b981;
            color: #fff;
        }}
        .flash-error {{
            background: #ef4444;
            color: #fff;
        }}
        .genre {{
            display: inline-block;
            padding: 2px 8px;
            border-radius: 10px;
            background: #3a3a3a;
            font-size: 12px;
        }}
        .thumb {{
            max-width: 80px;
            max-height: 80px;
        }}
        .portrait {{
            max-width: 320px;
        }}
        label {{
            display: block;
            margin-top: 10px;
        }}
        .button {{
            display: inline-block;
            padding: 8px 16px;
            background: #4a9eff;
            color: white;
            border: none;
            border-radius: 4px;
            text-decoration: none;
            cursor: pointer;
        }}
        .button-danger {{
            background: #ef4444;
        }}
    </style>
</head>
<body>
    <header>
        <nav>
            <a href="/">Showbook</a>
            <a href="/venues">Venues</a>
            <a href="/artists">Artists</a>
            <a href="/shows">Shows</a>
        </nav>
        <div class="build-info">v{version} ({git_hash})</div>
    </header>
    {flash}
    <div class="content">
{body}
    </div>
</body>
</html>
"#,
        title = escape(title),
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        flash = flash_banner(flash),
        body = body,
    )
}

/// Name-search box posting to `action`
pub(crate) fn search_box(action: &str, placeholder: &str, term: &str) -> String {
    format!(
        r#"<form method="post" action="{}">
    <input type="search" name="search_term" placeholder="{}" value="{}">
    <button class="button" type="submit">Search</button>
</form>"#,
        action,
        escape(placeholder),
        escape(term)
    )
}

/// Search matches as links under `link_prefix` (`/venues`, `/artists`)
pub(crate) fn search_hits(results: &SearchResults, term: &str, link_prefix: &str) -> String {
    let mut html = format!(
        "<h3>Number of search results for \"{}\": {}</h3>\n<ul>\n",
        escape(term),
        results.count
    );
    for hit in &results.data {
        html.push_str(&format!(
            "    <li><a href=\"{}/{}\">{}</a> ({} upcoming)</li>\n",
            link_prefix,
            hit.id,
            escape(&hit.name),
            hit.num_upcoming_shows
        ));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Rock" & 'Roll'</b>"#),
            "&lt;b&gt;&quot;Rock&quot; &amp; &#39;Roll&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_layout_escapes_flash() {
        let html = layout("Home", Some(&Flash::error("<script>")), "<p>body</p>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("flash-error"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_image_absent() {
        assert_eq!(image(None, "x", "thumb"), "");
        assert!(image(Some("https://img/a.png"), "x", "thumb").contains(r#"src="https://img/a.png""#));
    }
}
