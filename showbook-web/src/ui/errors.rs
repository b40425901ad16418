//! Error pages

use super::layout;

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        None,
        r#"<h1>404</h1>
<p>The page you are looking for does not exist.</p>
<p><a href="/">Back to the start</a></p>"#,
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server Error",
        None,
        r#"<h1>500</h1>
<p>Something went wrong on our side. Please try again.</p>
<p><a href="/">Back to the start</a></p>"#,
    )
}
