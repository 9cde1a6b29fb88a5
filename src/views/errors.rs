use poem::web::Html;

use super::{Page, escape, render};

/// Generic failure page.
///
/// With a `failed_path` (logged-in visitors only) the page carries a form
/// that raises a ticket about the failure.
pub fn application_error(failed_path: Option<&str>) -> Html<String> {
    let mut body = String::from("<p>Something went wrong while handling your request.</p>");
    if let Some(path) = failed_path {
        body.push_str(&format!(
            r#"<form method="post" action="/error"><input type="hidden" name="failed_path" value="{}"><label>What were you doing? <textarea name="description"></textarea></label> <button type="submit">Report this problem</button></form>"#,
            escape(path)
        ));
    }
    body.push_str(r#"<p><a href="/home">Back to home</a></p>"#);
    render(&Page::new("Application error", None, None), &body)
}

pub fn not_found() -> Html<String> {
    render(
        &Page::new("Page not found", None, None),
        r#"<p>The page you asked for does not exist.</p><p><a href="/home">Back to home</a></p>"#,
    )
}

pub fn invalid_method() -> Html<String> {
    render(
        &Page::new("Invalid request", None, None),
        r#"<p>That page cannot be used this way.</p><p><a href="/home">Back to home</a></p>"#,
    )
}
