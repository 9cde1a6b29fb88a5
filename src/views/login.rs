use poem::web::Html;

use super::{Page, render};

pub fn login_page(flash: Option<&str>) -> Html<String> {
    render(
        &Page::new("Log in", None, flash),
        r#"<form method="post" action="/login">
<label>Username <input type="text" name="username" autocomplete="username"></label>
<label>Password <input type="password" name="password" autocomplete="current-password"></label>
<button type="submit">Log in</button>
</form>"#,
    )
}
