use std::fmt::Write;

use poem::web::Html;

use crate::coordinators::{UserDetail, UserListing};
use crate::stores::LookupOption;
use crate::types::db::user;
use crate::types::internal::AuthLevel;

use super::{Page, delete_form, escape, label, render, select, text_input};

fn level_choices() -> Vec<LookupOption> {
    [AuthLevel::Admin, AuthLevel::Support, AuthLevel::Customer]
        .into_iter()
        .map(|level| LookupOption {
            id: level.as_i32(),
            label: level.label().to_string(),
        })
        .collect()
}

fn user_fields(user: Option<&user::Model>, customers: &[LookupOption]) -> String {
    let mut html = text_input(
        "username",
        "Username",
        user.map(|u| u.username.as_str()).unwrap_or(""),
    );
    let hint = if user.is_some() {
        " (leave blank to keep)"
    } else {
        ""
    };
    let _ = write!(
        html,
        r#"<label>Password{hint} <input type="password" name="password" autocomplete="new-password"></label>"#
    );
    html.push_str(&select("auth_level", "Level", &level_choices(), user.map(|u| u.auth_level)));
    html.push_str(&select(
        "customer_id",
        "Customer (level 3 only)",
        customers,
        user.and_then(|u| u.customer_id),
    ));
    html
}

pub fn user_list(page: &Page<'_>, listing: &UserListing) -> Html<String> {
    let levels = level_choices();
    let mut body = String::from(
        r#"<p><a href="/users/create">New user</a></p><form method="post" action="/users">"#,
    );
    body.push_str(&text_input("username", "Username", ""));
    body.push_str(&select("auth_level", "Level", &levels, None));
    body.push_str(&select("customer_id", "Customer", &listing.customers, None));
    body.push_str(r#"<button type="submit">Search</button></form>"#);

    if listing.users.is_empty() {
        body.push_str("<p>No users.</p>");
    } else {
        body.push_str("<table><tr><th>Username</th><th>Level</th><th>Customer</th></tr>");
        for u in &listing.users {
            let _ = write!(
                body,
                r#"<tr><td><a href="/users/{}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                u.id,
                escape(&u.username),
                label(&levels, Some(u.auth_level)),
                label(&listing.customers, u.customer_id),
            );
        }
        body.push_str("</table>");
    }
    render(page, &body)
}

pub fn user_create(page: &Page<'_>, customers: &[LookupOption]) -> Html<String> {
    let mut body = String::from(r#"<form method="post" action="/users/create">"#);
    body.push_str(&user_fields(None, customers));
    body.push_str(r#"<button type="submit">Create user</button></form>"#);
    render(page, &body)
}

pub fn user_detail(page: &Page<'_>, detail: &UserDetail) -> Html<String> {
    let id = detail.user.id;
    let mut body = format!(r#"<form method="post" action="/users/{id}">"#);
    body.push_str(&user_fields(Some(&detail.user), &detail.customers));
    body.push_str(r#"<button type="submit">Save</button></form>"#);
    body.push_str(&delete_form(&format!("/users/{id}/delete")));
    render(page, &body)
}
