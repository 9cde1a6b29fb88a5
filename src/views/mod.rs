// Views layer - server-rendered HTML
//
// Views receive data that has already been authorized and scoped. They
// decide nothing about access beyond which navigation links to show.

pub mod assets;
pub mod create;
pub mod customers;
pub mod errors;
pub mod home;
pub mod login;
pub mod tickets;
pub mod users;

use std::fmt::Write;

use poem::web::Html;

use crate::stores::LookupOption;
use crate::types::internal::{AuthLevel, SessionIdentity};

/// Per-request chrome around a page body
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub title: &'a str,
    pub identity: Option<&'a SessionIdentity>,
    pub flash: Option<&'a str>,
}

impl<'a> Page<'a> {
    pub fn new(
        title: &'a str,
        identity: Option<&'a SessionIdentity>,
        flash: Option<&'a str>,
    ) -> Self {
        Self {
            title,
            identity,
            flash,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.identity.is_some_and(SessionIdentity::is_staff)
    }
}

/// HTML-escape text for element content and attribute values
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

fn nav(identity: &SessionIdentity) -> String {
    let mut links = vec![
        ("/home", "Home"),
        ("/assets", "Assets"),
        ("/contact", "Contact"),
    ];
    if identity.is_staff() {
        links.push(("/customers", "Customers"));
        links.push(("/create", "Create"));
    }
    if identity.auth_level == AuthLevel::Admin {
        links.push(("/users", "Users"));
    }
    links.push(("/logout", "Log out"));

    let mut html = String::from("<nav>");
    for (href, label) in links {
        let _ = write!(html, r#"<a href="{href}">{label}</a> "#);
    }
    let _ = write!(
        html,
        "<span>Signed in as {} ({})</span></nav>",
        escape(&identity.username),
        identity.auth_level.label()
    );
    html
}

/// Wrap `body` in the shared page layout
pub fn render(page: &Page<'_>, body: &str) -> Html<String> {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} - Assetdesk</title></head><body>",
        escape(page.title)
    );
    if let Some(identity) = page.identity {
        html.push_str(&nav(identity));
    }
    if let Some(flash) = page.flash {
        let _ = write!(html, r#"<p class="flash">{}</p>"#, escape(flash));
    }
    let _ = write!(html, "<h1>{}</h1>{}</body></html>", escape(page.title), body);
    Html(html)
}

/// `<option>` list with an empty first entry
pub fn options(choices: &[LookupOption], selected: Option<i32>) -> String {
    let mut html = String::from(r#"<option value=""></option>"#);
    for choice in choices {
        let marker = if Some(choice.id) == selected {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            choice.id,
            marker,
            escape(&choice.label)
        );
    }
    html
}

/// Labelled `<select>`
pub fn select(name: &str, label: &str, choices: &[LookupOption], selected: Option<i32>) -> String {
    format!(
        r#"<label>{label} <select name="{name}">{}</select></label>"#,
        options(choices, selected)
    )
}

/// Labelled text `<input>`
pub fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label>{label} <input type="text" name="{name}" value="{}"></label>"#,
        escape(value)
    )
}

/// Delete button guarded by a confirmation checkbox
pub fn delete_form(action: &str) -> String {
    format!(
        r#"<form method="post" action="{action}"><label><input type="checkbox" name="confirm" value="yes"> Confirm delete</label> <button type="submit">Delete</button></form>"#
    )
}

/// Label for an optional id, or an empty string
pub fn label(choices: &[LookupOption], id: Option<i32>) -> String {
    escape(crate::stores::lookup_store::label_for(choices, id))
}
