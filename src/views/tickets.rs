use std::fmt::Write;

use chrono::DateTime;
use poem::web::Html;

use crate::coordinators::{ContactPage, TicketDetail, TicketLabels};
use crate::stores::LookupOption;
use crate::types::db::ticket;

use super::{Page, delete_form, escape, label, options, render, select, text_input};

fn timestamp(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Ticket table; titles link to the ticket page when `linked`
pub fn ticket_table(tickets: &[ticket::Model], labels: &TicketLabels, linked: bool) -> String {
    if tickets.is_empty() {
        return "<p>No tickets.</p>".to_string();
    }

    let mut html = String::from(
        "<table><tr><th>Id</th><th>Title</th><th>Status</th><th>Customer</th><th>Device</th><th>Assigned to</th><th>Raised</th></tr>",
    );
    for t in tickets {
        let title = if linked {
            format!(r#"<a href="/tickets/{}">{}</a>"#, t.id, escape(&t.title))
        } else {
            escape(&t.title)
        };
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            t.id,
            title,
            label(&labels.statuses, Some(t.status_id)),
            label(&labels.customers, t.customer_id),
            label(&labels.devices, t.device_id),
            label(&labels.users, t.assigned_to),
            timestamp(t.created_at),
        );
    }
    html.push_str("</table>");
    html
}

fn device_choices(devices: &[crate::types::db::asset::Model]) -> Vec<LookupOption> {
    devices
        .iter()
        .map(|d| LookupOption {
            id: d.id,
            label: d.hostname.clone(),
        })
        .collect()
}

/// `/contact`: the request form, plus search and every ticket for staff
pub fn contact_page(page: &Page<'_>, contact: &ContactPage) -> Html<String> {
    let mut body = String::from(r#"<h2>Raise a request</h2><form method="post" action="/contact">"#);
    body.push_str(&text_input("title", "Title", ""));
    body.push_str(r#"<label>Description <textarea name="description"></textarea></label>"#);
    body.push_str(&select("device_id", "Device", &device_choices(&contact.devices), None));
    if page.is_staff() {
        body.push_str(&select("customer_id", "Customer", &contact.labels.customers, None));
    }
    body.push_str(r#"<button type="submit">Submit</button></form>"#);

    if page.is_staff() {
        body.push_str(r#"<h2>Search requests</h2><form method="post" action="/user-requests">"#);
        body.push_str(&text_input("title", "Title", ""));
        body.push_str(&select("status_id", "Status", &contact.labels.statuses, None));
        body.push_str(&select("customer_id", "Customer", &contact.labels.customers, None));
        body.push_str(&select("device_id", "Device", &contact.labels.devices, None));
        body.push_str(&select("assigned_to", "Assigned to", &contact.labels.users, None));
        body.push_str(r#"<button type="submit">Search</button></form><h2>Requests</h2>"#);
        body.push_str(&ticket_table(&contact.tickets, &contact.labels, true));
    }

    render(page, &body)
}

pub fn ticket_detail(page: &Page<'_>, detail: &TicketDetail) -> Html<String> {
    let t = &detail.ticket;
    let labels = &detail.labels;
    let base = format!("/tickets/{}", t.id);
    let mut body = String::new();

    let _ = write!(
        body,
        "<dl><dt>Title</dt><dd>{}</dd><dt>Description</dt><dd>{}</dd><dt>Status</dt><dd>{}</dd><dt>Customer</dt><dd>{}</dd><dt>Device</dt><dd>{}</dd><dt>Requested by</dt><dd>{}</dd><dt>Assigned to</dt><dd>{}</dd><dt>Raised</dt><dd>{}</dd><dt>Updated</dt><dd>{}</dd></dl>",
        escape(&t.title),
        escape(&t.description),
        label(&labels.statuses, Some(t.status_id)),
        label(&labels.customers, t.customer_id),
        label(&labels.devices, t.device_id),
        label(&labels.users, t.created_by),
        label(&labels.users, t.assigned_to),
        timestamp(t.created_at),
        timestamp(t.updated_at),
    );

    let _ = write!(
        body,
        r#"<form method="post" action="{base}/reassign"><button type="submit">Assign to me</button></form><form method="post" action="{base}/close"><button type="submit">Close</button></form>"#
    );

    let _ = write!(
        body,
        r#"<form method="post" action="{base}/changeDevice"><select name="device_id">{}</select> <button type="submit">Change device</button></form>"#,
        options(&device_choices(&detail.devices), t.device_id)
    );
    let _ = write!(
        body,
        r#"<form method="post" action="{base}/changeCustomer"><select name="customer_id">{}</select> <button type="submit">Change customer</button></form>"#,
        options(&labels.customers, t.customer_id)
    );
    let users: Vec<LookupOption> = detail
        .users
        .iter()
        .map(|u| LookupOption {
            id: u.id,
            label: u.username.clone(),
        })
        .collect();
    let _ = write!(
        body,
        r#"<form method="post" action="{base}/changeUser"><select name="user_id">{}</select> <button type="submit">Change requester</button></form>"#,
        options(&users, t.created_by)
    );

    body.push_str("<h2>Notes</h2>");
    if detail.notes.is_empty() {
        body.push_str("<p>No notes yet.</p>");
    }
    for note in &detail.notes {
        let author = if note.is_system {
            "System".to_string()
        } else {
            label(&labels.users, note.created_by)
        };
        let _ = write!(
            body,
            r#"<div class="note"><p>{}</p><small>{} {}</small>{}</div>"#,
            escape(&note.body),
            author,
            timestamp(note.created_at),
            delete_form(&format!("{base}/note/{}/delete", note.id)),
        );
    }
    let _ = write!(
        body,
        r#"<form method="post" action="{base}/addNote"><textarea name="body"></textarea> <button type="submit">Add note</button></form>"#
    );

    body.push_str("<h2>Delete request</h2>");
    body.push_str(&delete_form(&format!("{base}/delete")));

    render(page, &body)
}
