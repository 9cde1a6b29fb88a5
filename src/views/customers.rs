use std::fmt::Write;

use poem::web::Html;

use crate::coordinators::{AssetLookups, CustomerDetail, TicketLabels};
use crate::stores::LookupOption;
use crate::types::db::customer;

use super::assets::asset_table;
use super::tickets::ticket_table;
use super::{Page, delete_form, escape, render, text_input};

/// Field set shared by the create and edit forms
pub fn customer_fields(customer: Option<&customer::Model>) -> String {
    let text = |value: Option<&str>| value.unwrap_or("").to_string();
    let mut html = String::new();
    html.push_str(&text_input(
        "customer_name",
        "Name",
        &text(customer.map(|c| c.customer_name.as_str())),
    ));
    html.push_str(&text_input(
        "contact_name",
        "Contact",
        &text(customer.and_then(|c| c.contact_name.as_deref())),
    ));
    html.push_str(&text_input(
        "contact_email",
        "Email",
        &text(customer.and_then(|c| c.contact_email.as_deref())),
    ));
    html.push_str(&text_input(
        "contact_phone",
        "Phone",
        &text(customer.and_then(|c| c.contact_phone.as_deref())),
    ));
    html.push_str(&text_input(
        "address",
        "Address",
        &text(customer.and_then(|c| c.address.as_deref())),
    ));
    html
}

pub fn customer_list(page: &Page<'_>, customers: &[customer::Model]) -> Html<String> {
    let mut body = String::from(r#"<form method="post" action="/customers">"#);
    body.push_str(&text_input("customer_name", "Name", ""));
    body.push_str(&text_input("contact_name", "Contact", ""));
    body.push_str(&text_input("contact_email", "Email", ""));
    body.push_str(r#"<button type="submit">Search</button></form>"#);

    if customers.is_empty() {
        body.push_str("<p>No customers.</p>");
    } else {
        body.push_str("<table><tr><th>Name</th><th>Contact</th><th>Email</th><th>Phone</th></tr>");
        for c in customers {
            let _ = write!(
                body,
                r#"<tr><td><a href="/customers/{}">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                c.id,
                escape(&c.customer_name),
                escape(c.contact_name.as_deref().unwrap_or("")),
                escape(c.contact_email.as_deref().unwrap_or("")),
                escape(c.contact_phone.as_deref().unwrap_or("")),
            );
        }
        body.push_str("</table>");
    }
    render(page, &body)
}

pub fn customer_detail(page: &Page<'_>, detail: &CustomerDetail) -> Html<String> {
    let id = detail.customer.id;
    let mut body = format!(r#"<form method="post" action="/customers/{id}">"#);
    body.push_str(&customer_fields(Some(&detail.customer)));
    body.push_str(r#"<button type="submit">Save</button></form>"#);

    let own = vec![LookupOption {
        id,
        label: detail.customer.customer_name.clone(),
    }];
    let asset_lookups = AssetLookups {
        customers: own.clone(),
        device_types: detail.device_types.clone(),
        statuses: detail.asset_statuses.clone(),
    };
    body.push_str("<h2>Assets</h2>");
    body.push_str(&asset_table(&detail.assets, &asset_lookups, true));

    let ticket_labels = TicketLabels {
        customers: own,
        devices: detail
            .assets
            .iter()
            .map(|a| LookupOption {
                id: a.id,
                label: a.hostname.clone(),
            })
            .collect(),
        statuses: detail.request_statuses.clone(),
        ..TicketLabels::default()
    };
    body.push_str("<h2>Open requests</h2>");
    body.push_str(&ticket_table(&detail.open_tickets, &ticket_labels, true));

    body.push_str("<h2>Delete customer</h2><p>Deleting a customer also deletes its assets, users and requests.</p>");
    body.push_str(&delete_form(&format!("/customers/{id}/delete")));
    render(page, &body)
}
