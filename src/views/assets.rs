use std::fmt::Write;

use poem::web::Html;

use crate::coordinators::{AssetDetail, AssetListing, AssetLookups};
use crate::types::db::asset;

use super::{Page, delete_form, escape, label, render, select, text_input};

/// Device table. Hostnames link to the edit page for staff.
pub fn asset_table(assets: &[asset::Model], lookups: &AssetLookups, linked: bool) -> String {
    if assets.is_empty() {
        return "<p>No assets.</p>".to_string();
    }

    let mut html = String::from(
        "<table><tr><th>Hostname</th><th>Customer</th><th>Type</th><th>Status</th><th>Serial</th></tr>",
    );
    for a in assets {
        let hostname = if linked {
            format!(r#"<a href="/assets/{}">{}</a>"#, a.id, escape(&a.hostname))
        } else {
            escape(&a.hostname)
        };
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            hostname,
            label(&lookups.customers, Some(a.customer_id)),
            label(&lookups.device_types, Some(a.device_type_id)),
            label(&lookups.statuses, Some(a.status_id)),
            escape(a.serial_number.as_deref().unwrap_or("")),
        );
    }
    html.push_str("</table>");
    html
}

/// Field set shared by the create and edit forms
pub fn asset_fields(asset: Option<&asset::Model>, lookups: &AssetLookups) -> String {
    let mut html = String::new();
    html.push_str(&text_input(
        "hostname",
        "Hostname",
        asset.map(|a| a.hostname.as_str()).unwrap_or(""),
    ));
    html.push_str(&select(
        "customer_id",
        "Customer",
        &lookups.customers,
        asset.map(|a| a.customer_id),
    ));
    html.push_str(&select(
        "device_type_id",
        "Type",
        &lookups.device_types,
        asset.map(|a| a.device_type_id),
    ));
    html.push_str(&select(
        "status_id",
        "Status",
        &lookups.statuses,
        asset.map(|a| a.status_id),
    ));
    html.push_str(&text_input(
        "serial_number",
        "Serial number",
        asset.and_then(|a| a.serial_number.as_deref()).unwrap_or(""),
    ));
    html.push_str(&text_input(
        "description",
        "Description",
        asset.and_then(|a| a.description.as_deref()).unwrap_or(""),
    ));
    html
}

pub fn asset_list(page: &Page<'_>, listing: &AssetListing) -> Html<String> {
    let lookups = &listing.lookups;
    let mut body = String::from(r#"<form method="post" action="/assets">"#);
    body.push_str(&text_input("hostname", "Hostname", ""));
    if page.is_staff() {
        body.push_str(&select("customer_id", "Customer", &lookups.customers, None));
    }
    body.push_str(&select("device_type_id", "Type", &lookups.device_types, None));
    body.push_str(&select("status_id", "Status", &lookups.statuses, None));
    body.push_str(&text_input("serial_number", "Serial number", ""));
    body.push_str(r#"<button type="submit">Search</button></form>"#);
    body.push_str(&asset_table(&listing.assets, lookups, page.is_staff()));
    render(page, &body)
}

pub fn asset_detail(page: &Page<'_>, detail: &AssetDetail) -> Html<String> {
    let id = detail.asset.id;
    let mut body = format!(r#"<form method="post" action="/assets/{id}">"#);
    body.push_str(&asset_fields(Some(&detail.asset), &detail.lookups));
    body.push_str(r#"<button type="submit">Save</button></form>"#);
    body.push_str(&delete_form(&format!("/assets/{id}/delete")));
    render(page, &body)
}
