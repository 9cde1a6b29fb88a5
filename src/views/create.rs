use poem::web::Html;

use crate::coordinators::AssetLookups;

use super::assets::asset_fields;
use super::customers::customer_fields;
use super::{Page, render};

/// Asset and customer creation forms
pub fn create_page(page: &Page<'_>, lookups: &AssetLookups) -> Html<String> {
    let mut body = String::from(r#"<h2>New asset</h2><form method="post" action="/create/asset">"#);
    body.push_str(&asset_fields(None, lookups));
    body.push_str(r#"<button type="submit">Create asset</button></form>"#);

    body.push_str(r#"<h2>New customer</h2><form method="post" action="/create/customer">"#);
    body.push_str(&customer_fields(None));
    body.push_str(r#"<button type="submit">Create customer</button></form>"#);
    render(page, &body)
}
