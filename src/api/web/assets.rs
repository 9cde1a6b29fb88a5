use std::sync::Arc;

use poem::session::Session;
use poem::web::{Data, Form, Html, Path};
use poem::{Request, Response, handler};

use crate::coordinators::Coordinators;
use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::types::dto::assets::{AssetFilter, AssetForm, AssetSearchForm};
use crate::types::dto::common::DeleteForm;
use crate::types::internal::RecordKind;
use crate::views;

use super::gate::{ANY_USER, ASSET_STAFF, STAFF};
use super::session::{set_flash, take_flash};
use super::{page, parse_id};

#[handler]
pub async fn list(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ANY_USER.admit(req, session)?;

    let listing = coordinators
        .assets
        .list(&ctx, AssetFilter::default())
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    let flash = take_flash(session);
    Ok(views::assets::asset_list(&page("Assets", &ctx, &flash), &listing))
}

#[handler]
pub async fn search(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<AssetSearchForm>,
) -> Result<Html<String>, WebError> {
    let ctx = ANY_USER.admit(req, session)?;
    let filter = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/assets"))?;

    let listing = coordinators
        .assets
        .list(&ctx, filter)
        .await
        .map_err(|e| WebError::from_internal(e, "/assets"))?;

    let flash = take_flash(session);
    Ok(views::assets::asset_list(&page("Assets", &ctx, &flash), &listing))
}

#[handler]
pub async fn show(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ASSET_STAFF.admit(req, session)?;
    let asset_id = parse_id(&id, RecordKind::Asset)?;

    let detail = coordinators
        .assets
        .detail(&ctx, asset_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/assets"))?;

    let flash = take_flash(session);
    let title = format!("Asset {}", detail.asset.hostname);
    Ok(views::assets::asset_detail(&page(&title, &ctx, &flash), &detail))
}

#[handler]
pub async fn update(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<AssetForm>,
) -> Result<Response, WebError> {
    let ctx = ASSET_STAFF.admit(req, session)?;
    let asset_id = parse_id(&id, RecordKind::Asset)?;
    let back_to = format!("/assets/{asset_id}");

    let payload = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), &back_to))?;
    coordinators
        .assets
        .update(&ctx, asset_id, payload)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    set_flash(session, "Asset saved");
    Ok(see_other(&back_to))
}

/// Deletes only when the confirmation box was ticked
#[handler]
pub async fn delete(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, WebError> {
    let ctx = ASSET_STAFF.admit(req, session)?;
    let asset_id = parse_id(&id, RecordKind::Asset)?;

    if !form.confirmed() {
        return Ok(see_other(&format!("/assets/{asset_id}")));
    }

    coordinators
        .assets
        .delete(&ctx, asset_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/assets"))?;

    set_flash(session, "Asset deleted");
    Ok(see_other("/assets"))
}

/// `/create`: asset and customer forms
#[handler]
pub async fn create_page(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = STAFF.admit(req, session)?;

    let lookups = coordinators
        .assets
        .create_form(&ctx)
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    let flash = take_flash(session);
    Ok(views::create::create_page(&page("Create", &ctx, &flash), &lookups))
}

#[handler]
pub async fn create(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<AssetForm>,
) -> Result<Response, WebError> {
    let ctx = STAFF.admit(req, session)?;

    let payload = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/create"))?;
    let asset = coordinators
        .assets
        .create(&ctx, payload)
        .await
        .map_err(|e| WebError::from_internal(e, "/create"))?;

    set_flash(session, "Asset created");
    Ok(see_other(&format!("/assets/{}", asset.id)))
}
