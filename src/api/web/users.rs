use std::sync::Arc;

use poem::session::Session;
use poem::web::{Data, Form, Html, Path};
use poem::{Request, Response, handler};

use crate::coordinators::Coordinators;
use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::types::dto::common::DeleteForm;
use crate::types::dto::users::{UserFilter, UserForm, UserSearchForm};
use crate::types::internal::RecordKind;
use crate::views;

use super::gate::ADMIN;
use super::session::{set_flash, take_flash};
use super::{page, parse_id};

#[handler]
pub async fn list(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ADMIN.admit(req, session)?;

    let listing = coordinators
        .users
        .list(&ctx, UserFilter::default())
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    let flash = take_flash(session);
    Ok(views::users::user_list(&page("Users", &ctx, &flash), &listing))
}

#[handler]
pub async fn search(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<UserSearchForm>,
) -> Result<Html<String>, WebError> {
    let ctx = ADMIN.admit(req, session)?;
    let filter = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/users"))?;

    let listing = coordinators
        .users
        .list(&ctx, filter)
        .await
        .map_err(|e| WebError::from_internal(e, "/users"))?;

    let flash = take_flash(session);
    Ok(views::users::user_list(&page("Users", &ctx, &flash), &listing))
}

#[handler]
pub async fn new_form(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ADMIN.admit(req, session)?;

    let customers = coordinators
        .users
        .customers(&ctx)
        .await
        .map_err(|e| WebError::from_internal(e, "/users"))?;

    let flash = take_flash(session);
    Ok(views::users::user_create(&page("New user", &ctx, &flash), &customers))
}

#[handler]
pub async fn create(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<UserForm>,
) -> Result<Response, WebError> {
    let ctx = ADMIN.admit(req, session)?;

    let payload = form
        .validate_new()
        .map_err(|e| WebError::from_internal(e.into(), "/users/create"))?;
    let user = coordinators
        .users
        .create(&ctx, payload)
        .await
        .map_err(|e| WebError::from_internal(e, "/users/create"))?;

    set_flash(session, "User created");
    Ok(see_other(&format!("/users/{}", user.id)))
}

#[handler]
pub async fn show(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ADMIN.admit(req, session)?;
    let user_id = parse_id(&id, RecordKind::User)?;

    let detail = coordinators
        .users
        .detail(&ctx, user_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/users"))?;

    let flash = take_flash(session);
    let title = format!("User {}", detail.user.username);
    Ok(views::users::user_detail(&page(&title, &ctx, &flash), &detail))
}

/// A blank password field keeps the current password
#[handler]
pub async fn update(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<UserForm>,
) -> Result<Response, WebError> {
    let ctx = ADMIN.admit(req, session)?;
    let user_id = parse_id(&id, RecordKind::User)?;
    let back_to = format!("/users/{user_id}");

    let payload = form
        .validate_update()
        .map_err(|e| WebError::from_internal(e.into(), &back_to))?;
    coordinators
        .users
        .update(&ctx, user_id, payload)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    set_flash(session, "User saved");
    Ok(see_other(&back_to))
}

#[handler]
pub async fn delete(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, WebError> {
    let ctx = ADMIN.admit(req, session)?;
    let user_id = parse_id(&id, RecordKind::User)?;
    let back_to = format!("/users/{user_id}");

    if !form.confirmed() {
        return Ok(see_other(&back_to));
    }

    coordinators
        .users
        .delete(&ctx, user_id)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    set_flash(session, "User deleted");
    Ok(see_other("/users"))
}
