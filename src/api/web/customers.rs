use std::sync::Arc;

use poem::session::Session;
use poem::web::{Data, Form, Html, Path};
use poem::{Request, Response, handler};

use crate::coordinators::Coordinators;
use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::types::dto::common::DeleteForm;
use crate::types::dto::customers::{CustomerFilter, CustomerForm, CustomerSearchForm};
use crate::types::internal::RecordKind;
use crate::views;

use super::gate::STAFF;
use super::session::{set_flash, take_flash};
use super::{page, parse_id};

#[handler]
pub async fn list(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = STAFF.admit(req, session)?;

    let customers = coordinators
        .customers
        .list(&ctx, CustomerFilter::default())
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    let flash = take_flash(session);
    Ok(views::customers::customer_list(&page("Customers", &ctx, &flash), &customers))
}

#[handler]
pub async fn search(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<CustomerSearchForm>,
) -> Result<Html<String>, WebError> {
    let ctx = STAFF.admit(req, session)?;

    let customers = coordinators
        .customers
        .list(&ctx, form.into_filter())
        .await
        .map_err(|e| WebError::from_internal(e, "/customers"))?;

    let flash = take_flash(session);
    Ok(views::customers::customer_list(&page("Customers", &ctx, &flash), &customers))
}

/// Customer record with its assets and open requests
#[handler]
pub async fn show(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = STAFF.admit(req, session)?;
    let customer_id = parse_id(&id, RecordKind::Customer)?;

    let detail = coordinators
        .customers
        .detail(&ctx, customer_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/customers"))?;

    let flash = take_flash(session);
    let title = detail.customer.customer_name.clone();
    Ok(views::customers::customer_detail(&page(&title, &ctx, &flash), &detail))
}

#[handler]
pub async fn update(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, WebError> {
    let ctx = STAFF.admit(req, session)?;
    let customer_id = parse_id(&id, RecordKind::Customer)?;
    let back_to = format!("/customers/{customer_id}");

    let payload = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), &back_to))?;
    coordinators
        .customers
        .update(&ctx, customer_id, payload)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    set_flash(session, "Customer saved");
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
    let ctx = STAFF.admit(req, session)?;
    let customer_id = parse_id(&id, RecordKind::Customer)?;

    if !form.confirmed() {
        return Ok(see_other(&format!("/customers/{customer_id}")));
    }

    coordinators
        .customers
        .delete(&ctx, customer_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/customers"))?;

    set_flash(session, "Customer deleted");
    Ok(see_other("/customers"))
}

/// `/create/customer`
#[handler]
pub async fn create(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, WebError> {
    let ctx = STAFF.admit(req, session)?;

    let payload = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/create"))?;
    let customer = coordinators
        .customers
        .create(&ctx, payload)
        .await
        .map_err(|e| WebError::from_internal(e, "/create"))?;

    set_flash(session, "Customer created");
    Ok(see_other(&format!("/customers/{}", customer.id)))
}
