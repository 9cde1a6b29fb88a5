use std::sync::Arc;

use poem::session::Session;
use poem::web::{Data, Form, Html, Path};
use poem::{Request, Response, handler};

use crate::coordinators::{Coordinators, ErrorReport};
use crate::errors::WebError;
use crate::errors::web::see_other;
use crate::types::dto::common::{DeleteForm, ErrorReportForm};
use crate::types::dto::tickets::{
    ChangeCustomerForm, ChangeDeviceForm, ChangeUserForm, NoteForm, TicketChange, TicketForm,
    TicketSearchForm,
};
use crate::types::internal::{RecordKind, RequestContext};
use crate::views;

use super::gate::{ANY_USER, TICKET_STAFF};
use super::session::{set_flash, take_flash};
use super::{page, parse_id};

/// Open requests nobody has picked up
#[handler]
pub async fn home(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ANY_USER.admit(req, session)?;

    let listing = coordinators
        .tickets
        .home(&ctx)
        .await
        .map_err(|e| WebError::from_internal(e, "/"))?;

    let flash = take_flash(session);
    Ok(views::home::home_page(&page("Home", &ctx, &flash), &listing))
}

#[handler]
pub async fn contact(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = ANY_USER.admit(req, session)?;

    let listing = coordinators
        .tickets
        .contact_page(&ctx)
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    let flash = take_flash(session);
    Ok(views::tickets::contact_page(&page("Contact", &ctx, &flash), &listing))
}

/// Raise a request from `/contact`
#[handler]
pub async fn create(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<TicketForm>,
) -> Result<Response, WebError> {
    let ctx = ANY_USER.admit(req, session)?;

    let payload = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/contact"))?;
    let ticket = coordinators
        .tickets
        .create(&ctx, payload)
        .await
        .map_err(|e| WebError::from_internal(e, "/contact"))?;

    set_flash(session, &format!("Request {} created", ticket.id));
    Ok(see_other("/contact"))
}

/// `/user-requests`: staff ticket search
#[handler]
pub async fn search(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<TicketSearchForm>,
) -> Result<Html<String>, WebError> {
    let ctx = TICKET_STAFF.admit(req, session)?;
    let filter = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), "/contact"))?;

    let listing = coordinators
        .tickets
        .search(&ctx, filter)
        .await
        .map_err(|e| WebError::from_internal(e, "/contact"))?;

    let flash = take_flash(session);
    Ok(views::tickets::contact_page(&page("Contact", &ctx, &flash), &listing))
}

#[handler]
pub async fn show(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Html<String>, WebError> {
    let ctx = TICKET_STAFF.admit(req, session)?;
    let ticket_id = parse_id(&id, RecordKind::Ticket)?;

    let detail = coordinators
        .tickets
        .detail(&ctx, ticket_id)
        .await
        .map_err(|e| WebError::from_internal(e, "/contact"))?;

    let flash = take_flash(session);
    let title = format!("Request {}: {}", detail.ticket.id, detail.ticket.title);
    Ok(views::tickets::ticket_detail(&page(&title, &ctx, &flash), &detail))
}

/// Admit a ticket action and parse its id
fn admit_ticket(
    req: &Request,
    session: &Session,
    id: &str,
) -> Result<(RequestContext, i32, String), WebError> {
    let ctx = TICKET_STAFF.admit(req, session)?;
    let ticket_id = parse_id(id, RecordKind::Ticket)?;
    Ok((ctx, ticket_id, format!("/tickets/{ticket_id}")))
}

#[handler]
pub async fn add_note(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<NoteForm>,
) -> Result<Response, WebError> {
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, &id)?;

    let body = form
        .validate()
        .map_err(|e| WebError::from_internal(e.into(), &back_to))?;
    coordinators
        .tickets
        .add_note(&ctx, ticket_id, body)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    Ok(see_other(&back_to))
}

#[handler]
pub async fn delete_note(
    req: &Request,
    session: &Session,
    Path((id, note_id)): Path<(String, String)>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, WebError> {
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, &id)?;
    let note_id = parse_id(&note_id, RecordKind::Note)?;

    if !form.confirmed() {
        return Ok(see_other(&back_to));
    }

    coordinators
        .tickets
        .delete_note(&ctx, ticket_id, note_id)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    Ok(see_other(&back_to))
}

async fn apply_change(
    coordinators: &Coordinators,
    req: &Request,
    session: &Session,
    id: &str,
    change: Result<TicketChange, crate::errors::internal::ValidationError>,
) -> Result<Response, WebError> {
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, id)?;

    let change = change.map_err(|e| WebError::from_internal(e.into(), &back_to))?;
    coordinators
        .tickets
        .change(&ctx, ticket_id, change)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    Ok(see_other(&back_to))
}

#[handler]
pub async fn change_device(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<ChangeDeviceForm>,
) -> Result<Response, WebError> {
    apply_change(coordinators, req, session, &id, form.validate()).await
}

#[handler]
pub async fn change_customer(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<ChangeCustomerForm>,
) -> Result<Response, WebError> {
    apply_change(coordinators, req, session, &id, form.validate()).await
}

#[handler]
pub async fn change_user(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<ChangeUserForm>,
) -> Result<Response, WebError> {
    apply_change(coordinators, req, session, &id, form.validate()).await
}

/// Assign to the acting user; a closed ticket is refused with a message
#[handler]
pub async fn reassign(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Response, WebError> {
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, &id)?;

    coordinators
        .tickets
        .reassign(&ctx, ticket_id)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    Ok(see_other(&back_to))
}

#[handler]
pub async fn close(
    req: &Request,
    session: &Session,
    Path(id): Path<String>,
    Data(coordinators): Data<&Arc<Coordinators>>,
) -> Result<Response, WebError> {
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, &id)?;

    coordinators
        .tickets
        .close(&ctx, ticket_id)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

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
    let (ctx, ticket_id, back_to) = admit_ticket(req, session, &id)?;

    if !form.confirmed() {
        return Ok(see_other(&back_to));
    }

    coordinators
        .tickets
        .delete(&ctx, ticket_id)
        .await
        .map_err(|e| WebError::from_internal(e, &back_to))?;

    set_flash(session, "Request deleted");
    Ok(see_other("/contact"))
}

/// Escalation form on the error page
#[handler]
pub async fn report_error(
    req: &Request,
    session: &Session,
    Data(coordinators): Data<&Arc<Coordinators>>,
    Form(form): Form<ErrorReportForm>,
) -> Result<Response, WebError> {
    let ctx = ANY_USER.admit(req, session)?;

    let report = ErrorReport {
        failed_path: form.failed_path.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    let ticket = coordinators
        .tickets
        .report_error(&ctx, report)
        .await
        .map_err(|e| WebError::from_internal(e, "/home"))?;

    set_flash(session, &format!("Request {} created", ticket.id));
    Ok(see_other("/home"))
}
