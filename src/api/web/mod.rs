// Web layer - HTML routes
//
// Every handler admits the request through a `Gate` first, then calls one
// coordinator and renders a view or redirects. Errors leave as `WebError`
// and are turned into redirects or error pages by `ErrorPages`.

pub mod assets;
pub mod auth;
pub mod customers;
pub mod error_pages;
pub mod gate;
pub mod session;
pub mod tickets;
pub mod users;

use poem::{Route, get, post};

use crate::errors::WebError;
use crate::types::internal::{RecordKind, RequestContext};
use crate::views::Page;

pub use error_pages::ErrorPages;

/// Every HTML route
pub fn routes() -> Route {
    Route::new()
        .at("/", get(auth::index))
        .at("/login", post(auth::login))
        .at("/logout", get(auth::logout))
        .at("/home", get(tickets::home))
        .at("/assets", get(assets::list).post(assets::search))
        .at("/assets/:id", get(assets::show).post(assets::update))
        .at("/assets/:id/delete", post(assets::delete))
        .at("/customers", get(customers::list).post(customers::search))
        .at("/customers/:id", get(customers::show).post(customers::update))
        .at("/customers/:id/delete", post(customers::delete))
        .at("/create", get(assets::create_page))
        .at("/create/asset", post(assets::create))
        .at("/create/customer", post(customers::create))
        .at("/users", get(users::list).post(users::search))
        .at("/users/create", get(users::new_form).post(users::create))
        .at("/users/:id", get(users::show).post(users::update))
        .at("/users/:id/delete", post(users::delete))
        .at("/contact", get(tickets::contact).post(tickets::create))
        .at("/user-requests", post(tickets::search))
        .at("/tickets/:id", get(tickets::show))
        .at("/tickets/:id/addNote", post(tickets::add_note))
        .at("/tickets/:id/changeDevice", post(tickets::change_device))
        .at("/tickets/:id/changeCustomer", post(tickets::change_customer))
        .at("/tickets/:id/changeUser", post(tickets::change_user))
        .at("/tickets/:id/reassign", post(tickets::reassign))
        .at("/tickets/:id/close", post(tickets::close))
        .at("/tickets/:id/delete", post(tickets::delete))
        .at("/tickets/:id/note/:note_id/delete", post(tickets::delete_note))
        .at("/error", post(tickets::report_error))
}

/// Parse a path id. Anything that is not a number is a missing record.
pub fn parse_id(raw: &str, kind: RecordKind) -> Result<i32, WebError> {
    raw.trim().parse::<i32>().map_err(|_| {
        tracing::debug!("Non-numeric {} id {:?}", kind, raw);
        WebError::not_found(kind.list_path())
    })
}

/// Page chrome for an admitted request
pub fn page<'a>(title: &'a str, ctx: &'a RequestContext, flash: &'a Option<String>) -> Page<'a> {
    Page::new(title, ctx.identity.as_ref(), flash.as_deref())
}
