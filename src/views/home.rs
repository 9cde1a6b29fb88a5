use poem::web::Html;

use crate::coordinators::TicketListing;

use super::{Page, render, tickets::ticket_table};

/// New requests nobody has picked up
pub fn home_page(page: &Page<'_>, listing: &TicketListing) -> Html<String> {
    let mut body = String::from("<h2>Waiting for pickup</h2>");
    body.push_str(&ticket_table(&listing.tickets, &listing.labels, page.is_staff()));
    render(page, &body)
}
