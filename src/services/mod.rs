pub mod attendees;
pub mod companies;
pub mod events;
pub mod expenses;
pub mod inventory;
pub mod purchases;
pub mod ticket_categories;
pub mod tickets;
pub mod users;
