//! External collaborator interfaces for the encore runtime.
//!
//! The routing core never talks to the datastore or the link-issuing
//! endpoint directly; it goes through the [`Store`] and [`LinkIssuer`]
//! seams defined here. Production wires in the REST-backed
//! implementations, tests wire in [`InMemoryStore`] and
//! [`StaticLinkIssuer`].

mod contact;
mod link;
mod memory;
mod rest;
mod store;

pub use contact::{
    CONFIRMED_STATUSES, Contact, ContactUpdate, EventType, ExchangeRecord, FollowUpTask,
    NewContact, TaskPriority, TaskType, normalize_phone,
};
pub use link::{HttpLinkIssuer, LinkIssuer, LinkRequest, StaticLinkIssuer};
pub use memory::InMemoryStore;
pub use rest::RestStore;
pub use store::Store;
