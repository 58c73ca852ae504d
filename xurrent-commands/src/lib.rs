//! A typed command surface over the Xurrent GraphQL API.
//!
//! Every entity operation is one command type following the same template:
//! mandatory attributes are constructor arguments, optional attributes are
//! chainable setters, and `execute` resolves a client from the registry and
//! dispatches. A setter both stores the value and marks the field as set,
//! so attributes that were never touched stay out of the transmitted
//! payload entirely.
//!
//! ```ignore
//! use xurrent_commands::team::{CreateTeam, TeamField, TeamQuery};
//! use xurrent_commands::invoke::InvokeQuery;
//!
//! let team = CreateTeam::new("Service Desk")
//!     .description("First line support")
//!     .execute(&registry)
//!     .await?;
//!
//! let query = TeamQuery::new(vec![TeamField::Id, TeamField::Name])
//!     .items_per_request(50)
//!     .build()?;
//! let teams = InvokeQuery::new(query).execute(&registry).await?;
//! ```
//!
//! Commands come in four shapes:
//!
//! * `Create*` / `Update*` / `Delete*` - build a mutation input from the
//!   explicitly set attributes and dispatch it.
//! * `*Query` - build a [`Query`](../xurrent_graphql/query/struct.Query.html)
//!   from bound parameters; execution is a separate step.
//! * `*Filter` - build one filter condition for later inclusion in a query.
//! * [`InvokeQuery`](./invoke/struct.InvokeQuery.html) - execute a built
//!   query and yield the records it matches.
//!
//! Failures of any kind surface as a
//! [`CommandError`](./struct.CommandError.html) naming the command; a failed
//! command produces no output.

#[macro_use]
extern crate serde;

mod entity_query;
mod error;
pub mod filter;
pub mod invoke;

pub mod calendar;
pub mod configuration_item;
pub mod event;
pub mod person;
pub mod problem;
pub mod request;
pub mod risk;
pub mod service;
pub mod team;
pub mod trash;
pub mod webhook;

pub use error::CommandError;
pub use filter::FilterBuilder;
pub use invoke::{InvokeQuery, Queryable};

/// The payload returned by delete mutations.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Deleted {
    pub success: bool
}
