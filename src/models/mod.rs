//! Domain models stored in the graph.
//!
//! Each entity type implements [`EntitySchema`], which is all a generic
//! repository needs to store it; each edge type implements [`Relationship`].

mod author;
mod book;
mod company;
mod patch;
mod relationship;
mod schema;
mod school;
mod user;

pub use author::{Author, AuthorPatch, NewAuthor};
pub use book::{Book, BookPatch};
pub use company::{Company, CompanyPatch};
pub use patch::Patch;
pub use relationship::{AffiliatedWith, Link, Neighbors, Relationship, WrittenBy};
pub use schema::{
    Allocation, EntitySchema, KeyType, KeyValue, OptionalField, ReadDefault,
};
pub use school::{NewSchool, School, SchoolPatch};
pub use user::{NewUser, User, UserPatch};

pub(crate) use schema::to_properties;
