//! Data access layer for graph operations.
//!
//! Repositories are resolved from the [`Context`](crate::context::Context)
//! with the `FromContext` derive and talk to the store only through
//! [`Graph`](crate::graph::Graph).

mod allocator;
mod entity;
mod linker;
mod schema;

pub use allocator::{IdAllocator, IdStrategy, Reservation};
pub use entity::EntityRepository;
pub use linker::RelationshipLinker;
pub use schema::SchemaRepository;

use crate::models::{AffiliatedWith, Author, Book, Company, School, User, WrittenBy};

pub type CompanyRepository = EntityRepository<Company>;
pub type UserRepository = EntityRepository<User>;
pub type AuthorRepository = EntityRepository<Author>;
pub type BookRepository = EntityRepository<Book>;
pub type SchoolRepository = EntityRepository<School>;

pub type BookAuthorLinker = RelationshipLinker<WrittenBy>;
pub type AuthorSchoolLinker = RelationshipLinker<AffiliatedWith>;
