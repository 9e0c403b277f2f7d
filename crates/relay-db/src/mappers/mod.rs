//! Entity to model mappers
//!
//! Conversions between domain entities (relay-core) and database models:
//! `From<Model> for Entity` turns rows into domain objects. Inserts bind
//! scalar values directly, so no insert structs are needed here.

mod message;
mod reaction;
