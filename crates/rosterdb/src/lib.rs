//! rosterdb: a typed in-memory query engine for school and HR
//! administrative records.
//!
//! `rosterdb-core` provides the engine — values, filters, criteria
//! composition, stores, load queries, and exact-then-fuzzy resolution.
//! This crate adds the roster schema and one directory service per
//! record type.

pub mod directory;
pub mod schema;

pub use rosterdb_core::{db, error, metrics, traits, value};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        directory::{
            ClassDirectory, CourseDirectory, DepartmentDirectory, EmployeeDirectory, ScoreBook,
            StudentDirectory,
        },
        schema::{
            ClassStatus, Course, Department, Employee, Gender, SchoolClass, Score, Student,
        },
    };
    pub use rosterdb_core::prelude::*;
}
