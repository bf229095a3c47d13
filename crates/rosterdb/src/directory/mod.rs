//! Directory services: one per record type, each owning its store.
//!
//! Stores are constructor-injected; nothing here reaches for ambient
//! state. Search surfaces are phrased as criteria and handed to the
//! core's composer; name lookups go through the exact-then-fuzzy
//! resolution protocol and return `Resolution` values unmodified —
//! collapsing a one-element fuzzy list into an object response is a
//! presentation concern, not a directory one.

mod course;
mod department;
mod employee;
mod school_class;
mod score;
mod student;


pub use course::CourseDirectory;
pub use department::DepartmentDirectory;
pub use employee::EmployeeDirectory;
pub use school_class::ClassDirectory;
pub use score::ScoreBook;
pub use student::StudentDirectory;
