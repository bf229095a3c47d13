pub mod filter;
pub mod query;
pub mod resolve;
pub mod response;
pub mod store;

pub use filter::{Clause, Cmp, Criteria, Criterion, Filter, FilterProgram};
pub use query::{Direction, LoadQuery};
pub use resolve::{Resolution, resolve};
pub use response::{Response, ResponseError};
pub use store::{Key, Store};
