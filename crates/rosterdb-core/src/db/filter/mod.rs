mod criteria;
mod eval;
mod expr;


pub use criteria::{Criteria, Criterion};
pub use eval::FilterProgram;
pub use expr::{Clause, Filter};

use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Cmp
///
/// Clause operators. `Contains`/`ContainsCi`/`StartsWith` apply to text
/// only; `In` expects a list on the right-hand side.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    ContainsCi,
    StartsWith,
    In,
}

impl fmt::Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Contains => "contains",
            Self::ContainsCi => "contains_ci",
            Self::StartsWith => "starts_with",
            Self::In => "in",
        };
        write!(f, "{label}")
    }
}
