//! Filter predicate model
//!
//! User-authored `field / operator / value` conditions, validated against a
//! per-entity field registry and converted to and from the flat
//! `field=operator:value` form consumed by list/search endpoints.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::filter::*;
//!
//! let engine = FilterEngine::new(&registry);
//! let mut set = FilterSet::new();
//! let id = set.add_row();
//! let row = engine.select_field(set.row(&id).unwrap(), "priority")?;
//! let row = engine.select_operator(&row, "in")?;
//! let row = engine.set_value(&row, ValueInput::Text("High, Critical".into()));
//! set.replace_row(row);
//!
//! let query = engine.serialize(&set); // { priority: "in:High,Critical" }
//! ```

pub mod codec;
pub mod condition;
pub mod engine;
pub mod error;
pub mod field;
pub mod operator;
pub mod query_string;
pub mod saved;
pub mod value;

pub use codec::SerializedQuery;
pub use condition::{Combinator, FilterCondition, FilterSet};
pub use engine::FilterEngine;
pub use error::FilterError;
pub use field::{FieldDescriptor, FieldRegistry, ValueType};
pub use operator::{Arity, OperatorDescriptor};
pub use query_string::{parse_query_string, to_query_string};
pub use saved::*;
pub use value::ValueInput;
