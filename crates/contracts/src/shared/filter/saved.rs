//! DTOs for saved filters and the filter HTTP API

use serde::{Deserialize, Serialize};

use super::codec::SerializedQuery;
use super::condition::{Combinator, FilterSet};
use super::field::FieldDescriptor;
use super::operator::OperatorInfo;

/// Saved filter as stored: the serialized form, hydrated on load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFilter {
    /// Unique identifier (UUID)
    pub id: String,
    /// User-defined name
    pub name: String,
    /// Entity the filter applies to (e.g. "task")
    pub entity: String,
    /// Serialized conditions
    pub query: SerializedQuery,
    #[serde(default)]
    pub combinator: Combinator,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

/// Saved filter summary for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFilterSummary {
    pub id: String,
    pub name: String,
    pub entity: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Saved filter with its conditions hydrated against the entity's current fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedFilter {
    pub saved: SavedFilter,
    pub filter_set: FilterSet,
}

/// Request to save a filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFilterRequest {
    pub name: String,
    pub entity: String,
    pub filter_set: FilterSet,
}

/// Request to update a saved filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFilterRequest {
    pub name: String,
    pub filter_set: FilterSet,
}

/// Response for save/update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFilterResponse {
    pub id: String,
    pub message: String,
}

/// Response for list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSavedFiltersResponse {
    pub filters: Vec<SavedFilterSummary>,
}

/// Response for delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFilterResponse {
    pub success: bool,
}

/// Entity available for filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterEntityInfo {
    pub id: String,
    pub name: String,
    pub field_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFilterEntitiesResponse {
    pub entities: Vec<FilterEntityInfo>,
}

/// Field together with the operators the editor should offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterFieldInfo {
    #[serde(flatten)]
    pub field: FieldDescriptor,
    pub operators: Vec<OperatorInfo>,
}

impl From<&FieldDescriptor> for FilterFieldInfo {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            field: field.clone(),
            operators: field.operators().iter().map(OperatorInfo::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetFilterFieldsResponse {
    pub entity: String,
    pub fields: Vec<FilterFieldInfo>,
}

/// Serialized form of a filter set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializeFilterResponse {
    pub query: SerializedQuery,
    pub query_string: String,
}

/// SQL translation of a filter set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSqlResponse {
    /// WHERE clause body without the keyword; empty = no filter
    pub sql: String,
    pub params: Vec<String>,
}
