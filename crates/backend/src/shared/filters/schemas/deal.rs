use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const DEAL_STAGES: &[&str] = &[
    "Prospecting",
    "Qualification",
    "Proposal",
    "Negotiation",
    "Won",
    "Lost",
];

pub const DEAL_SCHEMA: EntitySchema = EntitySchema {
    id: "deal",
    name: "Deals",
    table_name: "crm_deals",
    fields: &[
        FilterFieldDef::new("title", "Title", ValueType::String, "title"),
        FilterFieldDef::enumeration("stage", "Stage", DEAL_STAGES, "stage"),
        FilterFieldDef::new("amount", "Amount", ValueType::Number, "amount"),
        FilterFieldDef::new("probability", "Probability, %", ValueType::Number, "probability"),
        FilterFieldDef::new("owner.name", "Owner", ValueType::String, "owner_name"),
        FilterFieldDef::new("contact.name", "Contact", ValueType::String, "contact_name"),
        FilterFieldDef::new("tags", "Tags", ValueType::StringArray, "tags_json"),
        FilterFieldDef::new(
            "expectedCloseDate",
            "Expected close",
            ValueType::Date,
            "expected_close_date",
        ),
    ],
};
