use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const LEAD_SCHEMA: EntitySchema = EntitySchema {
    id: "lead",
    name: "Leads",
    table_name: "crm_leads",
    fields: &[
        FilterFieldDef::new("name", "Name", ValueType::String, "name"),
        FilterFieldDef::new("email", "Email", ValueType::String, "email"),
        FilterFieldDef::new("company", "Company", ValueType::String, "company"),
        FilterFieldDef::enumeration(
            "source",
            "Source",
            &["Website", "Referral", "Campaign", "Cold Call", "Event"],
            "source",
        ),
        FilterFieldDef::enumeration(
            "status",
            "Status",
            &["New", "Contacted", "Qualified", "Unqualified", "Converted"],
            "status",
        ),
        FilterFieldDef::new("score", "Score", ValueType::Number, "score"),
        FilterFieldDef::new("tags", "Tags", ValueType::StringArray, "tags_json"),
        FilterFieldDef::new("createdAt", "Created", ValueType::Date, "created_at"),
    ],
};
