use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const PROJECT_SCHEMA: EntitySchema = EntitySchema {
    id: "project",
    name: "Projects",
    table_name: "pm_projects",
    fields: &[
        FilterFieldDef::new("name", "Name", ValueType::String, "name"),
        FilterFieldDef::new("code", "Code", ValueType::String, "code"),
        FilterFieldDef::enumeration(
            "status",
            "Status",
            &["Planned", "Active", "On Hold", "Completed", "Cancelled"],
            "status",
        ),
        FilterFieldDef::new("client.name", "Client", ValueType::String, "client_name"),
        FilterFieldDef::new("members", "Members", ValueType::StringArray, "members_json"),
        FilterFieldDef::new("budget", "Budget", ValueType::Number, "budget"),
        FilterFieldDef::new("startDate", "Start date", ValueType::Date, "start_date"),
        FilterFieldDef::new("endDate", "End date", ValueType::Date, "end_date"),
        FilterFieldDef::new("archived", "Archived", ValueType::Boolean, "is_archived"),
    ],
};
