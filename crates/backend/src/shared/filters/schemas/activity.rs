use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const ACTIVITY_SCHEMA: EntitySchema = EntitySchema {
    id: "activity",
    name: "Activities",
    table_name: "crm_activities",
    fields: &[
        FilterFieldDef::new("subject", "Subject", ValueType::String, "subject"),
        FilterFieldDef::enumeration(
            "type",
            "Type",
            &["Call", "Email", "Meeting", "Task", "Note"],
            "activity_type",
        ),
        FilterFieldDef::enumeration(
            "status",
            "Status",
            &["Planned", "Completed", "Cancelled"],
            "status",
        ),
        FilterFieldDef::new("participants", "Participants", ValueType::StringArray, "participants_json"),
        FilterFieldDef::new("durationMinutes", "Duration, min", ValueType::Number, "duration_minutes"),
        FilterFieldDef::new("dueDate", "Due date", ValueType::Date, "due_date"),
        FilterFieldDef::new("completed", "Completed", ValueType::Boolean, "is_completed"),
    ],
};
