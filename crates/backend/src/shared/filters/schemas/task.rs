use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const TASK_TABLE_NAME: &str = "pm_tasks";

pub const TASK_PRIORITIES: &[&str] = &["Low", "Medium", "High", "Critical"];

pub const TASK_SCHEMA: EntitySchema = EntitySchema {
    id: "task",
    name: "Tasks",
    table_name: TASK_TABLE_NAME,
    fields: &[
        FilterFieldDef::new("title", "Title", ValueType::String, "title"),
        FilterFieldDef::new("description", "Description", ValueType::String, "description"),
        FilterFieldDef::new("status.statusName", "Status", ValueType::String, "status_name"),
        FilterFieldDef::enumeration("priority", "Priority", TASK_PRIORITIES, "priority"),
        FilterFieldDef::new("project.name", "Project", ValueType::String, "project_name"),
        FilterFieldDef::new("assignees", "Assignees", ValueType::StringArray, "assignees_json"),
        FilterFieldDef::new("tags", "Tags", ValueType::StringArray, "tags_json"),
        FilterFieldDef::new("estimateHours", "Estimate, h", ValueType::Number, "estimate_hours"),
        FilterFieldDef::new("startDate", "Start date", ValueType::Date, "start_date"),
        FilterFieldDef::new("dueDate", "Due date", ValueType::Date, "due_date"),
        FilterFieldDef::new("billable", "Billable", ValueType::Boolean, "is_billable"),
    ],
};
