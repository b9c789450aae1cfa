use contracts::shared::filter::ValueType;

use super::{EntitySchema, FilterFieldDef};

pub const CONTACT_SCHEMA: EntitySchema = EntitySchema {
    id: "contact",
    name: "Contacts",
    table_name: "crm_contacts",
    fields: &[
        FilterFieldDef::new("firstName", "First name", ValueType::String, "first_name"),
        FilterFieldDef::new("lastName", "Last name", ValueType::String, "last_name"),
        FilterFieldDef::new("email", "Email", ValueType::String, "email"),
        FilterFieldDef::new("phone", "Phone", ValueType::String, "phone"),
        FilterFieldDef::new("company.name", "Company", ValueType::String, "company_name"),
        FilterFieldDef::new("city", "City", ValueType::String, "city"),
        FilterFieldDef::new("tags", "Tags", ValueType::StringArray, "tags_json"),
        FilterFieldDef::new("createdAt", "Created", ValueType::Date, "created_at"),
        FilterFieldDef::new("subscribed", "Subscribed", ValueType::Boolean, "is_subscribed"),
    ],
};
