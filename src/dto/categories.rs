use uuid::Uuid;

use crate::form::FormFields;

/// Raw category submission, untyped text straight from the form body.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub description: String,
}

impl CategoryInput {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.value("name"),
            description: fields.value("description"),
        }
    }
}

/// Sanitized category values, used to prefill the form and to redisplay a
/// rejected submission. `id` is present on update flows only.
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub description: String,
}
