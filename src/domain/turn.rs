use super::TenantId;

/// One user message to be answered: who asked, what, and under which persona.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub tenant_id: TenantId,
    pub query: String,
    pub system_prompt: String,
}

impl Turn {
    pub fn new(
        tenant_id: TenantId,
        query: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            query: query.into(),
            system_prompt: system_prompt.into(),
        }
    }
}
