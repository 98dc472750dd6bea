use engine::resolver::SessionContext;
use serde::Deserialize;

/// `[session]` section: who the client runs as
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SessionSettings {
    user_id: Option<String>,
    org_id: Option<String>,
    is_admin: Option<bool>,
}

impl SessionSettings {
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn org_id(&self) -> Option<&str> {
        self.org_id.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin.unwrap_or(false)
    }

    pub fn to_context(&self) -> SessionContext {
        SessionContext {
            user_id: self.user_id.clone(),
            org_id: self.org_id.clone(),
            is_admin: self.is_admin(),
        }
    }
}
