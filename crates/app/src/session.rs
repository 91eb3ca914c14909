//! Session placeholder.
//!
//! Role state is carried but never enforced: no operation consults it. It
//! exists so a future sign-in screen has somewhere to put its answer without
//! reshaping the manager.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
    role: Option<Role>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user: impl Into<String>, role: Role) {
        self.user = Some(user.into());
        self.role = Some(role);
    }

    pub fn sign_out(&mut self) {
        *self = Self::anonymous();
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}
