//! Nurse account model

use super::ids::UserId;
use crate::config::SecretString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Bedside nurse
    #[default]
    Nurse,
    /// Charge nurse for the unit
    ChargeNurse,
}

impl Role {
    /// Every accepted role, in wire form
    pub const VALUES: [&'static str; 2] = ["nurse", "charge_nurse"];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Nurse => "nurse",
            Role::ChargeNurse => "charge_nurse",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nurse" => Ok(Role::Nurse),
            "charge_nurse" => Ok(Role::ChargeNurse),
            other => Err(format!(
                "role must be one of: {} (got '{other}')",
                Role::VALUES.join(", ")
            )),
        }
    }
}

/// Stored user record
///
/// Holds the argon2 password hash, so it is deliberately not `Serialize`.
/// Use [`User::profile`] for anything that leaves the process.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Trimmed and lowercased
    pub email: String,
    /// PHC-format argon2 hash
    pub password_hash: String,
    pub role: Role,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public view of the account without credentials
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            department: self.department.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload
///
/// Every field is optional at the wire level so that a missing field surfaces as a
/// validation message rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}
