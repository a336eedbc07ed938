use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenRole {
    Admin,
    Employee,
}

/// Bearer-token claims. Admin tokens carry `userId`/`email`, employee tokens
/// carry `employeeId`/`idNo`; the `role` tag decides which set is read.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub role: TokenRole,
    pub exp: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_no: Option<String>,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_admin_token(user_id: i64, email: String, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        role: TokenRole::Admin,
        exp: now() + ttl,
        user_id: Some(user_id),
        email: Some(email),
        employee_id: None,
        id_no: None,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_employee_token(employee_id: i64, id_no: String, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        role: TokenRole::Employee,
        exp: now() + ttl,
        user_id: None,
        email: None,
        employee_id: Some(employee_id),
        id_no: Some(id_no),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
