use serde::Deserialize;

/// Login form posted to `/login`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
