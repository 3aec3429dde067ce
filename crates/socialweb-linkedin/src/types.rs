use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// OpenID Connect `userinfo` claims as LinkedIn sends them.
#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    pub sub: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub picture: Option<String>,
    /// Either a plain tag or `{"country": "US", "language": "en"}`.
    pub locale: Option<serde_json::Value>,
}

/// Member profile returned by `/api/linkedin/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedinProfile {
    pub id: String,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
    pub picture: Option<String>,
    pub locale: Option<String>,
}

fn locale_tag(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(tag) => Some(tag),
        serde_json::Value::Object(map) => {
            let language = map.get("language").and_then(serde_json::Value::as_str)?;
            match map.get("country").and_then(serde_json::Value::as_str) {
                Some(country) => Some(format!("{language}_{country}")),
                None => Some(language.to_owned()),
            }
        }
        _ => None,
    }
}

impl From<UserInfo> for LinkedinProfile {
    fn from(raw: UserInfo) -> Self {
        Self {
            id: raw.sub,
            name: raw.name,
            given_name: raw.given_name,
            family_name: raw.family_name,
            email: raw.email,
            email_verified: raw.email_verified,
            picture: raw.picture,
            locale: raw.locale.and_then(locale_tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_accepts_both_shapes() {
        assert_eq!(
            locale_tag(serde_json::json!({"country": "AR", "language": "es"})).as_deref(),
            Some("es_AR")
        );
        assert_eq!(locale_tag(serde_json::json!("en-US")).as_deref(), Some("en-US"));
        assert_eq!(locale_tag(serde_json::json!({"country": "AR"})), None);
    }

    #[test]
    fn sub_becomes_id() {
        let raw: UserInfo = serde_json::from_value(serde_json::json!({
            "sub": "782bbtaQ",
            "name": "Lucía Pérez",
            "email_verified": true
        }))
        .unwrap();
        let profile = LinkedinProfile::from(raw);
        assert_eq!(profile.id, "782bbtaQ");
        assert_eq!(profile.name.as_deref(), Some("Lucía Pérez"));
        assert_eq!(profile.email_verified, Some(true));
        assert!(profile.email.is_none());
    }
}
