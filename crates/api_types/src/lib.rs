use serde::{Deserialize, Serialize};

/// OAuth providers a user can log in with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Instagram,
    Facebook,
}

impl ProviderKind {
    /// Returns the canonical name used in routes, cookies and settings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Self::Instagram),
            "facebook" => Ok(Self::Facebook),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

pub mod user {
    use super::*;

    /// The user bound to the current session.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SessionUser {
        pub provider: ProviderKind,
        pub username: String,
    }

    /// Landing page: who is logged in and where one can log in.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Home {
        pub user: Option<SessionUser>,
        pub providers: Vec<ProviderKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginPage {
        pub provider: ProviderKind,
        /// Path that starts the OAuth handshake.
        pub login_url: String,
        pub user: Option<SessionUser>,
    }

    /// Stored account as seen by the logged-in user. The token is never exposed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Account {
        pub provider: ProviderKind,
        pub name: String,
        pub id: String,
    }
}

pub mod photo {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Photo {
        pub url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub caption: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PhotoList {
        pub provider: ProviderKind,
        pub user: String,
        pub photos: Vec<Photo>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::Instagram).unwrap(),
            "\"instagram\""
        );
        assert_eq!("facebook".parse::<ProviderKind>(), Ok(ProviderKind::Facebook));
        assert!("myspace".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn photo_without_caption_omits_the_field() {
        let photo = photo::Photo {
            url: "https://example.com/a.jpg".to_string(),
            caption: None,
        };
        assert_eq!(
            serde_json::to_string(&photo).unwrap(),
            r#"{"url":"https://example.com/a.jpg"}"#
        );
    }
}
