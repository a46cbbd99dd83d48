use sea_orm::{ActiveValue, ColumnTrait, Condition};

use crate::users;

/// Criteria used to look up users.
///
/// Every field left to `None` matches anything, so [`UserFilter::default`]
/// is the empty filter and matches every record in the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub id: Option<String>,
    pub access_token: Option<String>,
}

impl UserFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub(crate) fn condition(&self) -> Condition {
        Condition::all()
            .add_option(self.name.as_deref().map(|v| users::Column::Name.eq(v)))
            .add_option(self.id.as_deref().map(|v| users::Column::Id.eq(v)))
            .add_option(
                self.access_token
                    .as_deref()
                    .map(|v| users::Column::AccessToken.eq(v)),
            )
    }

    /// Builds the row to insert when nothing matched.
    ///
    /// Missing fields stay `NotSet`; the storage decides what to do with them.
    pub(crate) fn into_row(self) -> users::ActiveModel {
        fn set(value: Option<String>) -> ActiveValue<String> {
            match value {
                Some(value) => ActiveValue::Set(value),
                None => ActiveValue::NotSet,
            }
        }

        users::ActiveModel {
            seq: ActiveValue::NotSet,
            name: set(self.name),
            id: set(self.id),
            access_token: set(self.access_token),
        }
    }
}

/// Identity asserted by an OAuth provider after a successful handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub id: String,
    pub access_token: String,
}

impl From<Identity> for UserFilter {
    fn from(value: Identity) -> Self {
        Self {
            name: Some(value.name),
            id: Some(value.id),
            access_token: Some(value.access_token),
        }
    }
}

impl From<&Identity> for UserFilter {
    fn from(value: &Identity) -> Self {
        value.clone().into()
    }
}
