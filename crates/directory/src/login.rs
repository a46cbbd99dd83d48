//! Recording of a successful provider login.

use crate::{Identity, ResultDirectory, User, UserDirectory, UserFilter};

/// Outcome of [`UserDirectory::record_login`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Login {
    /// Whether the creating call inserted a new record.
    pub created: bool,
    /// Record returned by the follow-up fetch.
    ///
    /// The fetch runs with the empty filter, so this is the first record of the
    /// store and not necessarily the one that belongs to the identity.
    pub user: User,
}

impl Login {
    /// `true` when the fetched record belongs to someone else.
    pub fn is_ambiguous(&self, identity: &Identity) -> bool {
        self.user.name != identity.name
    }
}

impl UserDirectory {
    /// Stores the identity of a freshly authenticated user, then fetches the
    /// record the login flow keeps working with.
    ///
    /// The fetch only starts once the creating call has completed. It uses the
    /// empty filter, which matches every record and returns the oldest one.
    pub async fn record_login(&self, identity: &Identity) -> ResultDirectory<Login> {
        let (_, created) = self.find_or_create(identity.into()).await?;
        let (user, _) = self.find_or_create(UserFilter::default()).await?;

        let login = Login { created, user };
        if login.is_ambiguous(identity) {
            tracing::warn!(
                name = %identity.name,
                fetched = %login.user.name,
                "empty-filter fetch returned another user's record"
            );
        }

        Ok(login)
    }
}
