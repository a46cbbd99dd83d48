//! User directory: the single place where authenticated identities and their
//! provider credentials are persisted.
//!
//! Every lookup returns the first matching record in insertion order. The
//! directory never checks uniqueness, so the same `name` may be stored more
//! than once.

use sea_orm::{DatabaseConnection, QueryFilter, QueryOrder, prelude::*};

pub use error::DirectoryError;
pub use filter::{Identity, UserFilter};
pub use login::Login;
pub use users::Model as User;

mod error;
mod filter;
mod login;
pub mod users;

type ResultDirectory<T> = Result<T, DirectoryError>;

#[derive(Debug, Clone)]
pub struct UserDirectory {
    database: DatabaseConnection,
}

impl UserDirectory {
    /// Return a builder for `UserDirectory`. Help to build the struct.
    pub fn builder() -> UserDirectoryBuilder {
        UserDirectoryBuilder::default()
    }

    /// Looks for the first user matching `criteria`, creating one from the
    /// same fields when nothing matches.
    ///
    /// The returned flag is `true` only when a new record was inserted. The
    /// find and the insert are two separate statements.
    pub async fn find_or_create(&self, criteria: UserFilter) -> ResultDirectory<(User, bool)> {
        if let Some(user) = self.find_one(&criteria).await? {
            tracing::debug!(seq = user.seq, "user found");
            return Ok((user, false));
        }

        let user = criteria.into_row().insert(&self.database).await?;
        tracing::debug!(seq = user.seq, name = %user.name, "user created");
        Ok((user, true))
    }

    /// First user matching `filter`, `None` when nothing matches.
    pub async fn find_one(&self, filter: &UserFilter) -> ResultDirectory<Option<User>> {
        Ok(users::Entity::find()
            .filter(filter.condition())
            .order_by_asc(users::Column::Seq)
            .one(&self.database)
            .await?)
    }

    pub async fn find_by_name(&self, name: &str) -> ResultDirectory<Option<User>> {
        self.find_one(&UserFilter::by_name(name)).await
    }

    /// Every stored user, oldest first.
    pub async fn list(&self) -> ResultDirectory<Vec<User>> {
        Ok(users::Entity::find()
            .order_by_asc(users::Column::Seq)
            .all(&self.database)
            .await?)
    }

    /// Close the underlying connection pool.
    pub async fn close(self) -> ResultDirectory<()> {
        self.database.close().await?;
        Ok(())
    }
}

/// The builder for `UserDirectory`
#[derive(Debug, Default)]
pub struct UserDirectoryBuilder {
    database: DatabaseConnection,
}

impl UserDirectoryBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> UserDirectoryBuilder {
        self.database = db;
        self
    }

    /// Construct `UserDirectory`
    pub fn build(self) -> UserDirectory {
        UserDirectory {
            database: self.database,
        }
    }
}
