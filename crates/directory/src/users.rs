//! Users table (minimal entity).
//!
//! `name` is the lookup key but it is not unique: a user logging in again with
//! a fresh token ends up with one more row. `seq` is owned by the storage and
//! gives the insertion order every lookup relies on.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seq: i32,
    pub name: String,
    /// External identifier assigned by the provider.
    pub id: String,
    pub access_token: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
