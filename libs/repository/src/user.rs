use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter,
};

use crate::active_models::{prelude::*, *};
use entity::prelude::*;

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<user::Model> for UserEntity {
    fn from(value: user::Model) -> Self {
        Self {
            id: value.id,
            username: value.username,
            password: value.password,
        }
    }
}

impl UserRepository {
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> anyhow::Result<Option<UserEntity>> {
        let user = User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(user.map(UserEntity::from))
    }

    pub async fn create(&self, user: NewUser) -> anyhow::Result<UserEntity> {
        let model = user::ActiveModel {
            id: ActiveValue::NotSet,
            username: ActiveValue::set(user.username),
            password: ActiveValue::set(user.password),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }
}
