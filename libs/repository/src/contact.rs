use chrono::Utc;
use sea_orm::{
    strum::IntoEnumIterator as _, ActiveModelTrait, ActiveValue,
    DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder,
};
use strum::IntoEnumIterator as _;

use crate::active_models::{prelude::*, *};
use crate::post::impl_from;
use entity::prelude::*;

use self::sea_orm_active_enums::ContactStatus;

#[derive(Clone, Debug)]
pub struct ContactRepository {
    db: DatabaseConnection,
}

impl ContactRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<contact::Model> for ContactEntity {
    fn from(value: contact::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            status: value.status.into(),
            created_at: value.created_at.and_utc(),
        }
    }
}

impl From<NewContact> for contact::ActiveModel {
    fn from(value: NewContact) -> Self {
        Self {
            id: ActiveValue::NotSet,
            name: ActiveValue::set(value.name),
            email: ActiveValue::set(value.email),
            subject: ActiveValue::set(value.subject),
            message: ActiveValue::set(value.message),
            status: ActiveValue::set(ContactStatus::Unread),
            created_at: ActiveValue::set(Utc::now().naive_utc()),
        }
    }
}

impl ContactRepository {
    pub async fn find_all(&self) -> anyhow::Result<Vec<ContactEntity>> {
        let contacts = Contact::find()
            .order_by_desc(contact::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(contacts.into_iter().map(ContactEntity::from).collect())
    }

    pub async fn create(
        &self,
        contact: NewContact,
    ) -> anyhow::Result<ContactEntity> {
        let model =
            contact::ActiveModel::from(contact).insert(&self.db).await?;

        Ok(model.into())
    }

    pub async fn mark_read(
        &self,
        id: i32,
    ) -> anyhow::Result<Option<ContactEntity>> {
        let Some(model) = Contact::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut model = model.into_active_model();
        model.status = ActiveValue::set(ContactStatus::Read);

        let model = model.update(&self.db).await?;

        Ok(Some(model.into()))
    }

    pub async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let result = Contact::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

impl_from!(
    entity::contact::ContactStatus,
    sea_orm_active_enums::ContactStatus
);
