use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::dto::{CreateWorkstationType, UpdateWorkstationType};
use crate::entity::{workstation, workstation_type};

use super::{StoreError, unique_violation};

pub async fn list(
    db: &DatabaseConnection,
    skip: u64,
    limit: u64,
) -> Result<Vec<workstation_type::Model>, StoreError> {
    Ok(workstation_type::Entity::find()
        .order_by_asc(workstation_type::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<workstation_type::Model, StoreError> {
    workstation_type::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("Workstation type"))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateWorkstationType,
) -> Result<workstation_type::Model, StoreError> {
    let txn = db.begin().await?;

    let taken = workstation_type::Entity::find()
        .filter(workstation_type::Column::TypeName.eq(&input.type_name))
        .count(&txn)
        .await?;
    if taken > 0 {
        return Err(StoreError::Conflict(
            "Workstation type name already exists".into(),
        ));
    }

    let now = Utc::now().naive_utc();
    let model = workstation_type::ActiveModel {
        type_name: Set(input.type_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "Workstation type name"))?;

    txn.commit().await?;
    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: UpdateWorkstationType,
) -> Result<workstation_type::Model, StoreError> {
    let txn = db.begin().await?;

    let model = workstation_type::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Workstation type"))?;

    let mut active: workstation_type::ActiveModel = model.clone().into();

    if let Some(type_name) = patch.type_name {
        if type_name != model.type_name {
            let taken = workstation_type::Entity::find()
                .filter(workstation_type::Column::TypeName.eq(&type_name))
                .count(&txn)
                .await?;
            if taken > 0 {
                return Err(StoreError::Conflict(
                    "Workstation type name already exists".into(),
                ));
            }
        }
        active.type_name = Set(type_name);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(&txn)
        .await
        .map_err(|e| unique_violation(e, "Workstation type name"))?;

    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let model = workstation_type::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Workstation type"))?;

    let referencing = workstation::Entity::find()
        .filter(workstation::Column::TypeId.eq(id))
        .count(&txn)
        .await?;
    if referencing > 0 {
        return Err(StoreError::Conflict(
            "Workstation type is still referenced by existing workstations".into(),
        ));
    }

    let active: workstation_type::ActiveModel = model.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
