use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::dto::{CreateWorkstation, UpdateWorkstation};
use crate::entity::{department, user, workstation, workstation_type};

use super::{StoreError, today, unique_violation};

async fn check_type<C: ConnectionTrait>(conn: &C, type_id: i32) -> Result<(), StoreError> {
    let exists = workstation_type::Entity::find_by_id(type_id)
        .one(conn)
        .await?
        .is_some();
    if exists {
        Ok(())
    } else {
        Err(StoreError::MissingReference(format!(
            "Workstation type {type_id} does not exist"
        )))
    }
}

async fn check_user<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<(), StoreError> {
    let exists = user::Entity::find_by_id(user_id).one(conn).await?.is_some();
    if exists {
        Ok(())
    } else {
        Err(StoreError::MissingReference(format!(
            "User {user_id} does not exist"
        )))
    }
}

async fn check_department<C: ConnectionTrait>(
    conn: &C,
    department_id: i32,
) -> Result<(), StoreError> {
    let exists = department::Entity::find_by_id(department_id)
        .one(conn)
        .await?
        .is_some();
    if exists {
        Ok(())
    } else {
        Err(StoreError::MissingReference(format!(
            "Department {department_id} does not exist"
        )))
    }
}

pub async fn list(
    db: &DatabaseConnection,
    skip: u64,
    limit: u64,
) -> Result<Vec<workstation::Model>, StoreError> {
    Ok(workstation::Entity::find()
        .order_by_asc(workstation::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<workstation::Model, StoreError> {
    workstation::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("Workstation"))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateWorkstation,
) -> Result<workstation::Model, StoreError> {
    let txn = db.begin().await?;

    check_type(&txn, input.type_id).await?;
    check_user(&txn, input.user_id).await?;
    check_department(&txn, input.department_id).await?;

    let taken = workstation::Entity::find()
        .filter(workstation::Column::Hostname.eq(&input.hostname))
        .count(&txn)
        .await?;
    if taken > 0 {
        return Err(StoreError::Conflict(
            "Workstation hostname already exists".into(),
        ));
    }

    let now = Utc::now().naive_utc();
    let model = workstation::ActiveModel {
        hostname: Set(input.hostname),
        type_id: Set(input.type_id),
        user_id: Set(input.user_id),
        department_id: Set(input.department_id),
        date_of_arrival: Set(Some(input.date_of_arrival.unwrap_or_else(today))),
        video_ram_gb: Set(input.video_ram_gb),
        system_ram_gb: Set(input.system_ram_gb),
        total_storage_tb: Set(input.total_storage_tb),
        hardware_description: Set(input.hardware_description),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "Workstation hostname"))?;

    txn.commit().await?;
    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: UpdateWorkstation,
) -> Result<workstation::Model, StoreError> {
    let txn = db.begin().await?;

    let model = workstation::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Workstation"))?;

    let mut active: workstation::ActiveModel = model.into();

    if let Some(type_id) = patch.type_id {
        check_type(&txn, type_id).await?;
        active.type_id = Set(type_id);
    }
    if let Some(user_id) = patch.user_id {
        check_user(&txn, user_id).await?;
        active.user_id = Set(user_id);
    }
    if let Some(department_id) = patch.department_id {
        check_department(&txn, department_id).await?;
        active.department_id = Set(department_id);
    }
    if let Some(date_of_arrival) = patch.date_of_arrival {
        active.date_of_arrival = Set(Some(date_of_arrival));
    }
    if let Some(video_ram_gb) = patch.video_ram_gb {
        active.video_ram_gb = Set(Some(video_ram_gb));
    }
    if let Some(system_ram_gb) = patch.system_ram_gb {
        active.system_ram_gb = Set(Some(system_ram_gb));
    }
    if let Some(total_storage_tb) = patch.total_storage_tb {
        active.total_storage_tb = Set(Some(total_storage_tb));
    }
    if let Some(hardware_description) = patch.hardware_description {
        active.hardware_description = Set(Some(hardware_description));
    }
    if let Some(notes) = patch.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let model = workstation::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Workstation"))?;

    // Nothing references workstations; existence is the only gate.
    let active: workstation::ActiveModel = model.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
