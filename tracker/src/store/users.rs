use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::dto::{CreateUser, UpdateUser};
use crate::entity::{department, user, workstation};

use super::{StoreError, check_iso_date, today, unique_violation};

/// Allowed range for `users.status` (0 = inactive, 1 = active, 2 = on leave).
fn check_status(status: i32) -> Result<(), StoreError> {
    if (0..=2).contains(&status) {
        Ok(())
    } else {
        Err(StoreError::Validation(format!(
            "status must be between 0 and 2, got {status}"
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
) -> Result<Vec<user::Model>, StoreError> {
    Ok(user::Entity::find()
        .order_by_asc(user::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<user::Model, StoreError> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("User"))
}

pub async fn create(db: &DatabaseConnection, input: CreateUser) -> Result<user::Model, StoreError> {
    let status = input.status.unwrap_or(1);
    check_status(status)?;
    if let Some(ref date) = input.date_of_leave {
        check_iso_date("date_of_leave", date)?;
    }

    let txn = db.begin().await?;

    check_department(&txn, input.department_id).await?;

    let taken = user::Entity::find()
        .filter(user::Column::DistinguishedName.eq(&input.distinguished_name))
        .count(&txn)
        .await?;
    if taken > 0 {
        return Err(StoreError::Conflict(
            "User distinguished name already exists".into(),
        ));
    }

    let now = Utc::now().naive_utc();
    let model = user::ActiveModel {
        distinguished_name: Set(input.distinguished_name),
        name: Set(input.name),
        department_id: Set(input.department_id),
        notes: Set(input.notes),
        status: Set(status),
        office_location: Set(input.office_location),
        date_of_arrival: Set(Some(input.date_of_arrival.unwrap_or_else(today))),
        date_of_leave: Set(input.date_of_leave),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "User distinguished name"))?;

    txn.commit().await?;
    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: UpdateUser,
) -> Result<user::Model, StoreError> {
    if let Some(status) = patch.status {
        check_status(status)?;
    }
    if let Some(ref date) = patch.date_of_leave {
        check_iso_date("date_of_leave", date)?;
    }

    let txn = db.begin().await?;

    let model = user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("User"))?;

    let mut active: user::ActiveModel = model.into();

    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(department_id) = patch.department_id {
        check_department(&txn, department_id).await?;
        active.department_id = Set(department_id);
    }
    if let Some(notes) = patch.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(office_location) = patch.office_location {
        active.office_location = Set(Some(office_location));
    }
    if let Some(date_of_leave) = patch.date_of_leave {
        active.date_of_leave = Set(Some(date_of_leave));
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&txn).await?;

    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let model = user::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("User"))?;

    let workstations = workstation::Entity::find()
        .filter(workstation::Column::UserId.eq(id))
        .count(&txn)
        .await?;
    if workstations > 0 {
        return Err(StoreError::Conflict(
            "User is still referenced by existing workstations".into(),
        ));
    }

    let active: user::ActiveModel = model.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
