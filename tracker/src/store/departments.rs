use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::dto::{CreateDepartment, UpdateDepartment};
use crate::entity::{department, user, workstation};

use super::{StoreError, unique_violation};

pub async fn list(
    db: &DatabaseConnection,
    skip: u64,
    limit: u64,
) -> Result<Vec<department::Model>, StoreError> {
    Ok(department::Entity::find()
        .order_by_asc(department::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<department::Model, StoreError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound("Department"))
}

pub async fn create(
    db: &DatabaseConnection,
    input: CreateDepartment,
) -> Result<department::Model, StoreError> {
    let txn = db.begin().await?;

    let taken = department::Entity::find()
        .filter(department::Column::Name.eq(&input.name))
        .count(&txn)
        .await?;
    if taken > 0 {
        return Err(StoreError::Conflict("Department name already exists".into()));
    }

    let now = Utc::now().naive_utc();
    let model = department::ActiveModel {
        name: Set(input.name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "Department name"))?;

    txn.commit().await?;
    Ok(model)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    patch: UpdateDepartment,
) -> Result<department::Model, StoreError> {
    let txn = db.begin().await?;

    let model = department::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Department"))?;

    let mut active: department::ActiveModel = model.clone().into();

    if let Some(name) = patch.name {
        if name != model.name {
            let taken = department::Entity::find()
                .filter(department::Column::Name.eq(&name))
                .count(&txn)
                .await?;
            if taken > 0 {
                return Err(StoreError::Conflict("Department name already exists".into()));
            }
        }
        active.name = Set(name);
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active
        .update(&txn)
        .await
        .map_err(|e| unique_violation(e, "Department name"))?;

    txn.commit().await?;
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let txn = db.begin().await?;

    let model = department::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(StoreError::NotFound("Department"))?;

    let users = user::Entity::find()
        .filter(user::Column::DepartmentId.eq(id))
        .count(&txn)
        .await?;
    let workstations = workstation::Entity::find()
        .filter(workstation::Column::DepartmentId.eq(id))
        .count(&txn)
        .await?;
    if users + workstations > 0 {
        return Err(StoreError::Conflict(
            "Department is still referenced by existing users or workstations".into(),
        ));
    }

    let active: department::ActiveModel = model.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::CreateUser;
    use crate::store::users;
    use migration::MigratorTrait as _;
    use sea_orm::Database;

    async fn setup_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn user_in(department_id: i32, dn: &str) -> CreateUser {
        CreateUser {
            distinguished_name: dn.to_string(),
            name: "Alice".to_string(),
            department_id,
            notes: None,
            status: Some(1),
            office_location: None,
            date_of_arrival: None,
            date_of_leave: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_fresh_id_and_row_is_retrievable() {
        let db = setup_db().await;

        let created = create(&db, CreateDepartment { name: "IT".into() })
            .await
            .unwrap();
        let fetched = get(&db, created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "IT");
    }

    #[tokio::test]
    async fn duplicate_name_rejected() {
        let db = setup_db().await;

        create(&db, CreateDepartment { name: "Engineering".into() })
            .await
            .unwrap();
        let err = create(&db, CreateDepartment { name: "Engineering".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let db = setup_db().await;

        assert!(matches!(
            get(&db, 42).await.unwrap_err(),
            StoreError::NotFound("Department")
        ));
    }

    #[tokio::test]
    async fn empty_patch_changes_nothing() {
        let db = setup_db().await;

        let created = create(&db, CreateDepartment { name: "IT".into() })
            .await
            .unwrap();
        let updated = update(&db, created.id, UpdateDepartment::default())
            .await
            .unwrap();

        assert_eq!(updated.name, "IT");
    }

    #[tokio::test]
    async fn rename_to_taken_name_rejected() {
        let db = setup_db().await;

        create(&db, CreateDepartment { name: "IT".into() }).await.unwrap();
        let hr = create(&db, CreateDepartment { name: "HR".into() })
            .await
            .unwrap();

        let err = update(&db, hr.id, UpdateDepartment { name: Some("IT".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Renaming to the current name is a no-op, not a collision.
        let same = update(&db, hr.id, UpdateDepartment { name: Some("HR".into()) })
            .await
            .unwrap();
        assert_eq!(same.name, "HR");
    }

    #[tokio::test]
    async fn delete_lifecycle_with_referencing_user() {
        let db = setup_db().await;

        let dept = create(&db, CreateDepartment { name: "IT".into() })
            .await
            .unwrap();
        let user = users::create(&db, user_in(dept.id, "u1")).await.unwrap();

        // Referenced: delete is rejected and both rows survive.
        let err = delete(&db, dept.id).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(get(&db, dept.id).await.unwrap().name, "IT");
        assert_eq!(users::get(&db, user.id).await.unwrap().name, "Alice");

        // Remove the reference, then the delete goes through.
        users::delete(&db, user.id).await.unwrap();
        delete(&db, dept.id).await.unwrap();
        assert!(matches!(
            get(&db, dept.id).await.unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let db = setup_db().await;

        assert!(matches!(
            delete(&db, 7).await.unwrap_err(),
            StoreError::NotFound("Department")
        ));
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let db = setup_db().await;

        for name in ["A", "B", "C"] {
            create(&db, CreateDepartment { name: name.into() })
                .await
                .unwrap();
        }

        let all = list(&db, 0, 100).await.unwrap();
        assert_eq!(
            all.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            ["A", "B", "C"]
        );

        let page = list(&db, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "B");

        // Out-of-range offset is empty, not an error.
        assert!(list(&db, 10, 100).await.unwrap().is_empty());

        // limit=0 is empty regardless of row count.
        assert!(list(&db, 0, 0).await.unwrap().is_empty());
    }
}
