use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entity::{department, user, workstation, workstation_type};

// ---------- list query ----------

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

// ---------- department requests ----------

#[derive(Debug, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartment {
    pub name: Option<String>,
}

// ---------- department responses ----------

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<department::Model> for DepartmentResponse {
    fn from(m: department::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---------- user requests ----------

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub distinguished_name: String,
    pub name: String,
    pub department_id: i32,
    pub notes: Option<String>,
    pub status: Option<i32>,
    pub office_location: Option<String>,
    /// Defaults to the creation date when absent.
    pub date_of_arrival: Option<String>,
    pub date_of_leave: Option<String>,
}

/// Merge-patch: absent fields are left untouched. The distinguished name and
/// arrival date are fixed at creation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub department_id: Option<i32>,
    pub notes: Option<String>,
    pub status: Option<i32>,
    pub office_location: Option<String>,
    pub date_of_leave: Option<String>,
}

// ---------- user responses ----------

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub distinguished_name: String,
    pub name: String,
    pub department_id: i32,
    pub notes: Option<String>,
    pub status: i32,
    pub office_location: Option<String>,
    pub date_of_arrival: Option<String>,
    pub date_of_leave: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            distinguished_name: m.distinguished_name,
            name: m.name,
            department_id: m.department_id,
            notes: m.notes,
            status: m.status,
            office_location: m.office_location,
            date_of_arrival: m.date_of_arrival,
            date_of_leave: m.date_of_leave,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---------- workstation type requests ----------

#[derive(Debug, Deserialize)]
pub struct CreateWorkstationType {
    pub type_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkstationType {
    pub type_name: Option<String>,
}

// ---------- workstation type responses ----------

#[derive(Debug, Serialize)]
pub struct WorkstationTypeResponse {
    pub id: i32,
    pub type_name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<workstation_type::Model> for WorkstationTypeResponse {
    fn from(m: workstation_type::Model) -> Self {
        Self {
            id: m.id,
            type_name: m.type_name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---------- workstation requests ----------

#[derive(Debug, Deserialize)]
pub struct CreateWorkstation {
    pub hostname: String,
    pub type_id: i32,
    pub user_id: i32,
    pub department_id: i32,
    /// Defaults to the creation date when absent.
    pub date_of_arrival: Option<String>,
    pub video_ram_gb: Option<i32>,
    pub system_ram_gb: Option<i32>,
    pub total_storage_tb: Option<i32>,
    pub hardware_description: Option<String>,
    pub notes: Option<String>,
}

/// Merge-patch: absent fields are left untouched. The hostname is fixed at
/// creation.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkstation {
    pub type_id: Option<i32>,
    pub user_id: Option<i32>,
    pub department_id: Option<i32>,
    pub date_of_arrival: Option<String>,
    pub video_ram_gb: Option<i32>,
    pub system_ram_gb: Option<i32>,
    pub total_storage_tb: Option<i32>,
    pub hardware_description: Option<String>,
    pub notes: Option<String>,
}

// ---------- workstation responses ----------

#[derive(Debug, Serialize)]
pub struct WorkstationResponse {
    pub id: i32,
    pub hostname: String,
    pub type_id: i32,
    pub user_id: i32,
    pub department_id: i32,
    pub date_of_arrival: Option<String>,
    pub video_ram_gb: Option<i32>,
    pub system_ram_gb: Option<i32>,
    pub total_storage_tb: Option<i32>,
    pub hardware_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<workstation::Model> for WorkstationResponse {
    fn from(m: workstation::Model) -> Self {
        Self {
            id: m.id,
            hostname: m.hostname,
            type_id: m.type_id,
            user_id: m.user_id,
            department_id: m.department_id,
            date_of_arrival: m.date_of_arrival,
            video_ram_gb: m.video_ram_gb,
            system_ram_gb: m.system_ram_gb,
            total_storage_tb: m.total_storage_tb,
            hardware_description: m.hardware_description,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
