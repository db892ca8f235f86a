use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub full_name: String,
    pub password_hash: String,

    // Rotated whenever the password changes; reset artifacts are keyed by it
    pub security_stamp: String,

    // Login policy gates
    pub requires_password_reset: bool,
    pub lockout_until: Option<i64>,

    // Tenant scope (law firm)
    pub firm_id: i32,

    // Outstanding password-reset artifact (keyed digest, newest wins)
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<i64>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
