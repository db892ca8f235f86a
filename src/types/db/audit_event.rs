use sea_orm::entity::prelude::*;

// The audit_events table is ensured at startup by the schema evolution
// helper, not by the identity migrations.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub timestamp: String,
    pub event_type: String,
    pub account_id: Option<String>,
    pub ip_address: Option<String>,
    pub data: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
