//! Project database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Project;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_unified: bool,
    pub organization_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_delete = "Cascade"
    )]
    Organization,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// The organization name is not part of the row; repositories fill it in
/// when they load the owning organization.
impl From<Model> for Project {
    fn from(model: Model) -> Self {
        Project {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            is_unified: model.is_unified,
            created_at: Some(model.created_at),
            organization_id: Some(model.organization_id),
            organization_name: None,
        }
    }
}
