use sea_orm::entity::prelude::*;

/// Join rows for the crop <-> technique many-to-many.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "crop_techniques")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub crop_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub technique_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::crops::Entity",
        from = "Column::CropId",
        to = "super::crops::Column::Id",
        on_delete = "Cascade"
    )]
    Crops,
    #[sea_orm(
        belongs_to = "super::agricultural_techniques::Entity",
        from = "Column::TechniqueId",
        to = "super::agricultural_techniques::Column::Id",
        on_delete = "Cascade"
    )]
    Techniques,
}

impl Related<super::crops::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crops.def()
    }
}

impl Related<super::agricultural_techniques::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Techniques.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
