use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub climate: String,
    pub growth_period: String,
    pub harvesting_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crop_techniques::Entity")]
    CropTechniques,
    #[sea_orm(has_many = "super::solutions::Entity")]
    Solutions,
}

impl Related<super::agricultural_techniques::Entity> for Entity {
    fn to() -> RelationDef {
        super::crop_techniques::Relation::Techniques.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::crop_techniques::Relation::Crops.def().rev())
    }
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
