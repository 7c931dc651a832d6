use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "agricultural_techniques")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Path relative to the media root, under `technique_images/`.
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::crop_techniques::Entity")]
    CropTechniques,
}

impl Related<super::crops::Entity> for Entity {
    fn to() -> RelationDef {
        super::crop_techniques::Relation::Crops.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::crop_techniques::Relation::Techniques.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
