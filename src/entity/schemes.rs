use sea_orm::entity::prelude::*;

/// A government welfare scheme open to applicants within an age range.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schemes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_by: Option<Uuid>,
    pub scheme_name: Option<String>,
    pub start_age: Option<i32>,
    pub end_age: Option<i32>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub timestamp: Option<DateTimeWithTimeZone>,
}

impl Model {
    /// Inclusive on both ends. An inverted range or a missing bound contains
    /// no ages.
    pub fn contains_age(&self, age: i32) -> bool {
        match (self.start_age, self.end_age) {
            (Some(start), Some(end)) => start <= age && age <= end,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
