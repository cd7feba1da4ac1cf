//! Database models for pots.

use diesel::prelude::*;

use crate::utils::parse_decimal;
use moneyboard_core::pots::Pot;

#[derive(Queryable, Identifiable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::pots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PotDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target: String,
    pub total: String,
    pub theme: String,
    pub created_at: String,
}

impl From<PotDB> for Pot {
    fn from(db: PotDB) -> Self {
        Self {
            target: parse_decimal(&db.target, "target"),
            total: parse_decimal(&db.total, "total"),
            id: db.id,
            name: db.name,
            theme: db.theme,
        }
    }
}
