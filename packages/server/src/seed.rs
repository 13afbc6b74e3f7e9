use chrono::Utc;
use common::BodyArea;
use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::entity::{brand, category, condition, subcategory};

/// Condition scale, best first.
const DEFAULT_CONDITIONS: &[(&str, i32, &str)] = &[
    ("New with tags", 5, "Never worn, original tags attached"),
    ("Excellent", 4, "Worn a few times, no visible flaws"),
    ("Good", 3, "Light wear, no major flaws"),
    ("Fair", 2, "Visible wear such as fading or pilling"),
    ("Poor", 1, "Damage, stains or needs repair"),
];

const DEFAULT_CATEGORIES: &[(&str, BodyArea)] = &[
    ("Tops", BodyArea::Top),
    ("Outerwear", BodyArea::Top),
    ("Dresses", BodyArea::Top),
    ("Jeans", BodyArea::Bottom),
    ("Pants", BodyArea::Bottom),
    ("Shorts", BodyArea::Bottom),
    ("Skirts", BodyArea::Bottom),
    ("Shoes", BodyArea::Footwear),
    ("Bags", BodyArea::Accessory),
    ("Accessories", BodyArea::Accessory),
];

/// (category, subcategory)
const DEFAULT_SUBCATEGORIES: &[(&str, &str)] = &[
    ("Tops", "T-Shirt"),
    ("Tops", "Shirt"),
    ("Tops", "Sweater"),
    ("Tops", "Hoodie"),
    ("Outerwear", "Jacket"),
    ("Outerwear", "Coat"),
    ("Outerwear", "Blazer"),
    ("Jeans", "Straight"),
    ("Jeans", "Wide Leg"),
    ("Jeans", "Skinny"),
    ("Pants", "Trousers"),
    ("Pants", "Cargo"),
    ("Shoes", "Sneakers"),
    ("Shoes", "Boots"),
    ("Shoes", "Loafers"),
    ("Bags", "Tote"),
    ("Bags", "Crossbody"),
    ("Accessories", "Belt"),
    ("Accessories", "Hat"),
    ("Accessories", "Scarf"),
];

const DEFAULT_BRANDS: &[&str] = &[
    "Agolde",
    "Acne Studios",
    "Aritzia",
    "Arc'teryx",
    "Levi's",
    "Patagonia",
    "Uniqlo",
    "Everlane",
    "COS",
    "Dr. Martens",
    "New Balance",
    "Veja",
];

/// Counts inserted rows, treating "already there" as a no-op.
fn tally(result: Result<u64, DbErr>, inserted: &mut u64) -> Result<(), DbErr> {
    match result {
        Ok(rows) => {
            *inserted += rows;
            Ok(())
        }
        Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Seed the reference tables with defaults. Existing rows are left alone.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = Utc::now();

    let mut inserted = 0u64;
    for &(label, score, notes) in DEFAULT_CONDITIONS {
        let model = condition::ActiveModel {
            id: Set(Uuid::now_v7()),
            label: Set(label.to_string()),
            score: Set(score),
            notes: Set(Some(notes.to_string())),
            created_at: Set(now),
        };
        let result = condition::Entity::insert(model)
            .on_conflict(
                OnConflict::column(condition::Column::Label)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        tally(result, &mut inserted)?;
    }
    if inserted > 0 {
        info!("Seeded {} new conditions", inserted);
    }

    let mut inserted = 0u64;
    for &(name, body_area) in DEFAULT_CATEGORIES {
        let model = category::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            body_area: Set(Some(body_area)),
            created_at: Set(now),
        };
        let result = category::Entity::insert(model)
            .on_conflict(
                OnConflict::column(category::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        tally(result, &mut inserted)?;
    }
    if inserted > 0 {
        info!("Seeded {} new categories", inserted);
    }

    let mut inserted = 0u64;
    for &(category_name, name) in DEFAULT_SUBCATEGORIES {
        let Some(parent) = category::Entity::find()
            .filter(category::Column::Name.eq(category_name))
            .one(db)
            .await?
        else {
            continue;
        };
        let model = subcategory::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            category_id: Set(Some(parent.id)),
            created_at: Set(now),
        };
        let result = subcategory::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([subcategory::Column::CategoryId, subcategory::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;
        tally(result, &mut inserted)?;
    }
    if inserted > 0 {
        info!("Seeded {} new subcategories", inserted);
    }

    let mut inserted = 0u64;
    for &name in DEFAULT_BRANDS {
        let model = brand::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            website: Set(None),
            notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = brand::Entity::insert(model)
            .on_conflict(OnConflict::column(brand::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await;
        tally(result, &mut inserted)?;
    }
    if inserted > 0 {
        info!("Seeded {} new brands", inserted);
    }

    Ok(())
}

/// Ensure indexes that schema sync cannot express.
///
/// Must run before [`seed_reference_data`], whose subcategory inserts
/// conflict on `(category_id, name)`.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_subcategory_category_name")
        .table(subcategory::Entity)
        .col(subcategory::Column::CategoryId)
        .col(subcategory::Column::Name)
        .to_string(PostgresQueryBuilder);
    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_subcategory_category_name exists");

    Ok(())
}
