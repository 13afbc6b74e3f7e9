use std::collections::HashMap;

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{brand, category, closet_item, condition, subcategory};
use crate::error::AppError;
use crate::models::item::{ItemRequest, ItemResponse, JoinedNames};

/// Reference names keyed by id, loaded once per request.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    brands: HashMap<Uuid, String>,
    categories: HashMap<Uuid, String>,
    subcategories: HashMap<Uuid, String>,
    conditions: HashMap<Uuid, condition::Model>,
}

impl ReferenceIndex {
    /// Read the four reference tables concurrently.
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, DbErr> {
        let (brands, categories, subcategories, conditions) = tokio::try_join!(
            brand::Entity::find().all(db),
            category::Entity::find().all(db),
            subcategory::Entity::find().all(db),
            condition::Entity::find().all(db),
        )?;

        Ok(Self {
            brands: brands.into_iter().map(|b| (b.id, b.name)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c.name)).collect(),
            subcategories: subcategories.into_iter().map(|s| (s.id, s.name)).collect(),
            conditions: conditions.into_iter().map(|c| (c.id, c)).collect(),
        })
    }

    /// Names for a single item, looked up by primary key.
    pub async fn for_item<C: ConnectionTrait>(
        db: &C,
        item: &closet_item::Model,
    ) -> Result<JoinedNames, DbErr> {
        let brand = match item.brand_id {
            Some(id) => brand::Entity::find_by_id(id).one(db).await?.map(|b| b.name),
            None => None,
        };
        let category = match item.category_id {
            Some(id) => category::Entity::find_by_id(id).one(db).await?.map(|c| c.name),
            None => None,
        };
        let subcategory = match item.subcategory_id {
            Some(id) => subcategory::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|s| s.name),
            None => None,
        };
        let condition = match item.condition_id {
            Some(id) => condition::Entity::find_by_id(id).one(db).await?,
            None => None,
        };
        let (condition, condition_notes) = match condition {
            Some(c) => (Some(c.label), c.notes),
            None => (None, None),
        };
        Ok(JoinedNames {
            brand,
            category,
            subcategory,
            condition,
            condition_notes,
        })
    }

    pub fn names(&self, item: &closet_item::Model) -> JoinedNames {
        let get = |map: &HashMap<Uuid, String>, id: Option<Uuid>| id.and_then(|id| map.get(&id).cloned());
        let condition = item.condition_id.and_then(|id| self.conditions.get(&id));
        JoinedNames {
            brand: get(&self.brands, item.brand_id),
            category: get(&self.categories, item.category_id),
            subcategory: get(&self.subcategories, item.subcategory_id),
            condition: condition.map(|c| c.label.clone()),
            condition_notes: condition.and_then(|c| c.notes.clone()),
        }
    }

    pub fn join(&self, item: closet_item::Model) -> ItemResponse {
        let names = self.names(&item);
        ItemResponse::new(item, names)
    }
}

/// Every item, newest first, with reference names joined in.
pub async fn load_catalog<C: ConnectionTrait>(db: &C) -> Result<Vec<ItemResponse>, DbErr> {
    let (items, index) = tokio::try_join!(
        closet_item::Entity::find()
            .order_by_desc(closet_item::Column::CreatedAt)
            .order_by_desc(closet_item::Column::Id)
            .all(db),
        ReferenceIndex::load(db),
    )?;
    Ok(items.into_iter().map(|item| index.join(item)).collect())
}

/// Check that every referenced row exists and that the subcategory belongs
/// to the chosen category.
pub async fn check_references<C: ConnectionTrait>(
    db: &C,
    req: &ItemRequest,
) -> Result<(), AppError> {
    if let Some(id) = req.brand_id
        && brand::Entity::find_by_id(id).one(db).await?.is_none()
    {
        return Err(AppError::Validation(format!("Brand {id} does not exist")));
    }
    if let Some(id) = req.category_id
        && category::Entity::find_by_id(id).one(db).await?.is_none()
    {
        return Err(AppError::Validation(format!("Category {id} does not exist")));
    }
    if let Some(id) = req.condition_id
        && condition::Entity::find_by_id(id).one(db).await?.is_none()
    {
        return Err(AppError::Validation(format!("Condition {id} does not exist")));
    }
    if let Some(id) = req.subcategory_id {
        let sub = subcategory::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Validation(format!("Subcategory {id} does not exist")))?;
        if let (Some(parent), Some(chosen)) = (sub.category_id, req.category_id)
            && parent != chosen
        {
            return Err(AppError::Validation(format!(
                "Subcategory '{}' does not belong to the selected category",
                sub.name
            )));
        }
    }
    Ok(())
}
