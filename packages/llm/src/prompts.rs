//! Prompt templates for the closet assistant.

use crate::models::{ListingRequest, PricingRequest, RecognitionRequest};

const NOT_SPECIFIED: &str = "Not specified";

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(default)
}

pub fn recognition(req: &RecognitionRequest) -> String {
    format!(
        r#"You are helping catalogue a wardrobe of designer clothing for resale.

Given information:
- Item Name: {item_name}
- Brand Override: {brand}
- Model/Style: {model}
- Category: {category}
- Subcategory: {subcategory}
- Size: {size}
- Colour: {colour}

Please identify:
1. Brand (if not already specified)
2. Exact item type (e.g., "90s Pinch Waist High-Rise Straight Jeans")
3. Category (e.g., Jacket, Jeans, Shoes)
4. Subcategory (e.g., Denim, Overshirt, Low-top Sneaker)
5. Colour
6. Fabric/material if visible
7. Gender category if obvious (Men's, Women's, Unisex)
8. Any notable details (e.g., cropped fit, raw hem, embroidery)

Return ONLY a JSON object with this structure (no markdown, no code blocks):
{{
  "brand": "Brand Name",
  "itemType": "Specific item description",
  "category": "Category",
  "subcategory": "Subcategory",
  "colour": "Colour description",
  "fabric": "Material/fabric",
  "gender": "Men's/Women's/Unisex",
  "details": "Notable details"
}}"#,
        item_name = or_default(req.item_name.as_deref(), "Unknown"),
        brand = or_default(req.brand_override.as_deref(), NOT_SPECIFIED),
        model = or_default(req.model_style.as_deref(), NOT_SPECIFIED),
        category = or_default(req.category_name.as_deref(), NOT_SPECIFIED),
        subcategory = or_default(req.subcategory_name.as_deref(), NOT_SPECIFIED),
        size = or_default(req.size.as_deref(), NOT_SPECIFIED),
        colour = or_default(req.colour.as_deref(), NOT_SPECIFIED),
    )
}

pub fn retail_price(req: &PricingRequest) -> String {
    format!(
        r#"Estimate the original retail price in CAD for this item:
- Brand: {brand}
- Item: {item} - {model}
- Category: {category} / {subcategory}

Respond with ONLY a JSON object (no markdown, no code blocks):
{{
  "retailPrice": 325
}}

The retailPrice should be a number representing CAD."#,
        brand = req.brand_name,
        item = req.item_name,
        model = or_default(req.model_style.as_deref(), NOT_SPECIFIED),
        category = req.category_name,
        subcategory = or_default(req.subcategory_name.as_deref(), NOT_SPECIFIED),
    )
}

pub fn resale_price(req: &PricingRequest) -> String {
    format!(
        r#"Estimate the current resale price in CAD for this item:
- Brand: {brand}
- Item: {item} - {model}
- Category: {category} / {subcategory}
- Condition: {condition}

Consider platforms like Grailed, Vestiaire Collective, The RealReal, Poshmark.

Respond with ONLY a JSON object (no markdown, no code blocks):
{{
  "resalePrice": 140
}}

The resalePrice should be a number representing CAD."#,
        brand = req.brand_name,
        item = req.item_name,
        model = or_default(req.model_style.as_deref(), NOT_SPECIFIED),
        category = req.category_name,
        subcategory = or_default(req.subcategory_name.as_deref(), NOT_SPECIFIED),
        condition = req.condition_label,
    )
}

pub fn listing_title(req: &ListingRequest) -> String {
    format!(
        r#"Create a short, resale-ready title for this item for platforms like Grailed and Vestiaire.

Format: Brand – Model – Category – Size – Colour

Examples:
- Agolde – 90s Pinch Waist Jeans – 30 – Washed Black
- Isabel Marant Étoile – Kotto Jacket – FR 38 – Khaki

Use:
- Brand: {brand}
- Model: {model}
- Category: {category}
- Size: {size}
- Colour: {colour}

Respond with ONLY a JSON object (no markdown):
{{
  "title": "Your title here"
}}"#,
        brand = req.brand_name,
        model = or_default(req.model_style.as_deref(), &req.item_name),
        category = req.category_name,
        size = req.size,
        colour = req.colour,
    )
}

pub fn listing_description(req: &ListingRequest) -> String {
    let condition = match req.condition_notes.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(notes) => format!("{} ({notes})", req.condition_label),
        None => req.condition_label.clone(),
    };
    format!(
        r#"Write a compelling resale listing description for this clothing item.
Use a friendly, concise reseller tone (like Grailed or Vestiaire).

Include:
- Brand: {brand}
- Model/style: {item} – {model}
- Category: {category} / {subcategory}
- Size: {size}
- Colour: {colour}
- Condition: {condition}

Keep it under 120 words. No emojis. Add 3-6 SEO-style keywords at the end separated by commas.

Respond with ONLY a JSON object (no markdown):
{{
  "description": "Your description here"
}}"#,
        brand = req.brand_name,
        item = req.item_name,
        model = or_default(req.model_style.as_deref(), NOT_SPECIFIED),
        category = req.category_name,
        subcategory = or_default(req.subcategory_name.as_deref(), NOT_SPECIFIED),
        size = req.size,
        colour = req.colour,
    )
}
