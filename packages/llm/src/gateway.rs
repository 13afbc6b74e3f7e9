//! The three AI operations built on a [`CompletionBackend`].

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::backend::{AnthropicBackend, CompletionBackend, ImageInput, Prompt};
use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::models::*;
use crate::parse::parse_reply;
use crate::prompts;

#[derive(Deserialize)]
struct RetailReply {
    #[serde(rename = "retailPrice")]
    retail_price: f64,
}

#[derive(Deserialize)]
struct ResaleReply {
    #[serde(rename = "resalePrice")]
    resale_price: f64,
}

#[derive(Deserialize)]
struct TitleReply {
    title: String,
}

#[derive(Deserialize)]
struct DescriptionReply {
    description: String,
}

pub struct Gateway {
    backend: Arc<dyn CompletionBackend>,
}

impl Gateway {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Gateway over the Anthropic API. Fails when no key is configured.
    pub fn anthropic(config: LlmConfig) -> Result<Self, LlmError> {
        Ok(Self::new(Arc::new(AnthropicBackend::new(config)?)))
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    #[instrument(skip_all, fields(model = %self.model_name()))]
    pub async fn recognize(&self, req: &RecognitionRequest) -> Result<RecognitionResult, LlmError> {
        let image = req
            .photo_base64
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(decode_photo)
            .transpose()?;

        let prompt = Prompt::text(prompts::recognition(req)).with_image(image);
        let reply = self.backend.complete(&prompt).await?;
        parse_reply(&reply)
    }

    /// Retail and resale estimates, requested concurrently.
    ///
    /// Either prompt failing fails the whole estimate.
    #[instrument(skip_all, fields(model = %self.model_name()))]
    pub async fn estimate_pricing(&self, req: &PricingRequest) -> Result<PricingResult, LlmError> {
        require(req.missing_fields())?;

        let retail_prompt = Prompt::text(prompts::retail_price(req));
        let resale_prompt = Prompt::text(prompts::resale_price(req));
        let (retail, resale) = tokio::try_join!(
            self.backend.complete(&retail_prompt),
            self.backend.complete(&resale_prompt),
        )?;

        let retail: RetailReply = parse_reply(&retail)?;
        let resale: ResaleReply = parse_reply(&resale)?;
        let result = PricingResult {
            retail_price: non_negative("retailPrice", retail.retail_price)?,
            resale_price: non_negative("resalePrice", resale.resale_price)?,
        };
        debug!(?result, "Pricing estimated");
        Ok(result)
    }

    /// Listing title and description, requested concurrently.
    #[instrument(skip_all, fields(model = %self.model_name()))]
    pub async fn generate_listing(&self, req: &ListingRequest) -> Result<ListingResult, LlmError> {
        require(req.missing_fields())?;

        let title_prompt = Prompt::text(prompts::listing_title(req));
        let description_prompt = Prompt::text(prompts::listing_description(req));
        let (title, description) = tokio::try_join!(
            self.backend.complete(&title_prompt),
            self.backend.complete(&description_prompt),
        )?;

        let title: TitleReply = parse_reply(&title)?;
        let description: DescriptionReply = parse_reply(&description)?;
        Ok(ListingResult {
            title: title.title,
            description: description.description,
        })
    }
}

fn require(missing: Vec<&'static str>) -> Result<(), LlmError> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LlmError::InvalidInput(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64, LlmError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LlmError::Parse(format!("{field} must be a non-negative number")))
    }
}

/// Accept bare base64 or a `data:<mime>;base64,<payload>` URL.
fn decode_photo(input: &str) -> Result<ImageInput, LlmError> {
    let input = input.trim();
    let (declared, payload) = match input.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| LlmError::InvalidInput("Malformed photo data URL".into()))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or_else(|| LlmError::InvalidInput("Photo data URL must be base64".into()))?;
            if !mime.starts_with("image/") {
                return Err(LlmError::InvalidInput(format!(
                    "Photo must be an image, got '{mime}'"
                )));
            }
            (Some(mime.to_string()), payload)
        }
        None => (None, input),
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| LlmError::InvalidInput(format!("photoBase64 is not valid base64: {e}")))?;
    let media_type = declared.unwrap_or_else(|| sniff_image_type(&bytes).to_string());

    Ok(ImageInput {
        media_type,
        data: payload.to_string(),
    })
}

fn sniff_image_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/jpeg",
    }
}
