//! Boundary to the AI stylist.
//!
//! The network side lives behind [`AdviceProvider`]. This module builds the
//! request context, renders the system prompt and turns every outcome,
//! success or failure, into an AI-role chat message.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{ChatMessage, SecureString, UserProfile, WardrobeItem};
use crate::engine::VibeState;

/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Above this temperature heavy layering is discouraged.
const WARM_THRESHOLD_F: i32 = 75;

/// Current conditions supplied by the weather collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Degrees Fahrenheit.
    pub temp: i32,
    pub humidity: u8,
    /// Miles per hour.
    pub wind_speed: i32,
    pub condition: String,
}

impl WeatherSnapshot {
    pub fn is_wet(&self) -> bool {
        let c = self.condition.to_lowercase();
        c.contains("rain") || c.contains("drizzle") || c.contains("shower")
    }

    pub fn is_warm(&self) -> bool {
        self.temp > WARM_THRESHOLD_F
    }
}

/// Everything a provider needs for one advice round-trip.
#[derive(Debug, Clone)]
pub struct AdviceRequest {
    pub system_prompt: String,
    pub profile: UserProfile,
    pub clean_inventory: Vec<WardrobeItem>,
    /// Conversation so far, oldest first, including the latest user turn.
    pub history: Vec<ChatMessage>,
    pub weather: Option<WeatherSnapshot>,
    pub model: String,
    pub credential: SecureString,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdviceError {
    #[error("API key is missing. Please add it in Settings.")]
    MissingCredential,

    #[error("Quota exceeded, try again later ({0})")]
    QuotaExceeded(String),

    #[error("Model '{0}' is not available")]
    ModelUnavailable(String),

    #[error("The request was rejected: {0}")]
    MalformedRequest(String),

    #[error("{0}")]
    Other(String),
}

/// External stylist service.
pub trait AdviceProvider {
    fn advise(&self, request: &AdviceRequest) -> Result<String, AdviceError>;
}

/// Render the stylist's system prompt for `profile`, the clean items and the
/// optional weather.
pub fn render_prompt(
    profile: &UserProfile,
    clean_inventory: &[WardrobeItem],
    weather: Option<&WeatherSnapshot>,
) -> String {
    let mut prompt = String::new();
    prompt.push_str("You are VibeStylist, an AI fashion assistant.\n");
    prompt.push_str(
        "Your goal is to suggest outfits based on the user's available (clean) wardrobe \
         and their style preferences.\n",
    );
    if !profile.custom_persona.trim().is_empty() {
        let _ = writeln!(prompt, "Persona: {}", profile.custom_persona.trim());
    }
    if profile.sass_mode {
        prompt.push_str("Be playful and a little sassy, but never mean.\n");
    }

    prompt.push_str("\nUser Profile:\n");
    let _ = writeln!(prompt, "- Name: {}", profile.greeting_name());
    let _ = writeln!(
        prompt,
        "- Fit Preference (0-100, Tight to Loose): {}",
        profile.fit_preference
    );
    let _ = writeln!(
        prompt,
        "- Color Palette (0-100, Neutral to Vibrant): {}",
        profile.color_palette
    );
    let _ = writeln!(
        prompt,
        "- Style Priority (0-100, Utility to Aesthetic): {}",
        profile.utility_vs_aesthetic
    );
    let answers = [
        ("Lifestyle", profile.lifestyle.as_deref()),
        ("Climate", profile.climate.as_deref()),
        ("Body Type", profile.body_type.as_deref()),
        ("Accessory Vibe", profile.accessory_vibe.as_deref()),
    ];
    for (label, value) in answers {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            let _ = writeln!(prompt, "- {}: {}", label, value);
        }
    }
    let lists = [
        ("Favourite Textures", &profile.textures),
        ("Style Eras", &profile.style_eras),
        ("Avoid", &profile.fashion_dislikes),
    ];
    for (label, values) in lists {
        if !values.is_empty() {
            let _ = writeln!(prompt, "- {}: {}", label, values.join(", "));
        }
    }

    prompt.push_str("\nAvailable Clean Inventory:\n");
    if clean_inventory.is_empty() {
        prompt.push_str("(none)\n");
    }
    for item in clean_inventory {
        let _ = write!(prompt, "- {} [{}]", item.name, item.category);
        if let Some(color) = &item.color {
            let _ = write!(prompt, ", {}", color);
        }
        let _ = writeln!(prompt, ", worn {} times", item.wear_count);
    }

    prompt.push_str("\nCurrent Weather:\n");
    match weather {
        Some(w) => {
            let _ = writeln!(
                prompt,
                "{}°F, {}, humidity {}%, wind {} mph",
                w.temp, w.condition, w.humidity, w.wind_speed
            );
        }
        None => prompt.push_str("Unknown\n"),
    }

    prompt.push_str(
        "\nInstructions:\n\
         1. Suggest a cohesive outfit using ONLY the items listed in the inventory.\n\
         2. Explain why this outfit matches their \"vibe\" (preferences).\n\
         3. If they don't have enough items (e.g., missing shoes or bottoms), suggest what they should buy to complete the look.\n\
         4. Keep the tone helpful, stylish, and concise.\n",
    );

    if let Some(w) = weather {
        prompt.push_str("\nWeather-Specific Rules:\n");
        if w.is_wet() {
            prompt.push_str("- Rain is expected: strictly warn against suede or canvas shoes.\n");
        }
        if w.is_warm() {
            prompt.push_str("- It is warm: discourage heavy layering (thick knits, jackets).\n");
        }
        prompt.push_str("- Always reference the specific weather condition in your advice.\n");
    }
    prompt
}

/// Build the request from `state` and ask `provider`.
///
/// The credential is checked before the provider is touched. The result is
/// always an AI-role message; errors become readable text.
pub fn request_advice(
    provider: &dyn AdviceProvider,
    state: &VibeState,
    weather: Option<WeatherSnapshot>,
    model: &str,
    now: DateTime<Utc>,
) -> ChatMessage {
    let outcome = build_request(state, weather, model).and_then(|request| {
        debug!(
            model = %request.model,
            items = request.clean_inventory.len(),
            history = request.history.len(),
            "Requesting style advice"
        );
        provider.advise(&request)
    });

    match outcome {
        Ok(text) => ChatMessage::ai(text, now),
        Err(e) => {
            warn!(error = %e, "Style advice failed");
            ChatMessage::ai(format!("Error: {}", e), now)
        }
    }
}

fn build_request(
    state: &VibeState,
    weather: Option<WeatherSnapshot>,
    model: &str,
) -> Result<AdviceRequest, AdviceError> {
    if state.api_key.is_blank() {
        return Err(AdviceError::MissingCredential);
    }
    let clean_inventory: Vec<WardrobeItem> = state.clean_items().cloned().collect();
    let model = if model.trim().is_empty() {
        DEFAULT_MODEL
    } else {
        model.trim()
    };
    Ok(AdviceRequest {
        system_prompt: render_prompt(&state.profile, &clean_inventory, weather.as_ref()),
        profile: state.profile.clone(),
        clean_inventory,
        history: state.chat_messages.clone(),
        weather,
        model: model.to_string(),
        credential: state.api_key.clone(),
    })
}
