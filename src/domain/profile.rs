use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::day::CalendarDay;

/// Append-only set of badge ids, kept in the order they were earned.
///
/// There is deliberately no removal API: once awarded, a badge stays
/// until the whole profile is reset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Badges(Vec<String>);

impl Badges {
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|b| b == id)
    }

    /// Add `id` if absent. Returns true when the badge is new.
    pub fn award(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The single user's profile, including gamification counters.
///
/// Missing fields decode to their defaults so profiles written before a
/// field existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub display_name: String,
    pub xp: u64,
    pub streak: u32,
    pub last_log_date: Option<CalendarDay>,
    pub badges: Badges,
    pub custom_persona: String,
    pub sass_mode: bool,
    pub sound_effects: bool,
    pub show_weather: bool,
    /// 0 = tight, 100 = loose.
    pub fit_preference: u8,
    /// 0 = neutral, 100 = vibrant.
    pub color_palette: u8,
    /// 0 = utility, 100 = aesthetic.
    pub utility_vs_aesthetic: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub textures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory_vibe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub style_eras: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fashion_dislikes: Vec<String>,
    /// Keys this build does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_name: String::new(),
            xp: 0,
            streak: 0,
            last_log_date: None,
            badges: Badges::default(),
            custom_persona: String::new(),
            sass_mode: false,
            sound_effects: true,
            show_weather: true,
            fit_preference: 50,
            color_palette: 50,
            utility_vs_aesthetic: 50,
            textures: Vec::new(),
            accessory_vibe: None,
            lifestyle: None,
            climate: None,
            body_type: None,
            style_eras: Vec::new(),
            fashion_dislikes: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl UserProfile {
    pub fn grant_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
    }

    /// Name to greet the user with: display name, then name, then a fallback.
    pub fn greeting_name(&self) -> &str {
        if !self.display_name.trim().is_empty() {
            &self.display_name
        } else if !self.name.trim().is_empty() {
            &self.name
        } else {
            "Stylist"
        }
    }

    /// Onboarding is complete once a name has been entered.
    pub fn is_onboarded(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Partial edit of the profile's user-editable fields. `None` leaves a field
/// untouched. XP, streak and badges are engine-owned and cannot be patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub custom_persona: Option<String>,
    pub sass_mode: Option<bool>,
    pub sound_effects: Option<bool>,
    pub show_weather: Option<bool>,
    pub fit_preference: Option<u8>,
    pub color_palette: Option<u8>,
    pub utility_vs_aesthetic: Option<u8>,
    pub textures: Option<Vec<String>>,
    pub accessory_vibe: Option<String>,
    pub lifestyle: Option<String>,
    pub climate: Option<String>,
    pub body_type: Option<String>,
    pub style_eras: Option<Vec<String>>,
    pub fashion_dislikes: Option<Vec<String>>,
}

/// Slider positions run 0..=100.
const SLIDER_MAX: u8 = 100;

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge present fields into `profile`. Sliders are capped at 100.
    pub fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name.trim().to_string();
        }
        if let Some(display_name) = self.display_name {
            profile.display_name = display_name.trim().to_string();
        }
        if let Some(persona) = self.custom_persona {
            profile.custom_persona = persona;
        }
        if let Some(v) = self.sass_mode {
            profile.sass_mode = v;
        }
        if let Some(v) = self.sound_effects {
            profile.sound_effects = v;
        }
        if let Some(v) = self.show_weather {
            profile.show_weather = v;
        }
        if let Some(v) = self.fit_preference {
            profile.fit_preference = v.min(SLIDER_MAX);
        }
        if let Some(v) = self.color_palette {
            profile.color_palette = v.min(SLIDER_MAX);
        }
        if let Some(v) = self.utility_vs_aesthetic {
            profile.utility_vs_aesthetic = v.min(SLIDER_MAX);
        }
        if let Some(v) = self.textures {
            profile.textures = v;
        }
        if let Some(v) = self.accessory_vibe {
            profile.accessory_vibe = Some(v);
        }
        if let Some(v) = self.lifestyle {
            profile.lifestyle = Some(v);
        }
        if let Some(v) = self.climate {
            profile.climate = Some(v);
        }
        if let Some(v) = self.body_type {
            profile.body_type = Some(v);
        }
        if let Some(v) = self.style_eras {
            profile.style_eras = v;
        }
        if let Some(v) = self.fashion_dislikes {
            profile.fashion_dislikes = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_is_idempotent() {
        let mut badges = Badges::default();
        assert!(badges.award("Fashionista"));
        assert!(!badges.award("Fashionista"));
        assert_eq!(badges.len(), 1);
    }

    #[test]
    fn partial_profile_fills_defaults() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"xp": 250, "streak": 2, "customPersona": ""}"#).unwrap();
        assert_eq!(profile.xp, 250);
        assert_eq!(profile.streak, 2);
        assert!(profile.sound_effects);
        assert_eq!(profile.fit_preference, 50);
        assert!(profile.last_log_date.is_none());
    }

    #[test]
    fn greeting_prefers_display_name() {
        let mut profile = UserProfile {
            name: "Alex".into(),
            ..Default::default()
        };
        assert_eq!(profile.greeting_name(), "Alex");
        profile.display_name = "Lex".into();
        assert_eq!(profile.greeting_name(), "Lex");
        assert_eq!(UserProfile::default().greeting_name(), "Stylist");
    }

    #[test]
    fn onboarding_answers_and_unknown_keys_round_trip() {
        let json = r#"{"name":"Ana","xp":300,"lifestyle":"Work","textures":["Denim"],
            "bodyType":"Average","favouriteShop":"Thrift"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.lifestyle.as_deref(), Some("Work"));
        assert_eq!(profile.textures, vec!["Denim".to_string()]);
        assert_eq!(profile.body_type.as_deref(), Some("Average"));
        assert_eq!(profile.extra["favouriteShop"], "Thrift");

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["lifestyle"], "Work");
        assert_eq!(back["bodyType"], "Average");
        assert_eq!(back["favouriteShop"], "Thrift");
        assert!(back.get("climate").is_none());
    }

    #[test]
    fn patch_leaves_counters_alone_and_caps_sliders() {
        let mut profile = UserProfile {
            xp: 700,
            streak: 3,
            ..Default::default()
        };
        let patch: ProfilePatch =
            serde_json::from_str(r#"{"name":" Sam ","fitPreference":140,"sassMode":true}"#)
                .unwrap();
        patch.apply(&mut profile);
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.fit_preference, 100);
        assert!(profile.sass_mode);
        assert_eq!((profile.xp, profile.streak), (700, 3));
        assert_eq!(profile.color_palette, 50);
        assert!(ProfilePatch::default().is_empty());
    }
}
