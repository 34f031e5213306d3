use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Tint applied to the star field and chrome of the timer view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Background {
    Stars,
    #[default]
    DeepSpace,
    Nebula,
    Cosmic,
    Solar,
    Void,
}

impl Background {
    /// Picker order; the menu digit is the index plus one.
    pub const ALL: [Background; 6] = [
        Background::Stars,
        Background::DeepSpace,
        Background::Nebula,
        Background::Cosmic,
        Background::Solar,
        Background::Void,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Background::Stars => "Bright Stars",
            Background::DeepSpace => "Deep Space Blue",
            Background::Nebula => "Nebula Magenta",
            Background::Cosmic => "Cosmic Cyan",
            Background::Solar => "Solar Yellow",
            Background::Void => "Dark Void",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Background::Stars => Color::White,
            Background::DeepSpace => Color::LightBlue,
            Background::Nebula => Color::LightMagenta,
            Background::Cosmic => Color::LightCyan,
            Background::Solar => Color::LightYellow,
            Background::Void => Color::DarkGray,
        }
    }

    pub fn from_choice(choice: &str) -> Option<Self> {
        let idx = choice.trim().parse::<usize>().ok()?;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_map_to_picker_order() {
        assert_eq!(Background::from_choice("1"), Some(Background::Stars));
        assert_eq!(Background::from_choice(" 3 "), Some(Background::Nebula));
        assert_eq!(Background::from_choice("6"), Some(Background::Void));
    }

    #[test]
    fn out_of_range_choices_are_rejected() {
        assert_eq!(Background::from_choice("0"), None);
        assert_eq!(Background::from_choice("7"), None);
        assert_eq!(Background::from_choice("blue"), None);
        assert_eq!(Background::from_choice(""), None);
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(Background::DeepSpace.to_string(), "deep_space");
        assert_eq!(
            serde_json::to_string(&Background::DeepSpace).unwrap(),
            "\"deep_space\""
        );
    }
}
