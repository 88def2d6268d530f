//! Frame document and button descriptor types.

use crate::ButtonType;
use serde::{Deserialize, Serialize};

/// Maximum number of buttons a frame may declare.
pub const MAX_BUTTONS: usize = 4;

/// A button declared by a frame.
///
/// Buttons are supplied fresh with every frame document and are not
/// retained across cycles except as the recorded values fed back through
/// `previousButtonValues` on the next interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDescriptor {
    /// 1-based position of the button (1–4).
    pub index: u8,
    /// Label shown on the button.
    pub title: String,
    /// Behavior of the button when pressed.
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    /// Destination URL; meaningful for `Link` and `PostRedirect` buttons.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<String>,
    /// Recorded value fed back through `previousButtonValues` on the next
    /// cycle. Values beginning with `_` are reserved for the platform.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
}

/// The optional text input a frame can declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Placeholder text shown in the empty input.
    pub text: String,
}

/// One server-described frame document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// URL of the frame image.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Aspect ratio of the frame image, e.g. `"1.91:1"`.
    #[serde(rename = "imageAspectRatio", default = "default_aspect_ratio")]
    pub image_aspect_ratio: String,
    /// Document title.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// Optional text input descriptor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub input: Option<FrameInput>,
    /// Declared buttons, at most [`MAX_BUTTONS`].
    #[serde(default)]
    pub buttons: Vec<ButtonDescriptor>,
    /// The frame's declared action URL, used when a button has no target.
    #[serde(rename = "postUrl")]
    pub post_url: String,
    /// Opaque state blob echoed back with the next interaction payload.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
}

fn default_aspect_ratio() -> String {
    "1.91:1".to_string()
}

impl Frame {
    /// Returns the recorded button values in index order, as consumed by
    /// the intent extractor on the next cycle.
    pub fn button_values(&self) -> Vec<Option<String>> {
        let mut values = vec![None; self.buttons.len().min(MAX_BUTTONS)];
        for button in self.buttons.iter().take(MAX_BUTTONS) {
            let slot = (button.index as usize).checked_sub(1);
            if let Some(slot) = slot.filter(|&s| s < values.len()) {
                values[slot] = button.value.clone();
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(index: u8, value: Option<&str>) -> ButtonDescriptor {
        ButtonDescriptor {
            index,
            title: format!("button {index}"),
            button_type: ButtonType::Post,
            target: None,
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn button_values_follow_declared_indices() {
        let frame = Frame {
            image_url: "https://example.com/img.png".to_string(),
            image_aspect_ratio: "1.91:1".to_string(),
            title: None,
            input: None,
            buttons: vec![button(2, Some("beta")), button(1, None)],
            post_url: "https://example.com/frame".to_string(),
            state: None,
        };
        assert_eq!(
            frame.button_values(),
            vec![None, Some("beta".to_string())]
        );
    }

    #[test]
    fn frame_deserializes_with_missing_optionals() {
        let frame: Frame = serde_json::from_str(
            r#"{"imageUrl": "https://x/img", "postUrl": "https://x/frame"}"#,
        )
        .unwrap();
        assert!(frame.buttons.is_empty());
        assert_eq!(frame.image_aspect_ratio, "1.91:1");
        assert!(frame.state.is_none());
    }
}
