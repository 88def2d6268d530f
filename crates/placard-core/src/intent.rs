//! Intent extraction from inbound interaction payloads.

use placard_types::{is_redirect_value, is_reset_value, FramePayload};

/// Signals extracted from one inbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    /// Recorded value of the pressed button, sentinels included.
    pub button_value: Option<String>,
    /// Text entered by the user; absence is distinct from the empty string.
    pub input_text: Option<String>,
    /// The pressed button is redirect-class: the client must resolve a
    /// destination before continuing.
    pub redirect: bool,
    /// The pressed button returns the chain to its initial frame: stored
    /// state and history position are abandoned.
    pub reset: bool,
}

/// Determines which button (if any) was pressed and what the press implies.
///
/// `button_values` are the recorded values of the previously served frame,
/// indexed by button position. Pure and total: an absent payload, a zero
/// index, or an index past the recorded values degrades to "no button
/// matched" rather than failing.
pub fn extract_intent(
    button_values: &[Option<String>],
    payload: Option<&FramePayload>,
) -> Intent {
    let mut intent = Intent {
        input_text: payload.and_then(|p| p.input_text.clone()),
        ..Intent::default()
    };

    let Some(index) = payload.and_then(|p| p.button_index) else {
        return intent;
    };
    let Some(slot) = (index as usize).checked_sub(1) else {
        return intent;
    };
    let Some(value) = button_values.get(slot).cloned().flatten() else {
        return intent;
    };

    intent.reset = is_reset_value(&value);
    intent.redirect = is_redirect_value(&value);
    intent.button_value = Some(value);
    intent
}
