//! User-facing text for the carousel block.
//!
//! The host editor owns translation and the notification surface. This crate
//! only names the keys the block asks the host to translate, so the model and
//! upload handling never carry display strings of their own.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// Placeholder shown in an empty caption input.
    Caption,
    /// Label of the trailing "add image" control.
    AddImage,
    /// Shown when the upload transport reports failure.
    UploadFailed,
}

impl MessageKey {
    pub const ALL: [MessageKey; 3] = [
        MessageKey::Caption,
        MessageKey::AddImage,
        MessageKey::UploadFailed,
    ];

    /// Key passed to the host translator; doubles as the English text.
    pub const fn as_str(self) -> &'static str {
        match self {
            MessageKey::Caption => "Caption",
            MessageKey::AddImage => "Add Image",
            MessageKey::UploadFailed => "Can not upload an image, try another",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStyle {
    Success,
    Error,
}

impl NotificationStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            NotificationStyle::Success => "success",
            NotificationStyle::Error => "error",
        }
    }
}

/// Host translation hook.
pub trait Translator {
    fn translate(&self, key: MessageKey) -> String;
}

/// Returns the key text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, key: MessageKey) -> String {
        key.as_str().to_string()
    }
}

/// A message for the host's notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub key: MessageKey,
    pub style: NotificationStyle,
}

impl Notification {
    pub const fn error(key: MessageKey) -> Self {
        Self {
            key,
            style: NotificationStyle::Error,
        }
    }

    pub fn message(&self, translator: &dyn Translator) -> String {
        translator.translate(self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shouting;

    impl Translator for Shouting {
        fn translate(&self, key: MessageKey) -> String {
            key.as_str().to_uppercase()
        }
    }

    #[test]
    fn identity_translator_returns_host_keys() {
        let got: Vec<String> = MessageKey::ALL
            .iter()
            .map(|k| IdentityTranslator.translate(*k))
            .collect();
        assert_eq!(
            got,
            vec!["Caption", "Add Image", "Can not upload an image, try another"]
        );
    }

    #[test]
    fn notification_goes_through_translator() {
        let n = Notification::error(MessageKey::UploadFailed);
        assert_eq!(n.style.as_str(), "error");
        assert_eq!(n.message(&Shouting), "CAN NOT UPLOAD AN IMAGE, TRY ANOTHER");
    }
}
