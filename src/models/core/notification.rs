use serde::{Deserialize, Serialize};

/// A labeled hyperlink rendered as a button under the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkButton {
	pub label: String,
	pub url: String,
}

impl LinkButton {
	pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			url: url.into(),
		}
	}
}

/// Content of an outgoing notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
	/// Message text, or the caption when an image is attached
	pub text: String,
	/// Optional image URL shown above the caption
	pub image_url: Option<String>,
	/// Link buttons, one per row
	pub buttons: Vec<LinkButton>,
}

impl NotificationContent {
	pub fn text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Default::default()
		}
	}

	pub fn with_image(mut self, image_url: Option<String>) -> Self {
		self.image_url = image_url;
		self
	}

	pub fn with_button(mut self, button: LinkButton) -> Self {
		self.buttons.push(button);
		self
	}
}
