//! Rendering of alert and reminder messages.

use crate::models::{AlertEvent, BrandingConfig, LinkButton, NotificationContent};

/// Builds notification content from alert events and the configured branding
#[derive(Debug, Clone)]
pub struct MessageBuilder {
	branding: BrandingConfig,
}

impl MessageBuilder {
	pub fn new(branding: BrandingConfig) -> Self {
		Self { branding }
	}

	/// Renders the buy alert for one matched payment
	///
	/// The caption carries the amount with exactly four decimals. Buttons link to the
	/// transaction on the explorer and, when configured, to the buy page.
	pub fn alert(&self, event: &AlertEvent) -> NotificationContent {
		let name = &self.branding.token_name;
		let caption = format!(
			"🚀 *New {name} Buy Alert!* 🚀\n\n\
			 A new investor has just joined the {name} family!\n\n\
			 💰 *Amount:* {amount} {symbol}\n\n\
			 Let's give them a warm welcome! 🔥",
			name = name,
			amount = event.formatted_value(),
			symbol = self.branding.token_symbol,
		);

		let content = NotificationContent::text(caption)
			.with_image(self.branding.logo_url.clone())
			.with_button(LinkButton::new(
				"✅ View Transaction",
				format!("{}{}", self.branding.explorer_tx_url, event.tx_hash),
			));
		self.with_buy_button(content)
	}

	/// Renders the periodic reminder
	pub fn reminder(&self, text: &str) -> NotificationContent {
		let content =
			NotificationContent::text(text).with_image(self.branding.logo_url.clone());
		self.with_buy_button(content)
	}

	fn with_buy_button(&self, content: NotificationContent) -> NotificationContent {
		match &self.branding.buy_url {
			Some(url) => content.with_button(LinkButton::new(
				format!("💰 Buy {}", self.branding.token_name),
				url.clone(),
			)),
			None => content,
		}
	}
}
