//! Wizard answers attached to a site.
//!
//! [`FormPayload`] is tagged by website type. Each variant holds only the
//! sections its wizard steps collect, so there is no "is this field relevant
//! for this type" check at render time. Sections are flattened when
//! serialized, keeping the flat `formData` object of the storage slot:
//!
//! ```text
//! { "websiteType": "others", "pageTitle": "Acme", "theme": "default", ... }
//! ```
//!
//! Media handles are ephemeral and never serialized; only their `*Url`
//! counterparts survive a reload.

use serde::{Deserialize, Serialize};

use crate::media::MediaHandle;
use crate::model::WebsiteType;

/// How the buyer pays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingType {
    #[default]
    Fixed,
    CustomerDecides,
    Free,
}

/// Page styling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageStyle {
    #[default]
    Design,
    Reset,
}

/// Where checkout happens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutType {
    #[default]
    SamePage,
    Customize,
}

/// Whether a listing ships one file or several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigitalFileType {
    #[default]
    Single,
    Multiple,
}

/// Page copy and optional content sections.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageDetails {
    pub page_title: String,
    pub category: String,
    #[serde(skip)]
    pub cover_image: Option<MediaHandle>,
    pub cover_image_url: String,
    pub description: String,
    pub primary_cta: String,

    // Optional sections
    pub gallery: bool,
    pub testimonial: bool,
    pub faq: bool,
    pub about_us: bool,
    pub show_product: bool,
    pub footer: bool,

    pub gallery_title: String,
    #[serde(skip)]
    pub gallery_cover_image: Option<MediaHandle>,
    pub gallery_cover_image_url: String,

    pub testimonial_name: String,
    pub testimonial_comment: String,
    #[serde(skip)]
    pub testimonial_image: Option<MediaHandle>,
    pub testimonial_image_url: String,

    pub faq_question: String,
    pub faq_answer: String,
}

/// Pricing step answers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PricingDetails {
    pub pricing_type: PricingType,
    pub price: String,
    pub discount_price: String,
    pub discount_offer: bool,
    pub purchasing_power_parity: bool,
    pub limit_purchases: bool,
}

/// Theme, checkout, policy, and tracking settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub theme: String,
    pub style: PageStyle,
    pub button_color: String,
    pub text_color: String,
    pub checkout_type: CheckoutType,
    pub email_required: bool,
    pub phone_required: bool,
    pub verification_order: bool,
    pub gst_price: String,
    pub terms_conditions: String,
    pub refund_policy: String,
    pub privacy_policy: String,
    pub page_url: String,
    pub post_purchase_behavior: String,
    pub meta_pixel_id: String,
    pub google_analytics_id: String,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            theme: "default".to_owned(),
            style: PageStyle::Design,
            button_color: "#000000".to_owned(),
            text_color: "#FFFFFF".to_owned(),
            checkout_type: CheckoutType::SamePage,
            email_required: true,
            phone_required: false,
            verification_order: false,
            gst_price: String::new(),
            terms_conditions: String::new(),
            refund_policy: String::new(),
            privacy_policy: String::new(),
            page_url: String::new(),
            post_purchase_behavior: String::new(),
            meta_pixel_id: String::new(),
            google_analytics_id: String::new(),
        }
    }
}

/// Deliverable files of a listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DigitalFiles {
    pub digital_file_type: DigitalFileType,
    pub digital_file_url: String,
    #[serde(skip)]
    pub digital_file_cover_image: Option<MediaHandle>,
    pub digital_file_cover_image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductDetails {
    pub product_title: String,
    pub product_description: String,
}

/// Storefront toggles of the settings step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSettings {
    pub page_expiry: bool,
    pub terms_enabled: bool,
    pub dark_theme: bool,
    pub deactivate_sales: bool,
    pub tracking_enabled: bool,
    pub color: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_expiry: true,
            terms_enabled: true,
            dark_theme: false,
            deactivate_sales: false,
            tracking_enabled: false,
            color: String::new(),
        }
    }
}

/// Wizard answers, one variant per [`WebsiteType`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "websiteType", rename_all = "kebab-case")]
pub enum FormPayload {
    /// Upload files, pricing, advanced settings.
    DigitalProducts {
        #[serde(flatten)]
        pricing: PricingDetails,
        #[serde(flatten)]
        advanced: AdvancedSettings,
    },
    /// Digital files, product details, pricing, settings.
    ListMultiple {
        #[serde(flatten)]
        files: DigitalFiles,
        #[serde(flatten)]
        product: ProductDetails,
        #[serde(flatten)]
        pricing: PricingDetails,
        #[serde(flatten)]
        settings: PageSettings,
    },
    /// Page details, advanced settings.
    ExistingProducts {
        #[serde(flatten)]
        page: PageDetails,
        #[serde(flatten)]
        advanced: AdvancedSettings,
    },
    /// Page details, advanced settings.
    Others {
        #[serde(flatten)]
        page: PageDetails,
        #[serde(flatten)]
        advanced: AdvancedSettings,
    },
}

impl FormPayload {
    /// Empty answers for a website type, with the wizard's initial values.
    #[must_use]
    pub fn new(website_type: WebsiteType) -> Self {
        match website_type {
            WebsiteType::DigitalProducts => Self::DigitalProducts {
                pricing: PricingDetails::default(),
                advanced: AdvancedSettings::default(),
            },
            WebsiteType::ListMultiple => Self::ListMultiple {
                files: DigitalFiles::default(),
                product: ProductDetails::default(),
                pricing: PricingDetails::default(),
                settings: PageSettings::default(),
            },
            WebsiteType::ExistingProducts => Self::ExistingProducts {
                page: PageDetails::default(),
                advanced: AdvancedSettings::default(),
            },
            WebsiteType::Others => Self::Others {
                page: PageDetails::default(),
                advanced: AdvancedSettings::default(),
            },
        }
    }

    /// Website type this payload belongs to.
    #[must_use]
    pub fn website_type(&self) -> WebsiteType {
        match self {
            Self::DigitalProducts { .. } => WebsiteType::DigitalProducts,
            Self::ListMultiple { .. } => WebsiteType::ListMultiple,
            Self::ExistingProducts { .. } => WebsiteType::ExistingProducts,
            Self::Others { .. } => WebsiteType::Others,
        }
    }

    /// Page title, if this type collects one and it is non-empty.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.page()
            .map(|p| p.page_title.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Price, if this type collects one and it is non-empty.
    #[must_use]
    pub fn price(&self) -> Option<&str> {
        self.pricing()
            .map(|p| p.price.as_str())
            .filter(|p| !p.is_empty())
    }

    /// Requested page URL, if set.
    #[must_use]
    pub fn page_url(&self) -> Option<&str> {
        self.advanced()
            .map(|a| a.page_url.as_str())
            .filter(|u| !u.is_empty())
    }

    #[must_use]
    pub fn page(&self) -> Option<&PageDetails> {
        match self {
            Self::ExistingProducts { page, .. } | Self::Others { page, .. } => Some(page),
            Self::DigitalProducts { .. } | Self::ListMultiple { .. } => None,
        }
    }

    pub fn page_mut(&mut self) -> Option<&mut PageDetails> {
        match self {
            Self::ExistingProducts { page, .. } | Self::Others { page, .. } => Some(page),
            Self::DigitalProducts { .. } | Self::ListMultiple { .. } => None,
        }
    }

    #[must_use]
    pub fn pricing(&self) -> Option<&PricingDetails> {
        match self {
            Self::DigitalProducts { pricing, .. } | Self::ListMultiple { pricing, .. } => {
                Some(pricing)
            }
            Self::ExistingProducts { .. } | Self::Others { .. } => None,
        }
    }

    pub fn pricing_mut(&mut self) -> Option<&mut PricingDetails> {
        match self {
            Self::DigitalProducts { pricing, .. } | Self::ListMultiple { pricing, .. } => {
                Some(pricing)
            }
            Self::ExistingProducts { .. } | Self::Others { .. } => None,
        }
    }

    #[must_use]
    pub fn advanced(&self) -> Option<&AdvancedSettings> {
        match self {
            Self::DigitalProducts { advanced, .. }
            | Self::ExistingProducts { advanced, .. }
            | Self::Others { advanced, .. } => Some(advanced),
            Self::ListMultiple { .. } => None,
        }
    }

    pub fn advanced_mut(&mut self) -> Option<&mut AdvancedSettings> {
        match self {
            Self::DigitalProducts { advanced, .. }
            | Self::ExistingProducts { advanced, .. }
            | Self::Others { advanced, .. } => Some(advanced),
            Self::ListMultiple { .. } => None,
        }
    }

    /// Drop every media handle, keeping the derived URLs.
    ///
    /// The result equals what a reload from storage yields.
    #[must_use]
    pub fn without_media(&self) -> Self {
        let mut payload = self.clone();
        match &mut payload {
            Self::ExistingProducts { page, .. } | Self::Others { page, .. } => {
                page.cover_image = None;
                page.gallery_cover_image = None;
                page.testimonial_image = None;
            }
            Self::ListMultiple { files, .. } => files.digital_file_cover_image = None,
            Self::DigitalProducts { .. } => {}
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn cover() -> MediaHandle {
        MediaHandle::new("cover.png", "image/png", 1024)
    }

    #[test]
    fn test_new_matches_website_type() {
        for t in WebsiteType::ALL {
            assert_eq!(FormPayload::new(t).website_type(), t);
        }
    }

    #[test]
    fn test_wizard_initial_values() {
        let payload = FormPayload::new(WebsiteType::DigitalProducts);
        let advanced = payload.advanced().unwrap();
        assert_eq!(advanced.theme, "default");
        assert_eq!(advanced.button_color, "#000000");
        assert_eq!(advanced.text_color, "#FFFFFF");
        assert!(advanced.email_required);
        assert_eq!(payload.pricing().unwrap().pricing_type, PricingType::Fixed);

        let FormPayload::ListMultiple { settings, files, .. } =
            FormPayload::new(WebsiteType::ListMultiple)
        else {
            panic!("expected list-multiple payload");
        };
        assert!(settings.page_expiry);
        assert!(settings.terms_enabled);
        assert_eq!(files.digital_file_type, DigitalFileType::Single);
    }

    #[test]
    fn test_title_only_for_page_types() {
        let mut payload = FormPayload::new(WebsiteType::Others);
        assert_eq!(payload.title(), None);

        payload.page_mut().unwrap().page_title = "Acme".to_owned();
        assert_eq!(payload.title(), Some("Acme"));

        let digital = FormPayload::new(WebsiteType::DigitalProducts);
        assert!(digital.page().is_none());
        assert_eq!(digital.title(), None);
    }

    #[test]
    fn test_price_only_for_pricing_types() {
        let mut payload = FormPayload::new(WebsiteType::ListMultiple);
        assert_eq!(payload.price(), None);

        payload.pricing_mut().unwrap().price = "₹499".to_owned();
        assert_eq!(payload.price(), Some("₹499"));

        assert!(FormPayload::new(WebsiteType::ExistingProducts).pricing().is_none());
    }

    #[test]
    fn test_serializes_flat_with_type_tag() {
        let mut payload = FormPayload::new(WebsiteType::Others);
        payload.page_mut().unwrap().page_title = "Acme Bakery".to_owned();

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["websiteType"], json!("others"));
        assert_eq!(value["pageTitle"], json!("Acme Bakery"));
        assert_eq!(value["checkoutType"], json!("same-page"));
        assert_eq!(value["emailRequired"], json!(true));
        assert!(value.get("page").is_none());
        assert!(value.get("coverImage").is_none());
    }

    #[test]
    fn test_deserializes_partial_object_with_defaults() {
        let payload: FormPayload = serde_json::from_value(json!({
            "websiteType": "digital-products",
            "price": "₹99",
            "pricingType": "customer-decides",
            "unknownField": 42
        }))
        .unwrap();

        assert_eq!(payload.website_type(), WebsiteType::DigitalProducts);
        assert_eq!(payload.price(), Some("₹99"));
        assert_eq!(
            payload.pricing().unwrap().pricing_type,
            PricingType::CustomerDecides
        );
        assert_eq!(payload.advanced().unwrap().theme, "default");
    }

    #[test]
    fn test_media_handles_are_not_persisted() {
        let mut payload = FormPayload::new(WebsiteType::ExistingProducts);
        {
            let page = payload.page_mut().unwrap();
            page.cover_image = Some(cover());
            page.cover_image_url = "blob:cover".to_owned();
        }

        let json = serde_json::to_string(&payload).unwrap();
        let back: FormPayload = serde_json::from_str(&json).unwrap();

        assert_eq!(back.page().unwrap().cover_image, None);
        assert_eq!(back.page().unwrap().cover_image_url, "blob:cover");
        assert_eq!(back, payload.without_media());
    }

    #[test]
    fn test_without_media_clears_list_cover() {
        let mut payload = FormPayload::new(WebsiteType::ListMultiple);
        if let FormPayload::ListMultiple { files, .. } = &mut payload {
            files.digital_file_cover_image = Some(cover());
        }

        let stripped = payload.without_media();

        let FormPayload::ListMultiple { files, .. } = stripped else {
            panic!("expected list-multiple payload");
        };
        assert_eq!(files.digital_file_cover_image, None);
    }

    #[test]
    fn test_missing_tag_is_rejected() {
        let result = serde_json::from_value::<FormPayload>(json!({ "pageTitle": "x" }));
        assert!(result.is_err());
    }
}
