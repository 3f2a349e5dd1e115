//! Wizard step sequences per website type.

use crate::model::WebsiteType;

/// A single wizard screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WizardStep {
    PageDetails,
    DigitalFiles,
    ProductDetails,
    Pricing,
    UploadFiles,
    AdvancedSettings,
    Settings,
    Success,
}

impl WizardStep {
    /// Heading shown for the step.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PageDetails => "Step Details",
            Self::DigitalFiles | Self::ProductDetails | Self::Pricing => "Checkout",
            Self::UploadFiles => "Payment Page",
            Self::AdvancedSettings => "Advanced Settings",
            Self::Settings => "Settings",
            Self::Success => "Complete",
        }
    }
}

impl WebsiteType {
    /// Steps the wizard walks through for this type, ending with
    /// [`WizardStep::Success`].
    #[must_use]
    pub fn step_flow(self) -> &'static [WizardStep] {
        use WizardStep::{
            AdvancedSettings, DigitalFiles, PageDetails, Pricing, ProductDetails, Settings,
            Success, UploadFiles,
        };

        match self {
            Self::DigitalProducts => &[UploadFiles, Pricing, AdvancedSettings, Success],
            Self::ListMultiple => &[DigitalFiles, ProductDetails, Pricing, Settings, Success],
            Self::ExistingProducts | Self::Others => &[PageDetails, AdvancedSettings, Success],
        }
    }

    /// Number of steps that collect input (the success screen excluded).
    #[must_use]
    pub fn input_step_count(self) -> usize {
        self.step_flow().len() - 1
    }
}

/// Progress label such as `"Step 2 - Checkout"` for the step at zero-based `index`.
#[must_use]
pub fn step_label(step: WizardStep, index: usize) -> String {
    format!("Step {} - {}", index + 1, step.label())
}
