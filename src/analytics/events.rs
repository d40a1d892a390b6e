//! Event names and builders for everything the portfolio reports.

use crate::domain::Locale;
use crate::models::AnalyticsEvent;
use chrono::SecondsFormat;

pub const CONTACT_FORM_SUBMITTED: &str = "Contact Form Submitted";
pub const CONTACT_FORM_ERROR: &str = "Contact Form Error";

/// `source` tags recorded with contact submissions.
pub const CONTACT_SOURCE: &str = "Portfolio Website";
pub const FORM_SOURCE: &str = "Portfolio Contact Form";

/// Current time as ISO-8601 UTC with millisecond precision.
pub fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Best-effort event emitted when the email service rejects a submission.
pub fn contact_form_error(error_message: &str, language: Locale) -> AnalyticsEvent {
    AnalyticsEvent::new(CONTACT_FORM_ERROR)
        .with("error_message", error_message)
        .with("language", language.as_str())
        .with("timestamp", iso_timestamp())
}

/// Visitor interactions the page layer reports outside the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioEvent {
    Loaded,
    LanguageChanged { language: Locale },
    NavigationClick { section: String },
    ResumeDownloaded { language: Locale, filename: String },
    ProjectClicked { project: String },
    SocialLinkClicked { platform: String },
}

impl PortfolioEvent {
    /// Resume download in `language`, with the matching localized file name.
    pub fn resume_downloaded(language: Locale, file_prefix: &str) -> Self {
        Self::ResumeDownloaded {
            language,
            filename: language.resume_filename(file_prefix),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loaded => "Portfolio Loaded",
            Self::LanguageChanged { .. } => "Language Changed",
            Self::NavigationClick { .. } => "Navigation Click",
            Self::ResumeDownloaded { .. } => "Resume Downloaded",
            Self::ProjectClicked { .. } => "Project Clicked",
            Self::SocialLinkClicked { .. } => "Social Link Clicked",
        }
    }

    /// Build the event. `distinct_id` is only recorded on page load.
    pub fn to_event(&self, distinct_id: Option<&str>) -> AnalyticsEvent {
        let event = AnalyticsEvent::new(self.name());

        match self {
            Self::Loaded => event
                .with("timestamp", iso_timestamp())
                .with("anonymous_id", distinct_id),
            Self::LanguageChanged { language } => event.with("language", language.as_str()),
            Self::NavigationClick { section } => event.with("section", section.as_str()),
            Self::ResumeDownloaded { language, filename } => event
                .with("language", language.as_str())
                .with("filename", filename.as_str()),
            Self::ProjectClicked { project } => event.with("project", project.as_str()),
            Self::SocialLinkClicked { platform } => event.with("platform", platform.as_str()),
        }
    }
}
