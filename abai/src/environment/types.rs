use abai_core_contact_impl::ContactFeatureServiceImpl;
use abai_core_site_impl::SiteFeatureServiceImpl;
use abai_email_impl::EmailServiceImpl;
use abai_extern_impl::{contact::ContactApiServiceImpl, mailjet::MailjetApiServiceImpl};
use abai_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = abai_api_rest::RestServer<ContactFeature, SiteFeature>;

// Email
pub type Email = EmailServiceImpl<MailjetApi>;

// Extern
pub type MailjetApi = MailjetApiServiceImpl;
pub type ContactApi = ContactApiServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type SiteFeature = SiteFeatureServiceImpl<Time>;
