use std::future::Future;

use abai_models::contact::ContactForm;

/// Client of the contact form endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post the form to the endpoint.
    ///
    /// Fails only if no decodable response was received. Rejections by the
    /// endpoint are reported through [`ContactApiResponse`].
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiResponse {
    pub status: u16,
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ContactApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.success
    }
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(mut self, form: ContactForm, result: ContactApiResponse) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(mut self, form: ContactForm) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "error sending request: connection refused"
                ))))
            });
        self
    }
}
