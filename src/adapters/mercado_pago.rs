use {
    crate::config::GatewayConfig,
    crate::domain::{
        error::BookingError,
        gateway::{
            CanonicalPayment, GatewayStatus, IssuedPreference, PaymentGateway, PreferenceRequest,
        },
        id::{PaymentId, PreferenceId},
    },
    serde::{Deserialize, Serialize},
    std::{future::Future, pin::Pin},
};

/// REST adapter for the provider. Built from an explicit `GatewayConfig`
/// passed by value, so there is no process-wide client singleton. Every request
/// carries the configured timeout; a timed-out call surfaces as
/// `GatewayUnavailable`, never as a payment outcome.
pub struct MercadoPagoGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl MercadoPagoGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, BookingError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BookingError::GatewayUnavailable(format!("http client: {e}")))?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn execute<T>(&self, request: reqwest::RequestBuilder, what: &str) -> Result<T, BookingError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = request
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| BookingError::GatewayUnavailable(format!("{what}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BookingError::GatewayUnavailable(format!("{what}: bad response body: {e}")));
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            Err(BookingError::GatewayUnavailable(format!(
                "{what}: {status}: {body}"
            )))
        } else {
            Err(BookingError::GatewayRejected(format!(
                "{what}: {status}: {body}"
            )))
        }
    }

    async fn create_preference_inner(
        &self,
        request: &PreferenceRequest,
    ) -> Result<IssuedPreference, BookingError> {
        let body = PreferenceBody {
            items: [PreferenceItem {
                title: &request.title,
                quantity: request.quantity,
                unit_price: request.unit_price.amount(),
                currency_id: request.currency.provider_code(),
            }],
            external_reference: &request.external_reference,
            back_urls: BackUrlsBody {
                success: &request.back_urls.success,
                failure: &request.back_urls.failure,
                pending: &request.back_urls.pending,
            },
            auto_return: "approved",
            notification_url: request.notification_url.as_deref(),
        };

        let response: PreferenceResponse = self
            .execute(
                self.http.post(self.url("/checkout/preferences")).json(&body),
                "create preference",
            )
            .await?;

        Ok(IssuedPreference {
            id: PreferenceId::new(response.id)?,
            checkout_url: response.init_point,
        })
    }

    async fn fetch_payment_inner(&self, id: &PaymentId) -> Result<CanonicalPayment, BookingError> {
        let response: PaymentResponse = self
            .execute(
                self.http.get(self.url(&format!("/v1/payments/{id}"))),
                "fetch payment",
            )
            .await?;

        Ok(CanonicalPayment {
            id: id.clone(),
            status: provider_status(response.status.as_deref()),
            external_reference: response.external_reference,
        })
    }

    async fn find_payment_inner(
        &self,
        external_reference: &str,
    ) -> Result<Option<CanonicalPayment>, BookingError> {
        let response: PaymentSearchResponse = self
            .execute(
                self.http.get(self.url("/v1/payments/search")).query(&[
                    ("external_reference", external_reference),
                    ("sort", "date_created"),
                    ("criteria", "desc"),
                ]),
                "search payments",
            )
            .await?;

        if response.results.is_empty() {
            return Ok(None);
        }

        // A reservation can accumulate attempts (a rejection, then an
        // approval). Prefer the first settled attempt over the newest.
        let chosen = response
            .results
            .iter()
            .position(|r| provider_status(r.status.as_deref()).settles_to().is_some())
            .unwrap_or(0);
        let result = &response.results[chosen];

        Ok(Some(CanonicalPayment {
            id: PaymentId::new(result.id.to_string())?,
            status: provider_status(result.status.as_deref()),
            external_reference: result.external_reference.clone(),
        }))
    }
}

fn provider_status(status: Option<&str>) -> GatewayStatus {
    status.map(GatewayStatus::from_provider).unwrap_or(GatewayStatus::Unknown)
}

impl PaymentGateway for MercadoPagoGateway {
    fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<IssuedPreference, BookingError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move { self.create_preference_inner(&request).await })
    }

    fn fetch_payment(
        &self,
        id: &PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<CanonicalPayment, BookingError>> + Send + '_>> {
        let id = id.clone();
        Box::pin(async move { self.fetch_payment_inner(&id).await })
    }

    fn find_payment_by_reference(
        &self,
        external_reference: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CanonicalPayment>, BookingError>> + Send + '_>>
    {
        let external_reference = external_reference.to_string();
        Box::pin(async move { self.find_payment_inner(&external_reference).await })
    }
}

// ── Wire types ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PreferenceBody<'a> {
    items: [PreferenceItem<'a>; 1],
    external_reference: &'a str,
    back_urls: BackUrlsBody<'a>,
    auto_return: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_url: Option<&'a str>,
}

#[derive(Serialize)]
struct PreferenceItem<'a> {
    title: &'a str,
    quantity: u32,
    unit_price: i64,
    currency_id: &'a str,
}

#[derive(Serialize)]
struct BackUrlsBody<'a> {
    success: &'a str,
    failure: &'a str,
    pending: &'a str,
}

#[derive(Deserialize)]
struct PreferenceResponse {
    id: String,
    init_point: String,
}

#[derive(Deserialize)]
struct PaymentResponse {
    status: Option<String>,
    external_reference: Option<String>,
}

#[derive(Deserialize)]
struct PaymentSearchResponse {
    results: Vec<PaymentSearchResult>,
}

#[derive(Deserialize)]
struct PaymentSearchResult {
    id: i64,
    status: Option<String>,
    external_reference: Option<String>,
}
