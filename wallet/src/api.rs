//! HTTP client for the tanda backend API.
//!
//! The backend owns everything the ledger does not: authentication, room
//! records and membership, transaction sponsorship, the test-token faucet.
//! Responses are typed; error bodies are flattened to a single message,
//! preferring the response body's `error` field over the bare HTTP status.

use crate::error::WalletError;
use crate::sponsor::{SignedPayload, SponsorSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tanda_types::params::{TX_BUFFER_MS, USDC_DECIMALS};
use tanda_types::{Address, Timestamp};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorInfo {
    sponsor_address: Address,
}

/// Result of submitting a signed payload for sponsored execution.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsoredExecution {
    pub success: bool,
    #[serde(default)]
    pub digest: Option<String>,
    #[serde(default)]
    pub effects: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub subject: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub name: String,
    pub deposit_amount: u64,
    pub period_length_ms: u64,
    pub start_time_ms: u64,
    pub strategy_id: u32,
    pub max_participants: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CreateRoomRequest {
    /// A weekly room depositing `weekly_usdc` whole USDC per period, starting
    /// now. The start is backdated by the transaction buffer so the first
    /// period is immediately open.
    pub fn weekly(name: impl Into<String>, weekly_usdc: u64, max_participants: u32) -> Self {
        Self {
            name: name.into(),
            deposit_amount: weekly_usdc * USDC_DECIMALS,
            period_length_ms: tanda_types::params::PERIOD_LENGTH_MS,
            start_time_ms: Timestamp::now().as_millis().saturating_sub(TX_BUFFER_MS),
            strategy_id: 1,
            max_participants,
            password: None,
        }
    }

    /// A short-period room for exercising the full lifecycle quickly.
    pub fn test_mode(name: impl Into<String>, weekly_usdc: u64, max_participants: u32) -> Self {
        Self {
            period_length_ms: tanda_types::params::PERIOD_LENGTH_MS_TEST,
            ..Self::weekly(name, weekly_usdc, max_participants)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub deposit_amount: u64,
    pub period_length_ms: u64,
    pub start_time_ms: u64,
    pub strategy_id: u32,
    pub max_participants: u32,
    pub participant_count: u32,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub address: Address,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub position_id: Option<String>,
    #[serde(default)]
    pub deposits_made: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub digest: String,
    pub kind: String,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub amount: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPosition {
    pub room_id: String,
    pub position_id: String,
    pub deposits_made: u32,
    #[serde(default)]
    pub claimable: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetInfo {
    pub available: bool,
    #[serde(default)]
    pub amount_per_request: Option<u64>,
    #[serde(default)]
    pub cooldown_ms: Option<u64>,
}

/// Flatten an error response to a single message: the body's `error` field
/// when present, otherwise the raw body, otherwise the status line.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = json.get("error").and_then(Value::as_str) {
            return msg.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {body}")
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Api(format!("http client setup: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            auth_token: None,
        })
    }

    /// Attach a bearer token to all subsequent requests.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn read_response<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, WalletError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WalletError::Api(format!("{path}: {e}")))?;
        if !status.is_success() {
            return Err(WalletError::Api(error_message(status, &body)));
        }
        serde_json::from_str(&body)
            .map_err(|e| WalletError::Api(format!("{path}: unexpected response shape: {e}")))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, WalletError> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| WalletError::Api(format!("{path}: {e}")))?;
        self.read_response(path, response).await
    }

    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, WalletError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| WalletError::Api(format!("{path}: {e}")))?;
        self.read_response(path, response).await
    }

    // --- auth ---

    /// Exchange an identity-provider token for a backend session.
    pub async fn login(&self, id_token: impl Into<String>) -> Result<Session, WalletError> {
        self.post_json(
            "/auth/login",
            &LoginRequest {
                id_token: id_token.into(),
            },
        )
        .await
    }

    /// Check that the current bearer token is still accepted.
    pub async fn verify_session(&self) -> Result<Session, WalletError> {
        self.get_json("/auth/verify").await
    }

    // --- sponsorship ---

    /// The address that will own gas for sponsored transactions.
    pub async fn sponsor_lookup(&self) -> Result<Address, WalletError> {
        let info: SponsorInfo = self.get_json("/room/sponsor").await?;
        debug!(sponsor = %info.sponsor_address, "fetched sponsor address");
        Ok(info.sponsor_address)
    }

    /// Submit signed transaction bytes for sponsored execution.
    pub async fn execute_sponsored(
        &self,
        payload: &SignedPayload,
    ) -> Result<SponsoredExecution, WalletError> {
        self.post_json("/room/execute-sponsored", payload).await
    }

    // --- rooms ---

    pub async fn create_room(&self, request: &CreateRoomRequest) -> Result<RoomSummary, WalletError> {
        self.post_json("/room/create", request).await
    }

    pub async fn start_room(&self, room_id: &str) -> Result<RoomSummary, WalletError> {
        self.post_json(&format!("/room/{room_id}/start"), &Value::Null)
            .await
    }

    pub async fn finalize_room(&self, room_id: &str) -> Result<RoomSummary, WalletError> {
        self.post_json(&format!("/room/{room_id}/finalize"), &Value::Null)
            .await
    }

    pub async fn get_room(&self, room_id: &str) -> Result<RoomSummary, WalletError> {
        self.get_json(&format!("/room/{room_id}")).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, WalletError> {
        self.get_json("/room/list").await
    }

    pub async fn my_rooms(&self) -> Result<Vec<RoomSummary>, WalletError> {
        self.get_json("/room/mine").await
    }

    pub async fn room_participants(&self, room_id: &str) -> Result<Vec<Participant>, WalletError> {
        self.get_json(&format!("/room/{room_id}/participants")).await
    }

    pub async fn room_history(&self, room_id: &str) -> Result<Vec<HistoryEntry>, WalletError> {
        self.get_json(&format!("/room/{room_id}/history")).await
    }

    // --- player ---

    pub async fn player_position(&self, room_id: &str) -> Result<PlayerPosition, WalletError> {
        self.get_json(&format!("/player/position/{room_id}")).await
    }

    // --- faucet ---

    pub async fn faucet_info(&self) -> Result<FaucetInfo, WalletError> {
        self.get_json("/usdc/faucet").await
    }

    /// Request test tokens for `address`. Returns the executed digest.
    pub async fn mint_usdc(&self, address: &Address) -> Result<SponsoredExecution, WalletError> {
        self.post_json(
            "/usdc/mint",
            &serde_json::json!({ "address": address.to_string() }),
        )
        .await
    }

    pub async fn usdc_balance(&self, address: &Address) -> Result<u64, WalletError> {
        #[derive(Deserialize)]
        struct Balance {
            balance: u64,
        }
        let b: Balance = self
            .get_json(&format!("/usdc/balance/{address}"))
            .await?;
        Ok(b.balance)
    }
}

impl SponsorSource for ApiClient {
    async fn sponsor_address(&self) -> Result<Address, WalletError> {
        self.sponsor_lookup().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanda_types::params::{PERIOD_LENGTH_MS, PERIOD_LENGTH_MS_TEST};

    #[test]
    fn error_message_prefers_body_error_field() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        let msg = error_message(status, r#"{"error":"room is full"}"#);
        assert_eq!(msg, "room is full");
    }

    #[test]
    fn error_message_falls_back_to_body_then_status() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(
            error_message(status, "upstream timeout"),
            "HTTP 500 Internal Server Error: upstream timeout"
        );
        assert_eq!(error_message(status, ""), "HTTP 500 Internal Server Error");
    }

    #[test]
    fn error_message_ignores_non_string_error_field() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        let msg = error_message(status, r#"{"error":{"code":7}}"#);
        assert!(msg.starts_with("HTTP 400"));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:3001/").unwrap();
        assert_eq!(client.url("/room/sponsor"), "http://localhost:3001/room/sponsor");
    }

    #[test]
    fn weekly_room_request_converts_usdc_and_backdates_start() {
        let before = Timestamp::now().as_millis();
        let req = CreateRoomRequest::weekly("savers", 25, 10);
        assert_eq!(req.deposit_amount, 25 * USDC_DECIMALS);
        assert_eq!(req.period_length_ms, PERIOD_LENGTH_MS);
        assert!(req.start_time_ms <= before);
        assert!(req.password.is_none());
    }

    #[test]
    fn test_mode_room_uses_short_period() {
        let req = CreateRoomRequest::test_mode("fast", 1, 3);
        assert_eq!(req.period_length_ms, PERIOD_LENGTH_MS_TEST);
    }

    #[test]
    fn create_room_request_wire_names() {
        let req = CreateRoomRequest::weekly("savers", 25, 10);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"depositAmount\""));
        assert!(json.contains("\"periodLengthMs\""));
        assert!(json.contains("\"maxParticipants\""));
        assert!(!json.contains("\"password\""));
    }

    #[test]
    fn sponsored_execution_parses_minimal_body() {
        let exec: SponsoredExecution = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(exec.success);
        assert!(exec.digest.is_none());
        assert!(exec.effects.is_none());
        assert!(exec.error.is_none());
    }

    #[test]
    fn sponsored_execution_parses_full_body() {
        let exec: SponsoredExecution = serde_json::from_str(
            r#"{"success":true,"digest":"TxAbc","effects":{"created":[]}}"#,
        )
        .unwrap();
        assert_eq!(exec.digest.as_deref(), Some("TxAbc"));
        assert!(exec.effects.is_some());
    }

    #[test]
    fn sponsor_info_parses_wire_shape() {
        let addr = Address::new([0x11; 32]);
        let json = format!(r#"{{"sponsorAddress":"{addr}"}}"#);
        let info: SponsorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info.sponsor_address, addr);
    }
}
