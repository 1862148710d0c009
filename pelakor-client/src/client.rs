//! Typed PELAKOR API client.
//!
//! One choke point for all network I/O: every call goes through
//! [`ApiClient::send`], which owns the 30-second timeout, bearer-token
//! attachment, and error normalization. The typed methods below each document
//! one REST endpoint. No call retries, caches, or deduplicates; callers own
//! their own loading state and re-fetch after mutations.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use pelakor_core::{
    DisposisiDecision, DisposisiRecord, Laporan, LaporanDraft, LaporanPerubahan, Periode, Role,
    TindakLanjutDraft, TindakLanjutRecord, User, UserDraft, UserUpdate,
};

use crate::error::ApiError;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Whether the backend accepted the credentials.
    pub success: bool,
    /// Bearer token for subsequent calls.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Acknowledgement payload returned by mutations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    /// Whether the backend reports success; absent means success.
    #[serde(default)]
    pub success: Option<bool>,
    /// Server-provided message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// Whether the mutation succeeded.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }

    /// Server message, or a fixed default.
    pub fn message_or(&self, fallback: &'static str) -> String {
        self.message
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Error body shape the backend uses for rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the PELAKOR backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

/// Trim and normalize a base URL for consistent request building.
fn normalize_base_url(base_url: &str) -> Result<String, ApiError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiError::internal("alamat server belum dikonfigurasi"));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

impl ApiClient {
    /// Build a client for `base_url` without a token (login only).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .user_agent("pelakor")
            .build()
            .map_err(ApiError::from_reqwest)?;
        Ok(Self { http, base_url, token: None })
    }

    /// Attach a bearer token to every subsequent call.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a server-relative attachment path to an absolute URL.
    ///
    /// `None` or an empty path yields `None`; anything else is concatenated
    /// onto the base URL.
    pub fn file_url(&self, path: Option<&str>) -> Option<String> {
        let path = path?.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with('/') {
            Some(format!("{}{}", self.base_url, path))
        } else {
            Some(format!("{}/{}", self.base_url, path))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{method} {url}");
        self.http.request(method, url)
    }

    /// Execute a request and normalize the outcome.
    ///
    /// 204 yields `Ok(None)`; any other 2xx parses the JSON body; everything
    /// else becomes an [`ApiError`] per the failure taxonomy.
    async fn send(&self, builder: RequestBuilder) -> Result<Option<Value>, ApiError> {
        let mut builder = builder.timeout(REQUEST_TIMEOUT);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await.map_err(ApiError::from_reqwest)?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.message);
            return Err(ApiError::server(status.as_u16(), message));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_str(&body)
            .map_err(|err| ApiError::internal(format!("respons server tidak valid: {err}")))?;
        Ok(Some(value))
    }

    // === Auth ===

    /// `POST /api/auth/login` with `{identifier, password}`.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({ "identifier": identifier, "password": password });
        let value = self
            .send(self.request(Method::POST, "/api/auth/login").json(&body))
            .await?;
        decode_direct(value)
    }

    /// `GET /api/users/me`.
    pub async fn me(&self) -> Result<User, ApiError> {
        let value = self.send(self.request(Method::GET, "/api/users/me")).await?;
        decode_data(value)
    }

    // === Laporan ===

    /// `GET /api/laporan` — reports visible to the caller's role.
    pub async fn laporan_list(&self) -> Result<Vec<Laporan>, ApiError> {
        let value = self.send(self.request(Method::GET, "/api/laporan")).await?;
        decode_data(value)
    }

    /// `GET /api/laporan/:id`.
    pub async fn laporan_detail(&self, id: i64) -> Result<Laporan, ApiError> {
        let value = self
            .send(self.request(Method::GET, &format!("/api/laporan/{id}")))
            .await?;
        decode_data(value)
    }

    /// `POST /api/laporan` as multipart form data.
    ///
    /// The form carries exactly the draft's fields; when the draft has no
    /// attachment, no `lampiran` part is present at all.
    pub async fn laporan_create(&self, draft: &LaporanDraft) -> Result<MessageResponse, ApiError> {
        let mut form = Form::new()
            .text("judul_laporan", draft.judul().to_string())
            .text("isi_laporan", draft.isi().to_string());
        if let Some(kategori) = draft.kategori() {
            form = form.text("kategori", kategori.as_str());
        }
        if let Some(path) = draft.lampiran() {
            form = form.part("lampiran", file_part(path)?);
        }
        let value = self
            .send(self.request(Method::POST, "/api/laporan").multipart(form))
            .await?;
        message_response(value)
    }

    /// `PUT /api/laporan/:id` — only valid while the report is `diajukan`.
    pub async fn laporan_update(
        &self,
        id: i64,
        perubahan: &LaporanPerubahan,
    ) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::PUT, &format!("/api/laporan/{id}")).json(perubahan))
            .await?;
        message_response(value)
    }

    /// `DELETE /api/laporan/:id` — only valid while the report is `diajukan`.
    pub async fn laporan_delete(&self, id: i64) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::DELETE, &format!("/api/laporan/{id}")))
            .await?;
        message_response(value)
    }

    /// `GET /api/laporan/selesai` with optional `startDate`/`endDate` filters.
    pub async fn arsip_selesai(&self, periode: Option<&Periode>) -> Result<Vec<Laporan>, ApiError> {
        let mut builder = self.request(Method::GET, "/api/laporan/selesai");
        if let Some(periode) = periode {
            builder = builder.query(&[
                ("startDate", periode.mulai.format("%Y-%m-%d").to_string()),
                ("endDate", periode.selesai.format("%Y-%m-%d").to_string()),
            ]);
        }
        let value = self.send(builder).await?;
        decode_data(value)
    }

    // === Disposisi ===

    /// `GET /api/disposisi` — reports awaiting a decision.
    pub async fn disposisi_queue(&self) -> Result<Vec<Laporan>, ApiError> {
        let value = self.send(self.request(Method::GET, "/api/disposisi")).await?;
        decode_data(value)
    }

    /// `GET /api/disposisi/:laporan_id` — decision history for one report.
    pub async fn disposisi_history(&self, laporan_id: i64) -> Result<Vec<DisposisiRecord>, ApiError> {
        let value = self
            .send(self.request(Method::GET, &format!("/api/disposisi/{laporan_id}")))
            .await?;
        decode_data(value)
    }

    /// `POST /api/disposisi/:laporan_id` — submit an approve-or-reject
    /// decision. [`DisposisiDecision`] can only be built validated, so no
    /// invalid decision ever reaches this call.
    pub async fn disposisi_submit(
        &self,
        laporan_id: i64,
        decision: &DisposisiDecision,
    ) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(
                self.request(Method::POST, &format!("/api/disposisi/{laporan_id}"))
                    .json(decision),
            )
            .await?;
        message_response(value)
    }

    // === Tindak lanjut ===

    /// `GET /api/tindaklanjut` — reports assigned to the caller.
    pub async fn tindak_lanjut_queue(&self) -> Result<Vec<Laporan>, ApiError> {
        let value = self.send(self.request(Method::GET, "/api/tindaklanjut")).await?;
        decode_data(value)
    }

    /// `GET /api/tindaklanjut/:laporan_id` — follow-up history for one report.
    pub async fn tindak_lanjut_history(
        &self,
        laporan_id: i64,
    ) -> Result<Vec<TindakLanjutRecord>, ApiError> {
        let value = self
            .send(self.request(Method::GET, &format!("/api/tindaklanjut/{laporan_id}")))
            .await?;
        decode_data(value)
    }

    /// `POST /api/tindaklanjut/:laporan_id` as multipart form data.
    pub async fn tindak_lanjut_submit(
        &self,
        laporan_id: i64,
        draft: &TindakLanjutDraft,
    ) -> Result<MessageResponse, ApiError> {
        let mut form = Form::new()
            .text("catatan_tindak_lanjut", draft.catatan().to_string())
            .text("status_tindak_lanjut", draft.status().as_str());
        if let Some(path) = draft.lampiran() {
            form = form.part("lampiran", file_part(path)?);
        }
        let value = self
            .send(
                self.request(Method::POST, &format!("/api/tindaklanjut/{laporan_id}"))
                    .multipart(form),
            )
            .await?;
        message_response(value)
    }

    /// `PUT /api/tindaklanjut/:id` — edit the note and status of an entry.
    /// Attachment changes are not supported on update.
    pub async fn tindak_lanjut_update(
        &self,
        id_tindak_lanjut: i64,
        draft: &TindakLanjutDraft,
    ) -> Result<MessageResponse, ApiError> {
        let body = serde_json::json!({
            "catatan_tindak_lanjut": draft.catatan(),
            "status_tindak_lanjut": draft.status().as_str(),
        });
        let value = self
            .send(
                self.request(Method::PUT, &format!("/api/tindaklanjut/{id_tindak_lanjut}"))
                    .json(&body),
            )
            .await?;
        message_response(value)
    }

    /// `DELETE /api/tindaklanjut/:id`.
    pub async fn tindak_lanjut_delete(
        &self,
        id_tindak_lanjut: i64,
    ) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::DELETE, &format!("/api/tindaklanjut/{id_tindak_lanjut}")))
            .await?;
        message_response(value)
    }

    // === Users ===

    /// `GET /api/users` with optional role and unit filters.
    pub async fn users_list(
        &self,
        role: Option<Role>,
        unit_kerja: Option<&str>,
    ) -> Result<Vec<User>, ApiError> {
        let mut builder = self.request(Method::GET, "/api/users");
        if let Some(role) = role {
            builder = builder.query(&[("role", role.as_str())]);
        }
        if let Some(unit) = unit_kerja {
            builder = builder.query(&[("unit_kerja", unit)]);
        }
        let value = self.send(builder).await?;
        decode_data(value)
    }

    /// `POST /api/users`.
    pub async fn user_create(&self, draft: &UserDraft) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::POST, "/api/users").json(draft))
            .await?;
        message_response(value)
    }

    /// `PUT /api/users/:nip` — the NIP itself is immutable and only appears
    /// in the path.
    pub async fn user_update(
        &self,
        nip: &str,
        update: &UserUpdate,
    ) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::PUT, &format!("/api/users/{nip}")).json(update))
            .await?;
        message_response(value)
    }

    /// `DELETE /api/users/:nip`.
    pub async fn user_delete(&self, nip: &str) -> Result<MessageResponse, ApiError> {
        let value = self
            .send(self.request(Method::DELETE, &format!("/api/users/{nip}")))
            .await?;
        message_response(value)
    }
}

/// Read an attachment into a multipart part.
fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = std::fs::read(path)
        .map_err(|err| ApiError::internal(format!("gagal membaca lampiran: {err}")))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("lampiran")
        .to_string();
    Ok(Part::bytes(bytes).file_name(file_name))
}

/// Decode a body that must be present, unwrapping a `{"data": ...}` envelope
/// when the server uses one.
fn decode_data<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::internal("respons kosong dari server"))?;
    let payload = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(payload)
        .map_err(|err| ApiError::internal(format!("gagal membaca respons: {err}")))
}

/// Decode a body that must be present, without envelope unwrapping.
fn decode_direct<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::internal("respons kosong dari server"))?;
    serde_json::from_value(value)
        .map_err(|err| ApiError::internal(format!("gagal membaca respons: {err}")))
}

/// Decode a mutation acknowledgement; a 204 body yields the default.
fn message_response(value: Option<Value>) -> Result<MessageResponse, ApiError> {
    match value {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| ApiError::internal(format!("gagal membaca respons: {err}"))),
        None => Ok(MessageResponse::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, decode_data, message_response, normalize_base_url};
    use crate::error::{ApiError, GENERIC_MESSAGE};
    use httpmock::Method::{DELETE, GET, POST};
    use httpmock::MockServer;
    use pelakor_core::{DisposisiDecision, Kategori, LaporanDraft, Periode, Role};
    use serde_json::json;

    fn sample_user_json() -> serde_json::Value {
        json!({
            "nama": "Budi",
            "nip": "12345",
            "email": "budi@pemkab.go.id",
            "role": "pegawai",
            "jabatan": "Staf",
            "unit_kerja": "{\"Bagian Umum\"}"
        })
    }

    fn sample_laporan_json(id: i64, status: &str) -> serde_json::Value {
        json!({
            "id_laporan": id,
            "judul_laporan": "Kerusakan AC",
            "isi_laporan": "AC rusak",
            "kategori": "kerusakan",
            "status_laporan": status,
            "nip_pelapor": "12345",
            "pelapor": "Budi",
            "created_at": "2024-01-15T08:30:00Z"
        })
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        let url = normalize_base_url("https://pelakor.example.id/ ").expect("url");
        assert_eq!(url, "https://pelakor.example.id");
        assert!(normalize_base_url("   ").is_err());
    }

    #[test]
    fn file_url_resolves_relative_paths() {
        let client = ApiClient::new("https://pelakor.example.id").expect("client");
        assert_eq!(client.file_url(None), None);
        assert_eq!(client.file_url(Some("")), None);
        assert_eq!(
            client.file_url(Some("/uploads/x.png")),
            Some("https://pelakor.example.id/uploads/x.png".to_string())
        );
        assert_eq!(
            client.file_url(Some("uploads/x.png")),
            Some("https://pelakor.example.id/uploads/x.png".to_string())
        );
    }

    #[test]
    fn decode_data_unwraps_envelope_and_bare_bodies() {
        let enveloped = json!({ "success": true, "data": [1, 2, 3] });
        let values: Vec<i64> = decode_data(Some(enveloped)).expect("enveloped");
        assert_eq!(values, vec![1, 2, 3]);

        let bare = json!([4, 5]);
        let values: Vec<i64> = decode_data(Some(bare)).expect("bare");
        assert_eq!(values, vec![4, 5]);

        let missing: Result<Vec<i64>, ApiError> = decode_data(None);
        assert_eq!(missing.unwrap_err().status, 500);
    }

    #[test]
    fn message_response_defaults_on_empty_body() {
        let response = message_response(None).expect("default");
        assert!(response.is_success());
        assert_eq!(response.message_or("tersimpan"), "tersimpan");
    }

    #[tokio::test]
    async fn login_posts_credentials_and_parses_session() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/auth/login")
                .json_body(json!({ "identifier": "12345", "password": "rahasia" }));
            then.status(200).json_body(json!({
                "success": true,
                "token": "tok-1",
                "user": sample_user_json()
            }));
        });

        let client = ApiClient::new(&server.base_url()).expect("client");
        let session = client.login("12345", "rahasia").await.expect("login");

        mock.assert();
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.role, Role::Pegawai);
    }

    #[tokio::test]
    async fn bearer_token_is_attached_to_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/laporan")
                .header("authorization", "Bearer tok-1");
            then.status(200)
                .json_body(json!({ "success": true, "data": [sample_laporan_json(1, "diajukan")] }));
        });

        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok-1");
        let reports = client.laporan_list().await.expect("list");

        mock.assert();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id_laporan, 1);
    }

    #[tokio::test]
    async fn no_content_yields_default_acknowledgement() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/laporan/7");
            then.status(204);
        });

        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        let response = client.laporan_delete(7).await.expect("delete");

        mock.assert();
        assert!(response.is_success());
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn server_rejection_carries_status_and_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/laporan/9");
            then.status(404).json_body(json!({ "message": "Laporan tidak ditemukan" }));
        });

        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        let err = client.laporan_detail(9).await.unwrap_err();

        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Laporan tidak ditemukan");
    }

    #[tokio::test]
    async fn server_rejection_without_body_falls_back_to_generic_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/laporan");
            then.status(500);
        });

        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        let err = client.laporan_list().await.unwrap_err();

        assert_eq!(err.status, 500);
        assert_eq!(err.message, GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_status_zero() {
        // Nothing listens on port 1; the connect error must classify as a
        // network failure, not a server error.
        let client = ApiClient::new("http://127.0.0.1:1").expect("client");
        let err = client.laporan_list().await.unwrap_err();
        assert_eq!(err.status, 0);
    }

    #[tokio::test]
    async fn laporan_create_sends_only_present_fields() {
        let server = MockServer::start();
        // A form carrying an attachment part must never match: the draft has
        // no attachment, so no `lampiran` key may be present.
        let with_lampiran = server.mock(|when, then| {
            when.method(POST).path("/api/laporan").body_contains("name=\"lampiran\"");
            then.status(400);
        });
        let accepted = server.mock(|when, then| {
            when.method(POST)
                .path("/api/laporan")
                .body_contains("name=\"judul_laporan\"")
                .body_contains("Kerusakan AC")
                .body_contains("name=\"isi_laporan\"")
                .body_contains("AC rusak")
                .body_contains("name=\"kategori\"")
                .body_contains("kerusakan");
            then.status(201).json_body(json!({ "success": true, "message": "tersimpan" }));
        });

        let draft = LaporanDraft::new("Kerusakan AC", "AC rusak", Some(Kategori::Kerusakan), None)
            .expect("draft");
        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        let response = client.laporan_create(&draft).await.expect("create");

        accepted.assert();
        with_lampiran.assert_hits(0);
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn disposisi_submit_sends_exact_decision_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/disposisi/42").json_body(json!({
                "nip_penanggung_jawab": "12345",
                "catatan_disposisi": "Segera tangani",
                "valid": true
            }));
            then.status(200).json_body(json!({ "success": true }));
        });

        let decision = DisposisiDecision::approve("12345", "Segera tangani").expect("decision");
        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        client.disposisi_submit(42, &decision).await.expect("submit");

        mock.assert();
    }

    #[tokio::test]
    async fn arsip_selesai_passes_date_filters() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/laporan/selesai")
                .query_param("startDate", "2024-01-01")
                .query_param("endDate", "2024-01-31");
            then.status(200)
                .json_body(json!({ "success": true, "data": [sample_laporan_json(3, "selesai")] }));
        });

        let periode = Periode::new(
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .expect("periode");
        let client = ApiClient::new(&server.base_url()).expect("client").with_token("tok");
        let reports = client.arsip_selesai(Some(&periode)).await.expect("arsip");

        mock.assert();
        assert_eq!(reports.len(), 1);
    }
}
