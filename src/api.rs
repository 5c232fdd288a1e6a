// API client module: a small blocking HTTP client that looks variants
// up in the annotation service (Ensembl VEP by default) and turns the
// answers into report rows.
//
// The network sits behind the `Transport` trait so the lookup and batch
// logic can run against `mock::MockTransport` in tests.

use crate::config::{Config, VARIANT_PLACEHOLDER};
use crate::error::{AnnotationError, ClientError, Result};
use crate::record::{AnnotationRecord, AnnotationReport};
use crate::variants::parse_variants;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Status code and body text of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Anything below 400 counts as ok, redirects included.
    pub fn is_ok(&self) -> bool {
        self.status < 400
    }
}

/// Issues a single GET and hands back whatever the server said.
///
/// Implementations must not interpret the status code; that is the
/// client's job.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RawResponse>;
}

/// `Transport` backed by a reqwest blocking client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::from_client(client))
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RawResponse> {
        let res = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .map_err(|e| ClientError::Request {
                message: format!("GET {}: {}", url, e),
                source: Some(e),
            })?;
        let status = res.status().as_u16();
        let body = res.text().map_err(|e| ClientError::Request {
            message: format!("Failed to read response body: {}", e),
            source: Some(e),
        })?;
        Ok(RawResponse { status, body })
    }
}

/// A scalar JSON value that ends up as text in the report.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// The part of a VEP result object we read. Only the first element of
/// the response array is decoded against this.
#[derive(Debug, Deserialize)]
struct VepResult {
    assembly_name: FieldValue,
    seq_region_name: FieldValue,
    start: FieldValue,
    end: FieldValue,
    most_severe_consequence: FieldValue,
    strand: FieldValue,
    transcript_consequences: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TranscriptConsequence {
    gene_symbol: FieldValue,
}

/// Receives progress events from a batch run.
///
/// `on_failure` is the diagnostic channel: it fires once per variant that
/// produced no row and never for a successful one.
pub trait BatchObserver {
    fn on_start(&mut self, _total: usize) {}

    fn on_success(&mut self, _record: &AnnotationRecord) {}

    fn on_failure(&mut self, variant: &str, error: &ClientError);
}

/// Default observer: logs each failed variant at WARN.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BatchObserver for LogObserver {
    fn on_failure(&mut self, variant: &str, error: &ClientError) {
        warn!("{}", failure_message(variant, error));
    }
}

/// Human-readable diagnostic for a variant that failed to annotate.
pub fn failure_message(variant: &str, error: &ClientError) -> String {
    format!(
        "Variant {} Encountered Annotation Exception\nException:{}",
        variant, error
    )
}

/// Client that holds a transport and the endpoint template.
#[derive(Clone)]
pub struct AnnotationClient<T = HttpTransport> {
    transport: T,
    variant_endpoint: String,
}

impl AnnotationClient<HttpTransport> {
    /// Create a client configured from `TVAC_VARIANT_ENDPOINT`, the user
    /// config file, or the built-in Ensembl endpoint. See `Config::load`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::load())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_transport(HttpTransport::new()?, config.variant_endpoint.clone())
    }
}

impl<T: Transport> AnnotationClient<T> {
    /// Build a client over any transport. The template must contain the
    /// `{variant}` placeholder exactly once.
    pub fn with_transport(transport: T, variant_endpoint: impl Into<String>) -> Result<Self> {
        let variant_endpoint = variant_endpoint.into();
        let placeholders = variant_endpoint.matches(VARIANT_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(ClientError::Config(format!(
                "endpoint template {:?} must contain {} exactly once (found {})",
                variant_endpoint, VARIANT_PLACEHOLDER, placeholders
            )));
        }
        Ok(Self {
            transport,
            variant_endpoint,
        })
    }

    pub fn variant_endpoint(&self) -> &str {
        &self.variant_endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// URL for one variant. The identifier is inserted as-is.
    pub fn url_for(&self, variant: &str) -> String {
        self.variant_endpoint.replacen(VARIANT_PLACEHOLDER, variant, 1)
    }

    /// Look up one variant and map the first result into a record.
    pub fn annotate_variant(&self, variant: &str) -> Result<AnnotationRecord> {
        let url = self.url_for(variant);
        debug!("GET {}", url);
        let res = self.transport.get(&url)?;
        if !res.is_ok() {
            return Err(AnnotationError {
                status: res.status,
                body: res.body,
            }
            .into());
        }
        parse_record(variant, &res.body)
    }

    /// Annotate `variants` in order, one request at a time. Failures are
    /// reported to `observer` and leave no row behind.
    pub fn annotate_variants<O: BatchObserver>(
        &self,
        variants: &[String],
        observer: &mut O,
    ) -> AnnotationReport {
        let mut report = AnnotationReport::new();
        observer.on_start(variants.len());
        for variant in variants {
            match self.annotate_variant(variant) {
                Ok(record) => {
                    observer.on_success(&record);
                    report.push(record);
                }
                Err(e) => observer.on_failure(variant, &e),
            }
        }
        info!(
            "Annotated {} of {} variants",
            report.len(),
            variants.len()
        );
        report
    }

    /// Read the variant list at `path` and annotate it. Only an unreadable
    /// file is an error here.
    pub fn annotate_file_with<O: BatchObserver>(
        &self,
        path: &Path,
        observer: &mut O,
    ) -> Result<AnnotationReport> {
        let variants = parse_variants(path)?;
        Ok(self.annotate_variants(&variants, observer))
    }

    /// `annotate_file_with` using `LogObserver`.
    pub fn annotate_file(&self, path: &Path) -> Result<AnnotationReport> {
        self.annotate_file_with(path, &mut LogObserver)
    }
}

fn malformed(msg: impl Into<String>) -> ClientError {
    ClientError::MalformedResponse(msg.into())
}

/// Decode a successful response body into a record for `variant`.
fn parse_record(variant: &str, body: &str) -> Result<AnnotationRecord> {
    let results: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| malformed(format!("expected a JSON array: {}", e)))?;
    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty result array"))?;
    let result: VepResult =
        serde_json::from_value(first).map_err(|e| malformed(format!("result: {}", e)))?;

    let consequence = result
        .transcript_consequences
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty transcript_consequences"))?;
    let consequence: TranscriptConsequence = serde_json::from_value(consequence)
        .map_err(|e| malformed(format!("transcript_consequences: {}", e)))?;

    Ok(AnnotationRecord {
        variant: variant.to_string(),
        assembly_name: result.assembly_name.to_string(),
        seq_region_name: result.seq_region_name.to_string(),
        start: result.start.to_string(),
        end: result.end.to_string(),
        most_severe_consequence: result.most_severe_consequence.to_string(),
        strand: result.strand.to_string(),
        gene_symbol: consequence.gene_symbol.to_string(),
    })
}
