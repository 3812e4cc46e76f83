//! Replay of recorded Cloudflare API interactions
//!
//! Cassettes live in `testdata/cassettes/<name>.yaml` and hold the request
//! and response of every API call made while generating one resource type.
//! They are served from a wiremock server so the whole generate/import path
//! runs against the real HTTP client.

#![allow(dead_code)]

use cf_terraforming::cloudflare::{CloudflareClient, Credentials, SENSITIVE_HEADERS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ZONE_ID: &str = "0da42c8d2132a9ddaf714f9e7c920711";
pub const ACCOUNT_ID: &str = "f037e56e89293a057740de681ac9abbe";

/// Request headers dropped from recordings in addition to credentials
const SCRUBBED_REQUEST_HEADERS: &[&str] = &["User-Agent"];

/// Response headers that change on every call
const SCRUBBED_RESPONSE_HEADERS: &[&str] = &[
    "Cf-Cache-Status",
    "Cf-Ray",
    "Date",
    "Server",
    "Set-Cookie",
    "X-Envoy-Upstream-Service-Time",
];

#[derive(Debug, Deserialize)]
pub struct Cassette {
    #[serde(default)]
    pub version: u32,
    pub interactions: Vec<Interaction>,
}

#[derive(Debug, Deserialize)]
pub struct Interaction {
    pub request: RecordedRequest,
    pub response: RecordedResponse,
}

#[derive(Debug, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct RecordedResponse {
    pub code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub body: String,
}

fn testdata(parts: &[&str]) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata");
    for part in parts {
        path.push(part);
    }
    path
}

/// Read a cassette without scrubbing it
pub fn read_cassette(name: &str) -> Cassette {
    let path = testdata(&["cassettes", &format!("{}.yaml", name)]);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e))
}

/// Read a cassette and drop credentials and volatile headers
pub fn load_cassette(name: &str) -> Cassette {
    let mut cassette = read_cassette(name);
    scrub(&mut cassette);
    cassette
}

pub fn scrub(cassette: &mut Cassette) {
    for interaction in &mut cassette.interactions {
        interaction.request.headers.retain(|name, _| {
            !SENSITIVE_HEADERS
                .iter()
                .chain(SCRUBBED_REQUEST_HEADERS)
                .any(|h| h.eq_ignore_ascii_case(name))
        });
        interaction
            .response
            .headers
            .retain(|name, _| !SCRUBBED_RESPONSE_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name)));
    }
}

/// Serve every recorded interaction from the mock server
pub async fn mount(server: &MockServer, cassette: &Cassette) {
    for interaction in &cassette.interactions {
        let url = Url::parse(&interaction.request.url).expect("recorded url should parse");

        let mut mock = Mock::given(method(interaction.request.method.as_str())).and(path(url.path()));
        for (key, value) in url.query_pairs() {
            mock = mock.and(query_param(key.into_owned(), value.into_owned()));
        }

        let mut template =
            ResponseTemplate::new(interaction.response.code).set_body_string(interaction.response.body.clone());
        for (name, values) in &interaction.response.headers {
            template = template.insert_header(name.as_str(), values.join(", ").as_str());
        }

        mock.respond_with(template).mount(server).await;
    }
}

/// Start a server replaying the named cassette and a client pointed at it
pub async fn replay(name: &str) -> (MockServer, CloudflareClient) {
    let server = MockServer::start().await;
    mount(&server, &load_cassette(name)).await;

    let client = CloudflareClient::with_base_url(
        &format!("{}/client/v4", server.uri()),
        Credentials::api_token("test-token"),
    )
    .expect("client should build");

    (server, client)
}

/// Expected Terraform output for a fixture
pub fn expected_terraform(name: &str) -> String {
    let path = testdata(&["terraform", &format!("{}.tf", name)]);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
        .trim_end()
        .to_string()
}
