//! Endpoint check suite for a running registration API.
//!
//! Start the server (`cargo run -p registration-api`) with a short
//! `REGISTRATION_DELAY_MS`, then run `cargo run -p endpoint-integration-tests`.
//! `API_BASE_URL` overrides the default target.

use chrono::{Datelike, Utc};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://localhost:3000"; // Local testing

pub struct ApiTestClient {
    client: Client,
    base_url: String,
}

impl ApiTestClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response, Box<dyn std::error::Error>> {
        Ok(self.client.get(format!("{}{}", self.base_url, path)).send().await?)
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Response, Box<dyn std::error::Error>> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?)
    }
}

/// Test results tracker
#[derive(Debug, Default)]
pub struct TestResults {
    pub passed: u32,
    pub failed: u32,
    pub failures: Vec<String>,
}

impl TestResults {
    pub fn pass(&mut self, test_name: &str) {
        self.passed += 1;
        println!("✅ {}", test_name);
    }

    pub fn fail(&mut self, test_name: &str, error: &str) {
        self.failed += 1;
        self.failures.push(format!("{}: {}", test_name, error));
        println!("❌ {}: {}", test_name, error);
    }

    pub fn expect_status(
        &mut self,
        test_name: &str,
        outcome: Result<Response, Box<dyn std::error::Error>>,
        expected: StatusCode,
    ) {
        match outcome {
            Ok(response) if response.status() == expected => self.pass(test_name),
            Ok(response) => self.fail(test_name, &format!("Status: {}", response.status())),
            Err(e) => self.fail(test_name, &e.to_string()),
        }
    }

    pub fn summary(&self) {
        println!("\n📊 Test Summary:");
        println!("✅ Passed: {}", self.passed);
        println!("❌ Failed: {}", self.failed);

        if !self.failures.is_empty() {
            println!("\n🔍 Failures:");
            for failure in &self.failures {
                println!("  - {}", failure);
            }
        }
    }
}

fn jane_payload() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "date_of_birth": "1990-01-01",
        "gender": "Female",
        "blood_type": "O+",
        "has_insurance": false,
        "emergency_contact": "5559876543"
    })
}

pub async fn run_endpoint_tests() -> Result<TestResults, Box<dyn std::error::Error>> {
    let client = ApiTestClient::new();
    let mut results = TestResults::default();

    println!("🚀 Starting Registration Endpoint Tests");
    println!("📍 Base URL: {}", client.base_url);

    results.expect_status("API liveness", client.get("/").await, StatusCode::OK);

    println!("\n📝 Registration Tests");

    results.expect_status(
        "Register valid patient",
        client.post("/registrations", jane_payload()).await,
        StatusCode::CREATED,
    );

    let mut short_name = jane_payload();
    short_name["name"] = json!("J");
    results.expect_status(
        "Reject short name",
        client.post("/registrations", short_name).await,
        StatusCode::BAD_REQUEST,
    );

    let mut too_old = jane_payload();
    too_old["date_of_birth"] = json!(format!("{}-01-01", Utc::now().year() - 200));
    results.expect_status(
        "Reject age over 150",
        client.post("/registrations", too_old).await,
        StatusCode::BAD_REQUEST,
    );

    let mut insured = jane_payload();
    insured["has_insurance"] = json!(true);
    insured["insurance_id"] = json!("AB123456");
    results.expect_status(
        "Register insured patient",
        client.post("/registrations", insured).await,
        StatusCode::CREATED,
    );

    println!("\n🔎 Helper Endpoint Tests");

    results.expect_status(
        "Validate form",
        client.post("/registrations/validate", jane_payload()).await,
        StatusCode::OK,
    );
    results.expect_status(
        "Format phone",
        client.get("/registrations/format-phone?phone=5551234567").await,
        StatusCode::OK,
    );

    Ok(results)
}

/// Entry point for endpoint tests
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let results = run_endpoint_tests().await?;
    results.summary();

    if results.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_tracking() {
        let mut results = TestResults::default();
        results.pass("a");
        results.fail("b", "Status: 500");

        assert_eq!(results.passed, 1);
        assert_eq!(results.failed, 1);
        assert_eq!(results.failures, vec!["b: Status: 500".to_string()]);
    }
}
