//! Integration tests for the palaver library.
//! These tests require an API key in the environment to run.

#[cfg(test)]
mod tests {
    use palaver::{Client, ClientConfig};

    #[tokio::test]
    async fn test_simple_completion_request() {
        // This test requires PALAVER_API_KEY to be set
        let api_key = std::env::var("PALAVER_API_KEY").ok();
        let Some(api_key) = api_key else {
            eprintln!("Skipping test: PALAVER_API_KEY not set");
            return;
        };

        let client = Client::new(ClientConfig::new(api_key)).expect("Failed to create client");

        let response = client.send_message("Say 'test passed'", &[]).await;
        assert!(
            response.is_ok(),
            "Request should succeed with valid API key"
        );
        assert!(!response.unwrap().is_empty());
    }
}
