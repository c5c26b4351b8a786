//! Selector example - identify request sources from configuration strings.
//!
//! Run with:
//! ```
//! cargo run --example selectors
//! ```

use ratelimit_source::{RequestInfo, SourceExtractor, build};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let requests = vec![
        RequestInfo::new()
            .with_remote_addr("203.0.113.7:54321")
            .with_host("api.example.com")
            .with_header("X-Api-Key", "key-alpha"),
        RequestInfo::new()
            .with_remote_addr("198.51.100.20:40000")
            .with_host("API.example.com:8443"),
        // Malformed peer address
        RequestInfo::new()
            .with_remote_addr(":9000")
            .with_host("api.example.com")
            .with_header("x-api-key", "key-beta"),
    ];

    println!("=== Source Extraction Demo ===\n");

    for selector in ["client.ip", "request.host", "request.header.X-Api-Key"] {
        let extractor = build(selector)?;
        println!("Selector: {}", extractor.name());

        for (i, request) in requests.iter().enumerate() {
            match extractor.extract(request) {
                Ok(source) => println!(
                    "  request {}: token={:?} amount={}",
                    i + 1,
                    source.token(),
                    source.amount()
                ),
                Err(err) => println!("  request {}: failed: {}", i + 1, err),
            }
        }
        println!();
    }

    // Unknown selectors fail when the rule is built
    for selector in ["client.mac", "request.header."] {
        match build(selector) {
            Ok(extractor) => println!("unexpected extractor: {extractor}"),
            Err(err) => println!("Rejected {selector:?}: {err}"),
        }
    }

    Ok(())
}
