//! Scores credit requests stored in a JSON file without starting the server.
//!
//! Usage: `score-file <requests.json> [--explain]`
//!
//! The file holds a single request object or an array of them. One JSON line
//! is printed per request; `--explain` adds the feature vector.

use chrono::Utc;
use credit_risk_api::models::CreditRequest;
use credit_risk_api::service::CreditAssessmentService;
use credit_risk_api::validation::validate_request;
use serde_json::{json, Value};

fn main() -> anyhow::Result<()> {
    // Keep stdout for result lines
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let explain = args.iter().any(|a| a == "--explain");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or_else(|| anyhow::anyhow!("usage: score-file <requests.json> [--explain]"))?;

    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
    let requests: Vec<CreditRequest> = match serde_json::from_str::<Value>(&raw)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };

    let service = CreditAssessmentService::default();
    let total = requests.len();
    let mut failed = 0;

    for request in &requests {
        let outcome = validate_request(request)
            .map_err(|e| e.to_string())
            .and_then(|_| {
                service
                    .assess_explained(request, Utc::now())
                    .map_err(|e| e.to_string())
            });

        let line = match outcome {
            Ok((result, features)) => {
                let mut line = json!({ "result": result });
                if explain {
                    line["features"] = json!(features);
                }
                line
            }
            Err(e) => {
                failed += 1;
                json!({ "user_id": request.user_id, "error": e })
            }
        };
        println!("{}", line);
    }

    tracing::info!("Scored {} request(s), {} failed", total, failed);

    if failed > 0 {
        anyhow::bail!("{} of {} request(s) could not be scored", failed, total);
    }
    Ok(())
}
