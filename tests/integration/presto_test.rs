//! Federated engine tests.
//!
//! These tests require a running engine with both demo catalogs loaded.
//! Set PRESTO_URL (e.g. `http://localhost:8080`) to run them.

use fedsql_demo::config::PrestoConfig;
use fedsql_demo::db::{DatabaseClient, PrestoClient};
use fedsql_demo::demo::{federated_queries, run_queries};
use url::Url;

fn get_test_config() -> Option<PrestoConfig> {
    let url = Url::parse(&std::env::var("PRESTO_URL").ok()?).ok()?;
    Some(PrestoConfig {
        host: url.host_str()?.to_string(),
        port: url.port().unwrap_or(8080),
        ..PrestoConfig::default()
    })
}

#[tokio::test]
async fn test_show_catalogs() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: PRESTO_URL not set");
        return;
    };
    let client = PrestoClient::new(config).unwrap();

    let result = client.execute_query("SHOW CATALOGS").await.unwrap();

    assert_eq!(result.columns.len(), 1);
    assert!(result
        .rows
        .iter()
        .any(|row| row[0].to_string() == "system"));
}

#[tokio::test]
async fn test_full_sequence() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: PRESTO_URL not set");
        return;
    };
    let engine = config.display_string();
    let queries = federated_queries(&config);
    let client = PrestoClient::new(config).unwrap();
    let mut out = Vec::new();

    let ran = run_queries(&client, &queries, &engine, &mut out)
        .await
        .unwrap();

    assert_eq!(ran, queries.len());
    assert!(String::from_utf8(out).unwrap().ends_with("\nDone.\n"));
}

#[tokio::test]
async fn test_unknown_table_is_query_error() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: PRESTO_URL not set");
        return;
    };
    let client = PrestoClient::new(config).unwrap();

    let err = client
        .execute_query(r#"SELECT * FROM sqlite."default".no_such_table"#)
        .await
        .unwrap_err();

    assert_eq!(err.category(), "Query Error");
}
