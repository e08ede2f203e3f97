use sqlmapper::{Flavor, Mappers, Row, Value};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sqlmapper=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mappers_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mappers");

    let mappers = Mappers::builder()
        .flavor(Flavor::Postgresql)
        .shrink_whitespace(true)
        .map_underscore_to_camel_case(true)
        .mapper_dir(mappers_dir)
        .build()?;

    tracing::info!(namespaces = ?mappers.namespaces(), "mappers ready");

    println!("==> demo.users.search");
    let param = Value::from(serde_json::json!({
        "name": "ada",
        "ids": [1, 2, 3],
    }));
    let bound = mappers.select("demo.users.search", &param)?;
    println!("sql  = {}", bound.sql);
    println!("args = {:?}", bound.args);

    println!("==> demo.users.create");
    let param = Value::from(serde_json::json!({
        "name": "Grace",
        "email": "grace@example.com",
    }));
    let bound = mappers.insert("demo.users.create", &param)?;
    println!("sql  = {}", bound.sql);
    println!("args = {:?}", bound.args);
    println!("keys = {:?}", bound.key_properties);

    println!("==> demo.users.patch");
    let param = Value::from(serde_json::json!({ "id": 1, "email": "ada@example.com" }));
    let bound = mappers.update("demo.users.patch", &param)?;
    println!("sql  = {}", bound.sql);
    println!("args = {:?}", bound.args);

    // Rows as a driver would hand them back for the search above
    let rows: Vec<Row> = [
        (1, "Ada", "admin"),
        (1, "Ada", "author"),
        (2, "Grace", "author"),
    ]
    .into_iter()
    .map(|(id, name, role)| {
        Row::from_iter([
            ("id".to_string(), Value::from(id as i64)),
            ("name".to_string(), Value::from(name)),
            ("created_at".to_string(), Value::from("2024-01-01 09:30:00")),
            ("role_name".to_string(), Value::from(role)),
        ])
    })
    .collect();

    println!("==> project rows with demo.users.user");
    for user in mappers.project_rows(&rows, "demo.users.user")? {
        println!("{}", serde_json::to_string_pretty(&user.to_json())?);
    }

    Ok(())
}
