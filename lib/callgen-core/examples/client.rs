//! Client-side usage of wrapped endpoint declarations, against a transport
//! that only logs the assembled requests.

use callgen_core::{
    CallArgs, Configuration, Endpoint, LoggingTransport, Payload, set_default_configuration,
    wrap_endpoint,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ItemData {
    id: u32,
    name: String,
}

impl Payload for ItemData {}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    set_default_configuration(Configuration::new("http://localhost:8080", LoggingTransport)?);

    // Simple GET request without parameters
    let greeting_message = wrap_endpoint(&Endpoint::new("greeting_message").route("GET /"), None)?;
    let response = greeting_message.call(&CallArgs::new())?;
    println!("greeting_message -> {}", response.status());

    // GET request with path and query parameters
    let get_item = wrap_endpoint(
        &Endpoint::new("get_item")
            .route("GET /items/{item_id}")
            .scalar("item_id")
            .scalar("query"),
        None,
    )?;
    let response = get_item.call(&CallArgs::new().arg("item_id", 42).arg("query", "test"))?;
    println!("get_item -> {}", response.status());

    // POST request with a request body
    let create_item = wrap_endpoint(
        &Endpoint::new("create_item")
            .route("POST /items")
            .model::<ItemData>("data"),
        None,
    )?;
    let data = ItemData {
        id: 1,
        name: "A Box".to_string(),
    };
    let response = create_item.call(&CallArgs::new().model("data", &data))?;
    println!("create_item -> {}", response.status());

    // POST request using a plain map for the request body directly
    let response = create_item.call(
        &CallArgs::new().arg("data", serde_json::json!({"id": 1, "name": "Sample Item"})),
    )?;
    println!("create_item (raw map) -> {}", response.status());

    Ok(())
}
