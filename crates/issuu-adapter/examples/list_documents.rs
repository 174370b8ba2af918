/*
[INPUT]:  ISSUU_API_KEY / ISSUU_API_SECRET environment variables
[OUTPUT]: Public documents of the account, printed to stdout
[POS]:    Examples - signed GET request with slim responses
[UPDATE]: When the client construction or option API changes
*/

use issuu_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: list public, active documents
#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (Ok(api_key), Ok(secret)) = (
        std::env::var("ISSUU_API_KEY"),
        std::env::var("ISSUU_API_SECRET"),
    ) else {
        eprintln!("Set ISSUU_API_KEY and ISSUU_API_SECRET to run this example");
        return;
    };

    let mut client = match IssuuClient::new(api_key, secret) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let options = Options::new([
        ("access", ParamValue::from("public")),
        ("documentStates", ParamValue::from("A")),
        ("pageSize", ParamValue::from(10)),
        ("responseType", ParamValue::from("slim")),
    ]);
    match options {
        Ok(options) => client.set_options(options),
        Err(e) => {
            eprintln!("Invalid options: {}", e);
            return;
        }
    }

    println!("Listing documents...");
    match client.list_documents().await {
        Ok(documents) => println!("✓ Documents: {:#}", documents),
        Err(e) => println!("✗ Error: {}", e),
    }

    if let Ok(Accessor::Get(Some(page_size))) = client.accessor("getPageSize") {
        println!("Page size used: {}", page_size);
    }
}
