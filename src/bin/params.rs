use polarcraft::config::LabConfig;
use serde_json::json;

fn main() -> Result<(), serde_json::Error> {
    let params = LabConfig::default();
    let json = json!(params);
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
