use albaran_core::error::AlbaranError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), AlbaranError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
