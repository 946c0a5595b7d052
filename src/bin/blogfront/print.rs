#![deny(clippy::all, clippy::pedantic)]

use blogfront::application::AppError;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
